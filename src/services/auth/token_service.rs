//! JWT 토큰 관리 서비스 구현
//!
//! 두 종류의 토큰을 다룹니다.
//!
//! - 액세스 토큰: HS256 으로 서명된 JWT. `sub` 에 사용자 ID, `exp` 에 만료 시각이 들어갑니다.
//! - 리프레시 토큰: 클레임이 없는 랜덤 hex 문자열. 서명하지 않으며 세션 저장소 조회로만 검증됩니다.
//!
//! 상태가 없으므로 요청마다 복제해서 써도 됩니다.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::oid::ObjectId;

use crate::config::AuthConfig;
use crate::core::errors::{AppError, ErrorContext};
use crate::domain::models::token::{TokenClaims, TokenPair};
use crate::utils::random::random_hex;

const BEARER_PREFIX: &str = "Bearer ";

/// JWT 토큰 관리자
#[derive(Clone)]
pub struct TokenManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_ttl: Duration,
    refresh_token_length: usize,
}

impl TokenManager {
    pub fn new(signing_key: &str, access_token_ttl: Duration, refresh_token_length: usize) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(signing_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(signing_key.as_bytes()),
            access_token_ttl,
            refresh_token_length,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            &config.signing_key,
            Duration::minutes(config.access_token_ttl_minutes),
            config.refresh_token_length,
        )
    }

    /// 사용자 ID 를 subject 로 하는 액세스 토큰 생성
    ///
    /// # Errors
    ///
    /// * `AppError::InternalError` - JWT 인코딩 실패
    pub fn new_access_token(&self, user_id: ObjectId) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user_id.to_hex(),
            iat: now.timestamp(),
            exp: (now + self.access_token_ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .context("JWT 토큰 생성 실패")
    }

    /// 랜덤 리프레시 토큰. 길이는 `2 * refresh_token_length` 의 hex 문자열입니다.
    pub fn new_refresh_token(&self) -> String {
        random_hex(self.refresh_token_length)
    }

    /// 액세스/리프레시 토큰 쌍 생성
    ///
    /// 세션 저장은 호출하는 쪽 책임입니다.
    pub fn issue(&self, user_id: ObjectId) -> Result<TokenPair, AppError> {
        Ok(TokenPair {
            access_token: self.new_access_token(user_id)?,
            refresh_token: self.new_refresh_token(),
            token_type: "Bearer".to_string(),
            expires_in: self.access_token_ttl.num_seconds(),
        })
    }

    /// JWT 토큰 검증 및 클레임 추출
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 만료, 잘못된 서명/알고리즘/형식
    pub fn verify(&self, token: &str) -> Result<TokenClaims, AppError> {
        let validation = Validation::new(Algorithm::HS256);

        decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::AuthenticationError("토큰이 만료되었습니다".to_string())
                }
                _ => AppError::AuthenticationError(format!("유효하지 않은 토큰입니다: {}", e)),
            })
    }

    /// 액세스 토큰을 검증하고 subject 를 사용자 ID 로 돌려줍니다.
    pub fn parse(&self, token: &str) -> Result<ObjectId, AppError> {
        let claims = self.verify(token)?;

        ObjectId::parse_str(&claims.sub).map_err(|_| {
            AppError::AuthenticationError("토큰 subject 가 올바르지 않습니다".to_string())
        })
    }
}

/// `Authorization: Bearer <token>` 헤더에서 토큰 부분만 꺼냅니다.
pub fn extract_bearer_token(auth_header: &str) -> Result<&str, AppError> {
    auth_header
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            AppError::AuthenticationError("유효하지 않은 인증 헤더 형식입니다".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> TokenManager {
        TokenManager::new("test-signing-key", Duration::minutes(15), 32)
    }

    #[test]
    fn test_issue_and_parse() {
        let manager = manager();
        let user_id = ObjectId::new();

        let pair = manager.issue(user_id).unwrap();

        assert_eq!(manager.parse(&pair.access_token).unwrap(), user_id);
        assert_eq!(pair.refresh_token.len(), 64);
        assert_eq!(pair.token_type, "Bearer");
        assert_eq!(pair.expires_in, 15 * 60);
    }

    #[test]
    fn test_wrong_signing_key_is_rejected() {
        let token = manager().new_access_token(ObjectId::new()).unwrap();
        let other = TokenManager::new("another-key", Duration::minutes(15), 32);

        assert!(matches!(other.parse(&token), Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let manager = TokenManager::new("test-signing-key", Duration::minutes(-10), 32);
        let token = manager.new_access_token(ObjectId::new()).unwrap();

        assert!(matches!(manager.parse(&token), Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_malformed_subject_is_rejected() {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: "not-an-object-id".to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(5)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-signing-key"),
        )
        .unwrap();

        assert!(matches!(manager().parse(&token), Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(matches!(manager().parse("abc.def.ghi"), Err(AppError::AuthenticationError(_))));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc").unwrap(), "abc");
        assert!(extract_bearer_token("Basic abc").is_err());
        assert!(extract_bearer_token("Bearer ").is_err());
    }
}
