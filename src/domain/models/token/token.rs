//! 액세스 토큰 클레임과 발급 결과
use serde::{Deserialize, Serialize};

/// HS256 액세스 토큰 클레임. `sub` 는 사용자 ObjectId 의 hex 문자열입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// 로그인/가입/갱신 시 발급되는 토큰 쌍
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenPair {
    pub access_token: String,
    /// 서명 없는 랜덤 hex 문자열. 세션 저장소 조회로만 검증됩니다.
    pub refresh_token: String,
    pub token_type: String,
    /// 액세스 토큰 수명 (초)
    pub expires_in: i64,
}
