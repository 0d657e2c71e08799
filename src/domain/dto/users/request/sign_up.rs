//! 회원가입 요청 DTO
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 회원가입 요청
///
/// `country_id`, `language`, `referral_code` 는 선택 값입니다.
/// 존재하지 않는 추천 코드는 가입을 막지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignUpRequest {
    #[validate(length(min = 1, max = 50, message = "name must be 1-50 characters"))]
    pub name: String,

    /// 3-30자, 영문/숫자/언더스코어만 허용
    #[validate(length(min = 3, max = 30, message = "username must be 3-30 characters"))]
    #[validate(custom(function = "validate_username"))]
    pub username: String,

    #[validate(email(message = "invalid email address"))]
    pub email: String,

    /// 글자 수 기준입니다. 바이트 길이와 무관하게 해싱 전에 SHA-256 으로 줄어듭니다.
    #[validate(length(min = 6, max = 64, message = "password must be 6-64 characters"))]
    pub password: String,

    #[serde(default)]
    pub country_id: Option<String>,

    #[serde(default)]
    pub language: Option<String>,

    #[serde(default, alias = "referrer_code")]
    pub referral_code: Option<String>,
}

/// 사용자명 형식 검증 (영문, 숫자, 언더스코어만 허용)
pub(crate) fn validate_username(username: &str) -> Result<(), ValidationError> {
    if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::new("invalid_username")
            .with_message("username may contain only letters, digits and underscores".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SignUpRequest {
        SignUpRequest {
            name: "Alice".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "Secr3t!".to_string(),
            country_id: None,
            language: None,
            referral_code: None,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_invalid_fields() {
        let mut bad_email = request();
        bad_email.email = "not-an-email".to_string();
        assert!(bad_email.validate().is_err());

        let mut bad_username = request();
        bad_username.username = "al ice!".to_string();
        assert!(bad_username.validate().is_err());

        let mut short_password = request();
        short_password.password = "abc".to_string();
        assert!(short_password.validate().is_err());
    }

    #[test]
    fn test_referrer_code_alias() {
        let json = r#"{
            "name": "Bob", "username": "bob", "email": "bob@example.com",
            "password": "Secr3t!", "referrer_code": "CAFEBABE"
        }"#;
        let request: SignUpRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.referral_code.as_deref(), Some("CAFEBABE"));
    }
}
