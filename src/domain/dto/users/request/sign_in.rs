use serde::{Deserialize, Serialize};
use validator::Validate;

/// 로그인 요청. 사용자명 또는 이메일 중 하나로 로그인합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignInRequest {
    #[validate(length(min = 1, message = "username_or_email is required"))]
    pub username_or_email: String,

    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// 리프레시 토큰 교환/로그아웃 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "refresh_token is required"))]
    pub refresh_token: String,
}

/// 이메일 확인 링크의 쿼리
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmEmailQuery {
    pub token: String,
}
