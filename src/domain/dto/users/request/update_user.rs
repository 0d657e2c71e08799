//! 프로필 수정 / 관리자 조작 요청 DTO
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::sign_up::validate_username;
use crate::utils::string_utils::{deserialize_optional_secret, deserialize_optional_string};

/// 프로필 부분 수정
///
/// 빠졌거나 빈 문자열인 필드는 변경하지 않습니다.
/// 이메일을 바꾸면 확인 상태가 초기화되고 확인 메일이 다시 나갑니다.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_update_username"))]
pub struct UpdateUserRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 50, message = "name must be 1-50 characters"))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 3, max = 30, message = "username must be 3-30 characters"))]
    pub username: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(email(message = "invalid email address"))]
    pub email: Option<String>,

    /// 공백을 포함해 입력 그대로 해싱됩니다. 가입/로그인과 같은 규칙입니다.
    #[serde(default, deserialize_with = "deserialize_optional_secret")]
    #[validate(length(min = 6, max = 64, message = "password must be 6-64 characters"))]
    pub password: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(url(message = "avatar_url must be a valid URL"))]
    pub avatar_url: Option<String>,

    #[serde(default)]
    pub social_links: Option<Vec<String>>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub country_id: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub language: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub appearance: Option<String>,

    #[serde(default)]
    pub email_notifications: Option<bool>,
}

fn validate_update_username(req: &UpdateUserRequest) -> Result<(), ValidationError> {
    match req.username.as_deref() {
        Some(username) => validate_username(username),
        None => Ok(()),
    }
}

/// 관리자 포인트 조정. 음수는 차감입니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AdjustPointsRequest {
    #[validate(range(min = -1_000_000, max = 1_000_000, message = "delta is out of range"))]
    pub delta: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AchievementRequest {
    #[validate(length(min = 1, max = 64, message = "achievement must be 1-64 characters"))]
    pub achievement: String,
}
