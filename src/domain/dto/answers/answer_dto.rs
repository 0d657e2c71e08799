//! 답변 요청/응답 DTO
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::dto::common::{hex_id, to_utc};
use crate::domain::entities::answers::Answer;
use crate::utils::string_utils::deserialize_optional_string;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAnswerRequest {
    #[validate(length(min = 1, max = 10000, message = "text must be 1-10000 characters"))]
    pub text: String,

    #[validate(length(equal = 24, message = "question_id must be a 24-character hex id"))]
    pub question_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateAnswerRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 10000, message = "text must be 1-10000 characters"))]
    pub text: Option<String>,
}

/// 목록 조회 쿼리 (`?question_id=&user_id=`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnswerQuery {
    pub question_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub id: String,
    pub text: String,
    pub likes: i64,
    pub question_id: String,
    pub user_id: String,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Answer> for AnswerResponse {
    fn from(answer: Answer) -> Self {
        Self {
            id: hex_id(answer.id),
            text: answer.text,
            likes: answer.likes,
            question_id: answer.question_id.to_hex(),
            user_id: answer.user_id.to_hex(),
            is_verified: answer.is_verified,
            created_at: to_utc(answer.created_at),
            updated_at: to_utc(answer.updated_at),
        }
    }
}
