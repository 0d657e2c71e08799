//! 질문 요청/응답 DTO
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::dto::common::{hex_id, hex_ids, to_utc};
use crate::domain::entities::questions::Question;
use crate::utils::string_utils::deserialize_optional_string;

/// 질문 작성. `tags` 는 태그 이름이며 작성자 국가 기준으로 없으면 생성됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, max = 10000, message = "description must be 1-10000 characters"))]
    pub description: String,

    #[serde(default, alias = "attachments")]
    #[validate(length(max = 10, message = "at most 10 attachments"))]
    pub attachments_url: Vec<String>,

    #[serde(default)]
    #[validate(length(max = 10, message = "at most 10 tags"))]
    pub tags: Vec<String>,

    /// 채택된 답변 작성자에게 지급할 포인트
    #[serde(default)]
    #[validate(range(min = 0, max = 1_000_000, message = "points must be 0-1000000"))]
    pub points: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 200, message = "title must be 1-200 characters"))]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "deserialize_optional_string")]
    #[validate(length(min = 1, max = 10000, message = "description must be 1-10000 characters"))]
    pub description: Option<String>,

    #[serde(default, alias = "attachments")]
    #[validate(length(max = 10, message = "at most 10 attachments"))]
    pub attachments_url: Option<Vec<String>>,

    #[serde(default)]
    #[validate(length(max = 10, message = "at most 10 tags"))]
    pub tags: Option<Vec<String>>,

    #[serde(default)]
    #[validate(range(min = 0, max = 1_000_000, message = "points must be 0-1000000"))]
    pub points: Option<i64>,
}

/// 목록 조회 쿼리 (`?title=&tag=&country_id=&user_id=`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionQuery {
    pub title: Option<String>,
    pub tag: Option<String>,
    pub country_id: Option<String>,
    pub user_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub attachments_url: Vec<String>,
    pub tags: Vec<String>,
    pub points: i64,
    pub country_id: Option<String>,
    pub user_id: String,
    pub verified_answer_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Question> for QuestionResponse {
    fn from(question: Question) -> Self {
        Self {
            id: hex_id(question.id),
            tags: hex_ids(&question.tags),
            title: question.title,
            description: question.description,
            attachments_url: question.attachments_url,
            points: question.points,
            country_id: question.country_id.map(|id| id.to_hex()),
            user_id: question.user_id.to_hex(),
            verified_answer_id: question.verified_answer_id.map(|id| id.to_hex()),
            created_at: to_utc(question.created_at),
            updated_at: to_utc(question.updated_at),
        }
    }
}
