use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::dto::common::hex_id;
use crate::domain::entities::tags::Tag;

/// 태그 생성. `country_id` 가 없으면 작성자 설정의 국가를 씁니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateTagRequest {
    #[validate(length(min = 1, max = 50, message = "name must be 1-50 characters"))]
    pub name: String,

    #[serde(default)]
    pub country_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagResponse {
    pub id: String,
    pub name: String,
    pub country_id: Option<String>,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: hex_id(tag.id),
            name: tag.name,
            country_id: tag.country_id.map(|id| id.to_hex()),
        }
    }
}
