use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

pub const QUESTION_COLLECTION: &str = "questions";

/// 질문 문서. `points` 는 채택된 답변 작성자에게 지급되는 보상입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub attachments_url: Vec<String>,
    #[serde(default)]
    pub tags: Vec<ObjectId>,
    pub points: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub country_id: Option<ObjectId>,
    pub user_id: ObjectId,
    /// 채택된 답변. 질문당 하나만 조건부 갱신으로 선점됩니다.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub verified_answer_id: Option<ObjectId>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

/// 목록 조회 필터. 모든 조건은 AND 로 결합됩니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionFilter {
    /// 대소문자를 구분하지 않는 부분 일치
    pub title: Option<String>,
    pub tag: Option<ObjectId>,
    pub country_id: Option<ObjectId>,
    pub user_id: Option<ObjectId>,
}

/// 부분 수정. `None` 인 필드는 그대로 둡니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub attachments_url: Option<Vec<String>>,
    pub tags: Option<Vec<ObjectId>>,
    pub points: Option<i64>,
}

impl QuestionChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.attachments_url.is_none()
            && self.tags.is_none()
            && self.points.is_none()
    }
}
