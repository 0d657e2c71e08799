use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

pub const ANSWER_COLLECTION: &str = "answers";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub text: String,
    pub likes: i64,
    pub question_id: ObjectId,
    pub user_id: ObjectId,
    /// 질문 작성자가 채택한 답변
    pub is_verified: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Answer {
    pub fn new(text: String, question_id: ObjectId, user_id: ObjectId) -> Self {
        let now = DateTime::now();
        Self {
            id: None,
            text,
            likes: 0,
            question_id,
            user_id,
            is_verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnswerFilter {
    pub question_id: Option<ObjectId>,
    pub user_id: Option<ObjectId>,
}
