use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

pub const TAG_COLLECTION: &str = "tags";

/// 국가별 태그. `(name, country_id)` 조합은 유일합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub country_id: Option<ObjectId>,
}

/// 태그 이름 정규화: 앞뒤 공백 제거, 소문자
pub fn normalize_tag_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_tag_name() {
        assert_eq!(normalize_tag_name("  Rust "), "rust");
        assert_eq!(normalize_tag_name("Async-Await"), "async-await");
    }
}
