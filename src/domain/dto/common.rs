//! 응답 DTO 공용 타입

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// 생성 API 의 응답 `{ "id": "<hex>" }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdResponse {
    pub id: String,
}

impl From<ObjectId> for IdResponse {
    fn from(id: ObjectId) -> Self {
        Self { id: id.to_hex() }
    }
}

/// BSON 시각을 RFC 3339 로 직렬화되는 chrono 시각으로 바꿉니다.
pub fn to_utc(value: bson::DateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}

pub fn hex_id(id: Option<ObjectId>) -> String {
    id.map(|id| id.to_hex()).unwrap_or_default()
}

pub fn hex_ids(ids: &[ObjectId]) -> Vec<String> {
    ids.iter().map(|id| id.to_hex()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_utc_keeps_millis() {
        let now = bson::DateTime::from_millis(1_700_000_000_123);
        assert_eq!(to_utc(now).timestamp_millis(), 1_700_000_000_123);
    }

    #[test]
    fn test_hex_ids() {
        let id = ObjectId::new();
        assert_eq!(hex_id(Some(id)), id.to_hex());
        assert_eq!(hex_id(None), "");
        assert_eq!(hex_ids(&[id]), vec![id.to_hex()]);
    }
}
