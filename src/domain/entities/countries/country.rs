use std::collections::BTreeMap;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::domain::entities::users::Language;

pub const COUNTRY_COLLECTION: &str = "countries";

/// 국가. 언어 코드별 표시 이름을 가집니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub names: BTreeMap<String, String>,
}

impl Country {
    /// 요청 언어의 이름, 없으면 영어 이름을 돌려줍니다.
    pub fn name_in(&self, language: Language) -> Option<&str> {
        self.names
            .get(language.as_str())
            .or_else(|| self.names.get(Language::En.as_str()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_falls_back_to_english() {
        let country = Country {
            id: None,
            names: BTreeMap::from([
                ("en".to_string(), "Ukraine".to_string()),
                ("uk".to_string(), "Україна".to_string()),
            ]),
        };

        assert_eq!(country.name_in(Language::Uk), Some("Україна"));
        assert_eq!(country.name_in(Language::De), Some("Ukraine"));
    }
}
