use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::dto::common::hex_id;
use crate::domain::entities::countries::Country;
use crate::domain::entities::users::Language;

/// 국가 생성 (관리자). 영어 이름은 필수입니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_country_names"))]
pub struct CreateCountryRequest {
    pub names: BTreeMap<String, String>,
}

fn validate_country_names(req: &CreateCountryRequest) -> Result<(), ValidationError> {
    let has_english = req
        .names
        .get(Language::En.as_str())
        .is_some_and(|name| !name.trim().is_empty());

    if !has_english {
        return Err(ValidationError::new("missing_english_name")
            .with_message("names.en is required".into()));
    }

    if req.names.keys().any(|code| Language::parse(code).as_str() != code.as_str()) {
        return Err(ValidationError::new("unsupported_language")
            .with_message("names contain an unsupported language code".into()));
    }

    Ok(())
}

/// 언어 선택 쿼리 (`?lang=uk`)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageQuery {
    pub lang: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryResponse {
    pub id: String,
    /// 요청 언어의 이름 (없으면 영어)
    pub name: String,
    pub names: BTreeMap<String, String>,
}

impl CountryResponse {
    pub fn localized(country: Country, language: Language) -> Self {
        let name = country.name_in(language).unwrap_or_default().to_string();
        Self {
            id: hex_id(country.id),
            name,
            names: country.names,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_english_name_required() {
        let request = CreateCountryRequest {
            names: BTreeMap::from([("uk".to_string(), "Україна".to_string())]),
        };
        assert!(request.validate().is_err());

        let request = CreateCountryRequest {
            names: BTreeMap::from([
                ("en".to_string(), "Ukraine".to_string()),
                ("uk".to_string(), "Україна".to_string()),
            ]),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_unknown_language_rejected() {
        let request = CreateCountryRequest {
            names: BTreeMap::from([
                ("en".to_string(), "France".to_string()),
                ("fr".to_string(), "France".to_string()),
            ]),
        };
        assert!(request.validate().is_err());
    }
}
