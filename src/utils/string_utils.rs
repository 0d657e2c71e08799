//! # 문자열 유틸리티
//!
//! 요청 값 정리와 ObjectId 파싱처럼 핸들러/서비스가 공통으로 쓰는 함수들입니다.

use mongodb::bson::oid::ObjectId;
use serde::Deserialize;

use crate::core::errors::AppError;

/// 선택적 문자열 필드 정리
///
/// None 이거나 공백뿐인 값은 None 으로 바꿉니다. 부분 수정 요청에서
/// 빈 값은 "변경 없음" 으로 취급됩니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// `clean_optional_string` 을 적용하는 serde 역직렬화 함수
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// 비밀번호처럼 공백도 값의 일부인 필드용. 빠졌거나 빈 문자열이면 None 이고
/// 그 외에는 받은 그대로 둡니다.
pub fn deserialize_optional_secret<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|s| !s.is_empty()))
}

/// hex 문자열을 ObjectId 로 변환합니다. 형식이 틀리면 400.
pub fn parse_object_id(value: &str, field_name: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(value.trim())
        .map_err(|_| AppError::ValidationError(format!("invalid {}", field_name)))
}

/// 값이 있을 때만 ObjectId 로 변환합니다. 빈 문자열은 None.
pub fn parse_optional_object_id(
    value: Option<&str>,
    field_name: &str,
) -> Result<Option<ObjectId>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => parse_object_id(v, field_name).map(Some),
        None => Ok(None),
    }
}
