//! # Tag HTTP Handlers
//!
//! | 메서드 | 경로 | 인증 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/tags` | - | 200 |
//! | `GET` | `/tags/{id}` | - | 200 |
//! | `GET` | `/tags/country/{country_id}` | - | 200 |
//! | `POST` | `/tags` | 필수 | 201 `{id}` |
//!
//! 삭제는 관리자 전용입니다 ([`crate::handlers::admin::delete_tag`]).

use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::common::IdResponse;
use crate::domain::dto::tags::{CreateTagRequest, TagResponse};
use crate::domain::entities::tags::Tag;
use crate::domain::models::auth::AuthenticatedUser;
use crate::utils::string_utils::{parse_object_id, parse_optional_object_id};

fn to_responses(tags: Vec<Tag>) -> Vec<TagResponse> {
    tags.into_iter().map(TagResponse::from).collect()
}

#[get("")]
pub async fn list_tags(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let tags = state.tags.get_all(None).await?;
    Ok(HttpResponse::Ok().json(to_responses(tags)))
}

#[get("/country/{country_id}")]
pub async fn list_tags_by_country(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let country_id = parse_object_id(&path, "country_id")?;

    let tags = state.tags.get_all(Some(country_id)).await?;
    Ok(HttpResponse::Ok().json(to_responses(tags)))
}

#[get("/{id}")]
pub async fn get_tag(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "id")?;

    let tag = state.tags.get_by_id(id).await?;
    Ok(HttpResponse::Ok().json(TagResponse::from(tag)))
}

/// 같은 이름의 태그가 이미 있으면 그 태그의 ID 를 돌려줍니다.
#[post("")]
pub async fn create_tag(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    payload: web::Json<CreateTagRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let country_id = parse_optional_object_id(payload.country_id.as_deref(), "country_id")?
        .or(auth.country_id);
    let tag = state.tags.create(&payload.name, country_id).await?;
    let id = tag
        .id
        .ok_or_else(|| AppError::InternalError("생성된 태그에 ID 가 없습니다".to_string()))?;
    Ok(HttpResponse::Created().json(IdResponse::from(id)))
}
