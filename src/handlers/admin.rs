//! # Admin HTTP Handlers
//!
//! `/api/v1/admin` 스코프는 `AuthMiddleware::required_with_role("admin")` 으로 감싸져 있습니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `POST` | `/users/{id}/points` | 포인트 조정 (`{"delta": -5}`) |
//! | `PUT` | `/users/{id}/achievements` | 업적 추가 |
//! | `DELETE` | `/users/{id}/achievements` | 업적 제거 |
//! | `PUT` | `/users/{id}/confirm` | 이메일 확인 처리 |
//! | `PUT` | `/users/{id}/block` | 차단 |
//! | `PUT` | `/users/{id}/unblock` | 차단 해제 |
//! | `POST` | `/countries` | 국가 생성 |
//! | `DELETE` | `/tags/{id}` | 태그 삭제 |

use actix_web::{delete, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::common::IdResponse;
use crate::domain::dto::countries::CreateCountryRequest;
use crate::domain::dto::users::{AchievementRequest, AdjustPointsRequest, UserResponse};
use crate::domain::models::auth::AuthenticatedUser;
use crate::utils::string_utils::parse_object_id;

#[post("/users/{id}/points")]
pub async fn adjust_points(
    state: web::Data<AppState>,
    admin: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<AdjustPointsRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    let id = parse_object_id(&path, "id")?;

    let user = state.users.adjust_points(id, payload.delta).await?;
    log::info!("🛠️ 관리자 {} 포인트 조정: {} ({:+})", admin.user_id, id, payload.delta);
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[put("/users/{id}/achievements")]
pub async fn add_achievement(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<AchievementRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    let id = parse_object_id(&path, "id")?;

    let user = state
        .users
        .add_achievement(id, payload.into_inner().achievement)
        .await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[delete("/users/{id}/achievements")]
pub async fn remove_achievement(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<AchievementRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    let id = parse_object_id(&path, "id")?;

    let user = state
        .users
        .remove_achievement(id, payload.into_inner().achievement)
        .await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[put("/users/{id}/confirm")]
pub async fn confirm_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "id")?;

    let user = state.users.confirm(id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[put("/users/{id}/block")]
pub async fn block_user(
    state: web::Data<AppState>,
    admin: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "id")?;
    if id == admin.user_id {
        return Err(AppError::ValidationError("cannot block yourself".to_string()));
    }

    let user = state.users.block(id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[put("/users/{id}/unblock")]
pub async fn unblock_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "id")?;

    let user = state.users.unblock(id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[post("/countries")]
pub async fn create_country(
    state: web::Data<AppState>,
    payload: web::Json<CreateCountryRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let country = state.countries.create(payload.into_inner().names).await?;
    let id = country
        .id
        .ok_or_else(|| AppError::InternalError("생성된 국가에 ID 가 없습니다".to_string()))?;
    Ok(HttpResponse::Created().json(IdResponse::from(id)))
}

#[delete("/tags/{id}")]
pub async fn delete_tag(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "id")?;

    state.tags.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
