//! # Image HTTP Handlers
//!
//! `POST /api/v1/images` 는 요청 바디 전체를 이미지 바이트로 받습니다 (`Content-Type: image/*`).
//! 응답은 201 `{"url": "..."}` 입니다.

use actix_web::{post, web, HttpResponse};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::images::ImageResponse;
use crate::domain::models::auth::AuthenticatedUser;

#[post("")]
pub async fn upload_image(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    log::debug!("🖼️ 이미지 업로드 요청: {} bytes by {}", body.len(), auth.user_id);

    let url = state.images.upload(body.to_vec()).await?;
    Ok(HttpResponse::Created().json(ImageResponse { url }))
}
