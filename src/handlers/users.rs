//! # User HTTP Handlers
//!
//! 계정과 세션 수명주기를 다루는 엔드포인트입니다. 모두 `/api/v1/users` 아래에 있습니다.
//!
//! | 메서드 | 경로 | 인증 | 설명 | 상태 코드 |
//! |--------|------|------|------|-----------|
//! | `POST` | `/sign-up` | - | 회원가입 + 토큰 발급 | 200 |
//! | `POST` | `/sign-in` | - | 로그인 | 200 |
//! | `POST` | `/refresh` | - | 리프레시 토큰 교환 | 200 |
//! | `POST` | `/sign-out` | - | 세션 삭제 | 204 |
//! | `GET` | `/confirm?token=` | - | 이메일 확인 | 200 |
//! | `GET` | `` | 필수 | 내 정보 | 200 |
//! | `PUT` | `` | 필수 | 내 정보 수정 | 200 |
//! | `DELETE` | `` | 필수 | 탈퇴 | 204 |
//! | `PUT` | `/favorites/{question_id}` | 필수 | 즐겨찾기 추가 | 200 |
//! | `DELETE` | `/favorites/{question_id}` | 필수 | 즐겨찾기 제거 | 200 |
//! | `GET` | `/{id}` | - | 공개 프로필 | 200 |
//!
//! 인증이 필요한 핸들러는 [`AuthenticatedUser`] 추출기를 받습니다.
//! 미들웨어가 사용자를 넣지 않았다면 추출 단계에서 401 이 됩니다.

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::users::{
    ConfirmEmailQuery, PublicUserResponse, RefreshTokenRequest, SignInRequest, SignUpRequest,
    UpdateUserRequest, UserResponse,
};
use crate::domain::models::auth::{AuthenticatedUser, OptionalUser};
use crate::utils::string_utils::parse_object_id;

#[post("/sign-up")]
pub async fn sign_up(
    state: web::Data<AppState>,
    payload: web::Json<SignUpRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let tokens = state.users.sign_up(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tokens))
}

#[post("/sign-in")]
pub async fn sign_in(
    state: web::Data<AppState>,
    payload: web::Json<SignInRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let tokens = state.users.sign_in(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tokens))
}

#[post("/refresh")]
pub async fn refresh_tokens(
    state: web::Data<AppState>,
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let tokens = state.users.refresh_tokens(&payload.refresh_token).await?;
    Ok(HttpResponse::Ok().json(tokens))
}

#[post("/sign-out")]
pub async fn sign_out(
    state: web::Data<AppState>,
    payload: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    state.users.sign_out(&payload.refresh_token).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// 확인 메일 링크가 가리키는 엔드포인트
#[get("/confirm")]
pub async fn confirm_email(
    state: web::Data<AppState>,
    query: web::Query<ConfirmEmailQuery>,
) -> Result<HttpResponse, AppError> {
    let user = state.users.confirm_email(&query.token).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[get("")]
pub async fn get_me(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let user = state.users.get_by_id(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[put("")]
pub async fn update_me(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    payload: web::Json<UpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let user = state.users.update(auth.user_id, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[delete("")]
pub async fn delete_me(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.users.delete(auth.user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// 존재하는 질문만 즐겨찾기에 넣을 수 있습니다. 이미 있으면 그대로 200.
#[put("/favorites/{question_id}")]
pub async fn add_favorite(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let question_id = parse_object_id(&path, "question_id")?;
    state.questions.get_by_id(question_id).await?;

    let user = state.users.add_favorite(auth.user_id, question_id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[delete("/favorites/{question_id}")]
pub async fn remove_favorite(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let question_id = parse_object_id(&path, "question_id")?;

    let user = state.users.remove_favorite(auth.user_id, question_id).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// 관리자에게는 이메일과 플래그를 포함한 전체 정보를 보여줍니다.
#[get("/{id}")]
pub async fn get_user(
    state: web::Data<AppState>,
    viewer: OptionalUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "id")?;

    let user = state.users.get_by_id(id).await?;
    match viewer.0 {
        Some(viewer) if viewer.is_admin() => Ok(HttpResponse::Ok().json(UserResponse::from(user))),
        _ => Ok(HttpResponse::Ok().json(PublicUserResponse::from(user))),
    }
}
