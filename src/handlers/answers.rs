//! # Answer HTTP Handlers
//!
//! | 메서드 | 경로 | 인증 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/answers?question_id=&user_id=` | - | 200 |
//! | `GET` | `/answers/{id}` | - | 200 |
//! | `POST` | `/answers` | 필수 | 201 `{id}` |
//! | `PUT` | `/answers/{id}` | 필수 (작성자) | 200 |
//! | `DELETE` | `/answers/{id}` | 필수 (작성자) | 204 |
//! | `PUT` | `/answers/{id}/likes` | 필수 | 200 |
//! | `DELETE` | `/answers/{id}/likes` | 필수 | 200 |
//! | `PUT` | `/answers/{id}/verify` | 필수 (질문 작성자) | 200 |

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::answers::{
    AnswerQuery, AnswerResponse, CreateAnswerRequest, UpdateAnswerRequest,
};
use crate::domain::dto::common::IdResponse;
use crate::domain::entities::answers::AnswerFilter;
use crate::domain::models::auth::AuthenticatedUser;
use crate::utils::string_utils::{parse_object_id, parse_optional_object_id};

#[get("")]
pub async fn list_answers(
    state: web::Data<AppState>,
    query: web::Query<AnswerQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = AnswerFilter {
        question_id: parse_optional_object_id(query.question_id.as_deref(), "question_id")?,
        user_id: parse_optional_object_id(query.user_id.as_deref(), "user_id")?,
    };

    let answers: Vec<AnswerResponse> = state
        .answers
        .get_all(filter)
        .await?
        .into_iter()
        .map(AnswerResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(answers))
}

#[get("/{id}")]
pub async fn get_answer(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "id")?;

    let answer = state.answers.get_by_id(id).await?;
    Ok(HttpResponse::Ok().json(AnswerResponse::from(answer)))
}

#[post("")]
pub async fn create_answer(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    payload: web::Json<CreateAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let answer = state.answers.create(auth.user_id, payload.into_inner()).await?;
    let id = answer
        .id
        .ok_or_else(|| AppError::InternalError("생성된 답변에 ID 가 없습니다".to_string()))?;
    Ok(HttpResponse::Created().json(IdResponse::from(id)))
}

#[put("/{id}")]
pub async fn update_answer(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    let id = parse_object_id(&path, "id")?;

    let answer = state
        .answers
        .update(id, auth.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(AnswerResponse::from(answer)))
}

#[delete("/{id}")]
pub async fn delete_answer(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "id")?;

    state.answers.delete(id, auth.user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[put("/{id}/likes")]
pub async fn like_answer(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "id")?;

    let answer = state.answers.like(id).await?;
    Ok(HttpResponse::Ok().json(AnswerResponse::from(answer)))
}

#[delete("/{id}/likes")]
pub async fn unlike_answer(
    state: web::Data<AppState>,
    _auth: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "id")?;

    let answer = state.answers.unlike(id).await?;
    Ok(HttpResponse::Ok().json(AnswerResponse::from(answer)))
}

/// 채택과 함께 질문 포인트가 답변 작성자에게 옮겨갑니다.
#[put("/{id}/verify")]
pub async fn verify_answer(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "id")?;

    let answer = state.answers.verify(id, auth.user_id).await?;
    Ok(HttpResponse::Ok().json(AnswerResponse::from(answer)))
}
