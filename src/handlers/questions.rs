//! # Question HTTP Handlers
//!
//! | 메서드 | 경로 | 인증 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/questions?title=&tag=&country_id=&user_id=` | - | 200 |
//! | `GET` | `/questions/{id}` | - | 200 |
//! | `POST` | `/questions` | 필수 | 201 `{id}` |
//! | `PUT` | `/questions/{id}` | 필수 (작성자) | 200 |
//! | `DELETE` | `/questions/{id}` | 필수 (작성자) | 204 |

use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::common::IdResponse;
use crate::domain::dto::questions::{
    CreateQuestionRequest, QuestionQuery, QuestionResponse, UpdateQuestionRequest,
};
use crate::domain::entities::questions::QuestionFilter;
use crate::domain::models::auth::AuthenticatedUser;
use crate::utils::string_utils::{clean_optional_string, parse_object_id, parse_optional_object_id};

impl TryFrom<QuestionQuery> for QuestionFilter {
    type Error = AppError;

    fn try_from(query: QuestionQuery) -> Result<Self, Self::Error> {
        Ok(Self {
            title: clean_optional_string(query.title),
            tag: parse_optional_object_id(query.tag.as_deref(), "tag")?,
            country_id: parse_optional_object_id(query.country_id.as_deref(), "country_id")?,
            user_id: parse_optional_object_id(query.user_id.as_deref(), "user_id")?,
        })
    }
}

#[get("")]
pub async fn list_questions(
    state: web::Data<AppState>,
    query: web::Query<QuestionQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = QuestionFilter::try_from(query.into_inner())?;

    let questions: Vec<QuestionResponse> = state
        .questions
        .get_all(filter)
        .await?
        .into_iter()
        .map(QuestionResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(questions))
}

#[get("/{id}")]
pub async fn get_question(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "id")?;

    let question = state.questions.get_by_id(id).await?;
    Ok(HttpResponse::Ok().json(QuestionResponse::from(question)))
}

/// 질문의 국가는 작성자 설정의 국가입니다.
#[post("")]
pub async fn create_question(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    payload: web::Json<CreateQuestionRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let question = state
        .questions
        .create(auth.user_id, auth.country_id, payload.into_inner())
        .await?;
    let id = question
        .id
        .ok_or_else(|| AppError::InternalError("생성된 질문에 ID 가 없습니다".to_string()))?;
    Ok(HttpResponse::Created().json(IdResponse::from(id)))
}

#[put("/{id}")]
pub async fn update_question(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateQuestionRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;
    let id = parse_object_id(&path, "id")?;

    let question = state
        .questions
        .update(id, auth.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(QuestionResponse::from(question)))
}

#[delete("/{id}")]
pub async fn delete_question(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "id")?;

    state.questions.delete(id, auth.user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
