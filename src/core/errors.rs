//! # Application Error Handling System
//!
//! 서비스 전역에서 사용하는 에러 타입입니다.
//! 모든 에러는 경계(HTTP 핸들러)에서 `{code, message}` 형태의 JSON 으로 변환되며,
//! `code` 는 클라이언트가 분기할 수 있는 안정적인 문자열 식별자입니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | code |
//! |----------|-------------|------|
//! | `ValidationError` | 400 Bad Request | `ERR_BAD_REQUEST` |
//! | `InsufficientPoints` | 400 Bad Request | `ERR_USER_INSUFFICIENT_POINTS` |
//! | `AuthenticationError` | 401 Unauthorized | `ERR_UNAUTHORIZED` |
//! | `AuthorizationError` | 403 Forbidden | `ERR_FORBIDDEN` |
//! | `Blocked` | 403 Forbidden | `ERR_USER_BLOCKED` |
//! | `NotFound` | 404 Not Found | `ERR_<RESOURCE>_NOT_FOUND` |
//! | `AlreadyExists` | 409 Conflict | `ERR_USER_ALREADY_EXISTS` |
//! | `DatabaseError` / `RedisError` / `ExternalServiceError` / `InternalError` | 500 | `ERR_INTERNAL_SERVER_ERROR` |
//!
//! 5xx 계열의 상세 원인은 서버 로그에만 남기고 클라이언트에는
//! 일반 메시지만 돌려줍니다.

use std::fmt;

use actix_web::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// 조회 대상 리소스 종류
///
/// `NotFound` 에러의 코드(`ERR_USER_NOT_FOUND` 등)를 결정합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Question,
    Answer,
    Tag,
    Country,
}

impl Resource {
    pub fn code(&self) -> &'static str {
        match self {
            Resource::User => "ERR_USER_NOT_FOUND",
            Resource::Question => "ERR_QUESTION_NOT_FOUND",
            Resource::Answer => "ERR_ANSWER_NOT_FOUND",
            Resource::Tag => "ERR_TAG_NOT_FOUND",
            Resource::Country => "ERR_COUNTRY_NOT_FOUND",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Resource::User => "user",
            Resource::Question => "question",
            Resource::Answer => "answer",
            Resource::Tag => "tag",
            Resource::Country => "country",
        };
        f.write_str(name)
    }
}

/// 애플리케이션 전역 에러 타입
///
/// 인프라 계층 에러(`DatabaseError`, `RedisError`, `ExternalServiceError`)는
/// 원본 메시지를 문자열로 보존하고, 도메인 에러는 고정된 코드로 매핑됩니다.
///
/// ```rust,ignore
/// collection.find_one(doc! { "_id": id }).await
///     .map_err(|e| AppError::DatabaseError(e.to_string()))?
///     .ok_or(AppError::NotFound(Resource::User))?;
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Redis error: {0}")]
    RedisError(String),

    /// 잘못된 입력 (형식 오류, 검증 실패, 잘못된 ObjectId 등)
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{0} not found")]
    NotFound(Resource),

    /// 사용자명 또는 이메일 유니크 인덱스 위반
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// 포인트 차감 시 잔액이 음수가 되는 경우
    #[error("insufficient points")]
    InsufficientPoints,

    /// 토큰 누락/위조/만료, 알 수 없는 리프레시 토큰
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    #[error("user is blocked")]
    Blocked,

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

/// 클라이언트에 노출되는 에러 바디
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

impl AppError {
    /// 안정적인 에러 코드
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "ERR_BAD_REQUEST",
            AppError::NotFound(resource) => resource.code(),
            AppError::AlreadyExists(_) => "ERR_USER_ALREADY_EXISTS",
            AppError::InsufficientPoints => "ERR_USER_INSUFFICIENT_POINTS",
            AppError::AuthenticationError(_) => "ERR_UNAUTHORIZED",
            AppError::AuthorizationError(_) => "ERR_FORBIDDEN",
            AppError::Blocked => "ERR_USER_BLOCKED",
            AppError::DatabaseError(_)
            | AppError::RedisError(_)
            | AppError::ExternalServiceError(_)
            | AppError::InternalError(_) => "ERR_INTERNAL_SERVER_ERROR",
        }
    }

    /// 서버 내부 원인을 감춘 메시지
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg) => msg.clone(),
            AppError::NotFound(_) | AppError::InsufficientPoints | AppError::Blocked => {
                self.to_string()
            }
            AppError::AlreadyExists(_) => "user already exists".to_string(),
            AppError::AuthenticationError(_) => "unauthorized access".to_string(),
            AppError::AuthorizationError(_) => "access denied".to_string(),
            _ => "internal server error".to_string(),
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            message: self.public_message(),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InsufficientPoints => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) | AppError::Blocked => StatusCode::FORBIDDEN,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("❌ {}", self);
        } else {
            log::debug!("요청 실패 ({}): {}", status.as_u16(), self);
        }

        actix_web::HttpResponse::build(status).json(self.body())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 임의의 에러에 문맥을 덧붙여 `InternalError` 로 변환합니다.
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> AppResult<T>;

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}
