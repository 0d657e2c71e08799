//! # HTTP Request Handlers Module
//!
//! 요청을 DTO 로 받아 검증하고 `AppState` 의 서비스를 호출한 뒤 응답 DTO 로 돌려줍니다.
//! 모든 핸들러는 `Result<HttpResponse, AppError>` 를 반환하므로 `?` 로 전파된 에러가
//! 그대로 `{code, message}` JSON 이 됩니다.
//!
//! ```text
//! Client ─▶ AuthMiddleware ─▶ Handler ─▶ Service ─▶ Repository ─▶ MongoDB / Redis
//! ```
//!
//! ```rust,ignore
//! #[post("")]
//! pub async fn create_question(
//!     state: web::Data<AppState>,
//!     auth: AuthenticatedUser,
//!     payload: web::Json<CreateQuestionRequest>,
//! ) -> Result<HttpResponse, AppError> {
//!     payload.validate()?;
//!     let question = state.questions.create(auth.user_id, auth.country_id, payload.into_inner()).await?;
//!     let id = question.id.ok_or_else(|| AppError::InternalError("missing id".to_string()))?;
//!     Ok(HttpResponse::Created().json(IdResponse::from(id)))
//! }
//! ```
//!
//! ## 모듈 구성
//!
//! - `users` - 가입, 로그인, 토큰 갱신, 내 정보, 즐겨찾기
//! - `admin` - 포인트, 업적, 확인/차단, 국가 생성, 태그 삭제
//! - `questions`, `answers`, `tags`, `countries`, `images`
//! - `health` - 헬스체크

pub mod admin;
pub mod answers;
pub mod countries;
pub mod health;
pub mod images;
pub mod questions;
pub mod tags;
pub mod users;
