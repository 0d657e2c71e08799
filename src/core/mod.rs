//! # Core Module
//!
//! 서비스 전역에서 쓰는 두 가지를 모아 둡니다.
//!
//! - [`errors`]: `AppError` 와 `{code, message}` HTTP 에러 응답
//! - [`state`]: 서비스 조립 결과인 `AppState`
//!
//! ## 의존성 흐름
//!
//! ```text
//! main ─ AppConfig::load()
//!      └ AppState::build(config)
//!           ├ Database / RedisClient
//!           ├ Mongo*Repository, RedisSessionStore, ImgbbImageHost
//!           └ UserService, QuestionService, AnswerService, ...
//!                └ web::Data<AppState> → handlers, AuthMiddleware
//! ```
//!
//! ## 에러 처리
//!
//! ```rust,ignore
//! #[get("/{id}")]
//! async fn get_user(state: web::Data<AppState>, id: web::Path<String>) -> Result<HttpResponse, AppError> {
//!     let id = parse_object_id(&id, "user id")?;     // 400 ERR_BAD_REQUEST
//!     let user = state.users.get_by_id(id).await?;    // 404 ERR_USER_NOT_FOUND
//!     Ok(HttpResponse::Ok().json(PublicUserResponse::from(user)))
//! }
//! ```

pub mod errors;
pub mod state;

pub use errors::*;
pub use state::*;
