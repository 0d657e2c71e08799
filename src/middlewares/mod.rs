//! 미들웨어 모듈
//!
//! 요청 처리 파이프라인의 횡단 관심사를 담당합니다.
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Authorization: Bearer <access_token>` 검증
//! - 사용자 문서를 읽어 차단 여부 확인
//! - `AuthenticatedUser` 를 request extension 에 저장
//! - 선택적/강제 인증 모드, 역할 요구사항 지원
//!
//! ### 요청 ID (request_id)
//! - 응답에 `x-request-id` 헤더를 붙이고 로그에 남깁니다.
//!
//! ### 접근 로그 (access_logger)
//! - 요청 ID 를 포함한 한 줄 로그. `request_id` 보다 바깥에 감싸야 합니다.
//!
//! ## 특정 스코프에만 적용
//! ```rust,ignore
//! App::new()
//!     .app_data(state.clone())
//!     .service(
//!         web::scope("/api/v1")
//!             .wrap(AuthMiddleware::optional())
//!             .service(
//!                 web::scope("/admin")
//!                     .wrap(AuthMiddleware::required_with_role("admin"))
//!                     .service(handlers::users::block_user),
//!             ),
//!     )
//! ```

pub mod access_log;
mod auth_inner;
pub mod auth_middleware;
pub mod request_id;

pub use access_log::access_logger;
pub use auth_middleware::AuthMiddleware;
pub use request_id::request_id;
