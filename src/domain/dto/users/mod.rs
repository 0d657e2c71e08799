//! # User Data Transfer Objects Module
//!
//! 사용자 API 의 요청/응답 구조입니다.
//!
//! ```text
//! users/
//! ├── request/
//! │   ├── sign_up.rs       # 회원가입
//! │   ├── sign_in.rs       # 로그인, 토큰 갱신, 이메일 확인
//! │   └── update_user.rs   # 프로필 수정, 관리자 포인트/업적
//! └── response/
//!     └── user_response.rs # 본인/공개 프로필
//! ```
//!
//! 토큰 응답은 [`crate::domain::models::token::TokenPair`] 를 그대로 직렬화합니다.
//!
//! ```json
//! {
//!   "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...",
//!   "refresh_token": "9f86d081884c7d659a2feaa0c55ad015a3bf4f1b2b0b822cd15d6c15b0f00a08",
//!   "token_type": "Bearer",
//!   "expires_in": 900
//! }
//! ```

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
