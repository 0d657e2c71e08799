//! # Domain Models Module
//!
//! 영속화되지 않는 도메인 값 객체들입니다.
//!
//! ## Entities vs Models
//!
//! - `entities/`: MongoDB 문서로 저장되는 타입 (`User`, `Question` 등)
//! - `models/`: 요청 처리 중에만 존재하는 값 (`TokenPair`, `AuthenticatedUser`, `EmailMessage`)
//!
//! 세션은 엔티티가 아닙니다. Redis 의 `session:<refresh_token>` 키 하나로만 존재하며
//! TTL 이 지나면 사라집니다.

pub mod auth;
pub mod email;
pub mod token;

pub use auth::*;
pub use email::*;
pub use token::*;
