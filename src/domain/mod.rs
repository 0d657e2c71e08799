//! # Domain Layer
//!
//! ```text
//! domain/
//! ├── entities/  ← MongoDB 문서 (User, Question, Answer, Tag, Country)
//! ├── models/    ← 요청 처리 중의 값 객체 (토큰, 인증 주체, 이메일)
//! └── dto/       ← HTTP 요청/응답 구조
//! ```

pub mod dto;
pub mod entities;
pub mod models;

pub use dto::*;
pub use entities::*;
pub use models::*;
