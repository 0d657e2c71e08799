//! # Data Transfer Objects
//!
//! HTTP 경계에서 주고받는 요청/응답 구조입니다. 엔티티와 달리 ObjectId 는 hex 문자열,
//! 시각은 RFC 3339 문자열로 직렬화됩니다.
//!
//! 요청 DTO 는 `validator::Validate` 를 구현하며 핸들러에서 `payload.validate()?` 로 검사합니다.

pub mod answers;
pub mod common;
pub mod countries;
pub mod images;
pub mod questions;
pub mod tags;
pub mod users;

pub use answers::*;
pub use common::*;
pub use countries::*;
pub use images::*;
pub use questions::*;
pub use tags::*;
pub use users::*;
