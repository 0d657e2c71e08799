//! 도메인 엔티티
//!
//! MongoDB 컬렉션에 저장되는 문서 타입들입니다.

pub mod answers;
pub mod countries;
pub mod questions;
pub mod tags;
pub mod users;

pub use answers::*;
pub use countries::*;
pub use questions::*;
pub use tags::*;
pub use users::*;
