pub mod question_repo;

pub use question_repo::*;
