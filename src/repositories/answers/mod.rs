pub mod answer_repo;

pub use answer_repo::*;
