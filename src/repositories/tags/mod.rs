pub mod tag_repo;

pub use tag_repo::*;
