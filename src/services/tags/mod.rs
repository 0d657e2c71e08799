pub mod tag_service;

pub use tag_service::*;
