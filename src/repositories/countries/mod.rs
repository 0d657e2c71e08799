pub mod country_repo;

pub use country_repo::*;
