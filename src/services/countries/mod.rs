pub mod country_service;

pub use country_service::*;
