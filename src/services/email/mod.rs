//! 이메일 발송 서비스 모듈

pub mod email_service;

pub use email_service::*;
