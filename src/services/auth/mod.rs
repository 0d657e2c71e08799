//! 인증 및 보안 서비스 모듈
//!
//! - [`PasswordHasher`]: bcrypt(password + salt) 해싱과 검증
//! - [`TokenManager`]: HS256 액세스 토큰 발급/검증, hex 리프레시 토큰 생성
//!
//! 둘 다 상태가 없어서 `Clone` 으로 공유합니다.

pub mod password_service;
pub mod token_service;

pub use password_service::*;
pub use token_service::*;
