//! 사용자 계정 서비스 모듈
//!
//! 가입/로그인/토큰 갱신과 계정 변경(프로필, 포인트, 즐겨찾기, 업적, 관리자 플래그)을
//! 담당하는 [`UserService`] 를 제공합니다.

pub mod user_service;

pub use user_service::*;
