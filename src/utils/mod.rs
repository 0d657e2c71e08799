//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 문자열 정리, ObjectId 파싱
//! - [`random`] - 리프레시 토큰/추천 코드용 난수 hex
//! - [`display_terminal`] - 기동 단계 터미널 출력

pub mod display_terminal;
pub mod random;
pub mod string_utils;
