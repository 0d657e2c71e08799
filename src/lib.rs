//! Closi 백엔드
//!
//! 국가별 Q&A 커뮤니티의 REST API 서버입니다. 계정과 세션 수명주기를 중심으로
//! 질문, 답변, 태그, 국가, 이미지 업로드를 제공합니다.
//!
//! # Features
//!
//! - **계정**: 가입(추천 보너스, 환영/확인 메일), 로그인, 프로필 수정, 탈퇴
//! - **세션**: HS256 액세스 토큰 + Redis 에 저장되는 불투명 리프레시 토큰
//! - **포인트**: 0 미만으로 내려가지 않는 잔액, 답변 채택 시 질문 포인트 이전
//! - **관리자**: 포인트 조정, 업적, 확인/차단
//! - **콘텐츠**: 질문/답변/태그/국가 CRUD, imgbb 이미지 업로드
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← /api/v1, AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← DTO 검증, 응답 변환
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 규칙 (AppState 로 조립)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← trait 뒤의 MongoDB / Redis / imgbb 구현
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use closi_backend::config::AppConfig;
//! use closi_backend::core::AppState;
//!
//! let config = AppConfig::load()?;
//! let state = AppState::build(config).await?;
//! let tokens = state.users.sign_in(request).await?;
//! ```

pub mod caching;
pub mod config;
pub mod core;
pub mod db;
pub mod domain;
pub mod handlers;
pub mod middlewares;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod utils;

#[cfg(test)]
mod test_support;
