//! 캐싱 계층 모듈
//!
//! Redis 를 TTL 기반 키-값 저장소로 사용합니다.
//! 세션 저장소([`crate::repositories::sessions`])가 이 클라이언트 위에 구현됩니다.
//!
//! ```toml
//! [redis]
//! url = "redis://localhost:6379"
//! ```

pub mod redis;
