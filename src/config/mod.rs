//! # Configuration Module
//!
//! 서비스 설정을 담당하는 모듈입니다.
//! 전역 싱글톤 대신 [`AppConfig`] 값을 `main` 에서 한 번 만들고,
//! 필요한 섹션만 각 컴포넌트 생성자에 넘깁니다.
//!
//! ## 모듈 구성
//!
//! - [`app_config`] - 파일 + 환경 변수 기반 설정 로더와 섹션별 타입
//! - [`data_config`] - 실행 환경 구분과 bcrypt cost 정책
//!
//! ## 우선순위
//!
//! 1. 코드에 정의된 기본값
//! 2. 설정 파일 (`CLOSI_CONFIG`, 기본 `config/default.toml`)
//! 3. `CLOSI_<SECTION>__<KEY>` 환경 변수
//! 4. `.env.<profile>` 파일은 환경 변수로 먼저 주입됩니다 (`main` 참조)

pub mod app_config;
pub mod data_config;

pub use app_config::*;
pub use data_config::*;
