//! 애플리케이션 설정 로더
//!
//! 설정 파일(`config/default.toml` 등) 위에 `CLOSI_` 접두사 환경 변수를 덮어써서
//! 하나의 [`AppConfig`] 값을 만듭니다. 생성된 설정은 `main` 에서 한 번 만들어
//! 각 컴포넌트 생성자로 내려보냅니다.
//!
//! ## 환경 변수 예시
//!
//! ```bash
//! CLOSI_CONFIG=config/prod              # 설정 파일 경로 (확장자 생략 가능)
//! CLOSI_HTTP__PORT=9090
//! CLOSI_MONGO__URI=mongodb://db:27017
//! CLOSI_AUTH__SIGNING_KEY=change-me
//! CLOSI_AUTH__PASSWORD_SALT=pepper
//! CLOSI_SMTP__ENABLED=true
//! CLOSI_IMGBB__API_KEY=xxxx
//! ```

use std::time::Duration;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::config::data_config::{Environment, PasswordConfig};

pub const ENV_PREFIX: &str = "CLOSI";
pub const DEFAULT_CONFIG_PATH: &str = "config/default";

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub http: HttpConfig,
    pub mongo: MongoConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub users: UserPolicyConfig,
    pub smtp: SmtpConfig,
    pub email: EmailConfig,
    pub imgbb: ImgbbConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub name: String,
    pub environment: Environment,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: "closi".to_string(),
            environment: Environment::Development,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    pub allowed_origins: Vec<String>,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
    /// 이미지 업로드 요청 바디 최대 크기 (bytes)
    pub max_upload_bytes: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: 4,
            allowed_origins: vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ],
            rate_limit_per_second: 100,
            rate_limit_burst: 200,
            max_upload_bytes: 10 * 1024 * 1024,
        }
    }
}

impl HttpConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MongoConfig {
    pub uri: String,
    pub db_name: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            db_name: "closi".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    pub url: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// 비밀번호 뒤에 붙이는 고정 솔트
    pub password_salt: String,
    pub bcrypt_cost: Option<u32>,
    /// HS256 서명 키
    pub signing_key: String,
    pub access_token_ttl_minutes: i64,
    pub refresh_token_ttl_days: u64,
    /// 리프레시 토큰 랜덤 바이트 수 (hex 문자열 길이는 두 배)
    pub refresh_token_length: usize,
    pub confirmation_ttl_hours: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            password_salt: String::new(),
            bcrypt_cost: None,
            signing_key: String::new(),
            access_token_ttl_minutes: 15,
            refresh_token_ttl_days: 30,
            refresh_token_length: 32,
            confirmation_ttl_hours: 24,
        }
    }
}

impl AuthConfig {
    pub fn refresh_token_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_token_ttl_days * 24 * 60 * 60)
    }

    pub fn confirmation_ttl(&self) -> Duration {
        Duration::from_secs(self.confirmation_ttl_hours * 60 * 60)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserPolicyConfig {
    pub default_points: i64,
    pub referral_points: i64,
    /// 추천 코드 랜덤 바이트 수
    pub referral_code_length: usize,
}

impl Default for UserPolicyConfig {
    fn default() -> Self {
        Self {
            default_points: 10,
            referral_points: 50,
            referral_code_length: 4,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SmtpConfig {
    /// false 이면 메일을 실제로 보내지 않고 로그만 남깁니다.
    pub enabled: bool,
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from: String,
}

impl Default for SmtpConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            host: "localhost".to_string(),
            port: 587,
            username: String::new(),
            password: String::new(),
            from: "Closi <noreply@closi.app>".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// 확인 메일 링크의 기본 URL, 토큰은 `?token=` 으로 붙습니다.
    pub confirmation_url: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            confirmation_url: "http://localhost:8080/api/v1/users/confirm".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImgbbConfig {
    pub api_key: String,
    pub endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for ImgbbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: "https://api.imgbb.com/1/upload".to_string(),
            timeout_seconds: 10,
        }
    }
}

impl AppConfig {
    /// `CLOSI_CONFIG`(기본값 `config/default`) 파일과 환경 변수를 합쳐 설정을 로드합니다.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(format!("{}_CONFIG", ENV_PREFIX))
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let config = Config::builder()
            .add_source(File::with_name(&path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        Self::from_config(config)
    }

    pub fn from_config(config: Config) -> Result<Self, ConfigError> {
        let app_config: AppConfig = config.try_deserialize()?;
        app_config.validate()?;
        Ok(app_config)
    }

    /// 운영 환경에서 필수 비밀값이 비어 있으면 기동을 거부합니다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.signing_key.is_empty() {
            if self.app.environment.is_production() {
                return Err(ConfigError::Message(
                    "auth.signing_key must be set in production".to_string(),
                ));
            }
            log::warn!("⚠️ auth.signing_key 가 비어 있습니다. 개발 환경에서만 허용됩니다");
        }

        if self.auth.refresh_token_length < 16 {
            return Err(ConfigError::Message(
                "auth.refresh_token_length must be at least 16 bytes".to_string(),
            ));
        }

        if self.auth.access_token_ttl_minutes <= 0 {
            return Err(ConfigError::Message(
                "auth.access_token_ttl_minutes must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bcrypt_cost(&self) -> u32 {
        PasswordConfig::resolve_cost(self.auth.bcrypt_cost, self.app.environment)
    }
}
