//! 실행 환경 및 비밀번호 해싱 설정
//!
//! 실행 환경(dev/test/staging/prod)에 따라 bcrypt cost 기본값이 달라집니다.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[serde(alias = "dev")]
    Development,
    #[serde(alias = "testing")]
    Test,
    #[serde(alias = "stage")]
    Staging,
    #[default]
    #[serde(alias = "prod")]
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

pub struct PasswordConfig;

impl PasswordConfig {
    pub const MIN_COST: u32 = 4;
    pub const MAX_COST: u32 = 15;

    /// 설정된 cost 가 허용 범위(4-15) 안이면 그대로, 아니면 환경별 기본값을 사용합니다.
    pub fn resolve_cost(configured: Option<u32>, env: Environment) -> u32 {
        match configured {
            Some(cost) if (Self::MIN_COST..=Self::MAX_COST).contains(&cost) => cost,
            Some(cost) => {
                log::warn!(
                    "⚠️ 허용 범위를 벗어난 bcrypt cost({}), 환경 기본값을 사용합니다",
                    cost
                );
                Self::bcrypt_cost_for_env(&env)
            }
            None => Self::bcrypt_cost_for_env(&env),
        }
    }

    pub fn bcrypt_cost_for_env(env: &Environment) -> u32 {
        match env {
            Environment::Development => 4,
            Environment::Test => 4,
            Environment::Staging => 10,
            Environment::Production => 12,
        }
    }
}
