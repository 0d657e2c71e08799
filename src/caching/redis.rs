//! # Redis 클라이언트
//!
//! 세션(리프레시 토큰)과 이메일 확인 토큰처럼 TTL 로 자동 만료되는
//! 짧은 수명의 문자열 값을 저장합니다.
//!
//! ## 연결 관리
//!
//! 멀티플렉싱 연결을 사용하여 단일 TCP 연결에서 여러 동시 요청을 처리합니다.

use redis::{AsyncCommands, Client};

use crate::config::RedisConfig;

/// Redis 클라이언트 래퍼
///
/// 값은 가공 없이 문자열 그대로 저장합니다. 예를 들어 세션 키
/// `session:<refresh_token>` 의 값은 사용자 ObjectId 의 hex 문자열입니다.
///
/// ```rust,ignore
/// let redis = RedisClient::new(&config.redis).await?;
/// redis.set_with_expiry("session:abcd", "64f0c2...", 3600).await?;
/// let user_id: Option<String> = redis.take("session:abcd").await?;
/// ```
#[derive(Clone)]
pub struct RedisClient {
    client: Client,
}

impl RedisClient {
    /// 새 클라이언트를 만들고 PING 으로 연결을 확인합니다.
    pub async fn new(config: &RedisConfig) -> Result<Self, redis::RedisError> {
        let client = Client::open(config.url.as_str())?;

        let mut conn = client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<()>(&mut conn).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { client })
    }

    /// 만료 시간(초)과 함께 값을 저장합니다. 기존 키는 덮어씁니다.
    pub async fn set_with_expiry(
        &self,
        key: &str,
        value: &str,
        seconds: u64,
    ) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set_ex(key, value, seconds).await
    }

    /// 값을 읽고 같은 명령(GETDEL)으로 삭제합니다. 없거나 만료된 경우 `None`.
    pub async fn take(&self, key: &str) -> Result<Option<String>, redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.get_del(key).await
    }

    /// 키를 삭제합니다. 키가 없어도 성공으로 처리합니다.
    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del(key).await
    }
}
