//! # 세션 저장소
//!
//! 리프레시 토큰과 이메일 확인 토큰을 Redis 에 TTL 과 함께 저장합니다.
//!
//! | 키 | 값 | TTL |
//! |----|----|-----|
//! | `session:<refresh_token>` | 사용자 ObjectId hex | `auth.refresh_token_ttl_days` |
//! | `confirmation:<token>` | 사용자 ObjectId hex | `auth.confirmation_ttl_hours` |
//!
//! 만료는 Redis TTL 에만 맡깁니다. 같은 키로 다시 쓰면 조건 없이 덮어씁니다.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::caching::redis::RedisClient;
use crate::core::errors::AppError;

const SESSION_PREFIX: &str = "session:";
const CONFIRMATION_PREFIX: &str = "confirmation:";

pub fn session_key(refresh_token: &str) -> String {
    format!("{}{}", SESSION_PREFIX, refresh_token)
}

pub fn confirmation_key(token: &str) -> String {
    format!("{}{}", CONFIRMATION_PREFIX, token)
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create_session(
        &self,
        refresh_token: &str,
        user_id: ObjectId,
        ttl: Duration,
    ) -> Result<(), AppError>;

    /// 세션을 읽으면서 지웁니다(GETDEL). 없거나 만료되었거나 이미 소비되었으면 `None`.
    async fn take_session(&self, refresh_token: &str) -> Result<Option<ObjectId>, AppError>;

    async fn delete_session(&self, refresh_token: &str) -> Result<(), AppError>;

    async fn create_confirmation(
        &self,
        token: &str,
        user_id: ObjectId,
        ttl: Duration,
    ) -> Result<(), AppError>;

    /// 확인 토큰을 한 번만 소비합니다. 두 번째 호출은 `None`.
    async fn take_confirmation(&self, token: &str) -> Result<Option<ObjectId>, AppError>;
}

pub struct RedisSessionStore {
    redis: RedisClient,
}

impl RedisSessionStore {
    pub fn new(redis: RedisClient) -> Self {
        Self { redis }
    }
}

/// Redis SETEX 는 0 초를 거부하므로 최소 1초로 맞춥니다.
fn ttl_seconds(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

fn parse_user_id(value: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(value)
        .map_err(|e| AppError::RedisError(format!("세션 값이 올바른 ObjectId 가 아닙니다: {}", e)))
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn create_session(
        &self,
        refresh_token: &str,
        user_id: ObjectId,
        ttl: Duration,
    ) -> Result<(), AppError> {
        self.redis
            .set_with_expiry(&session_key(refresh_token), &user_id.to_hex(), ttl_seconds(ttl))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    async fn take_session(&self, refresh_token: &str) -> Result<Option<ObjectId>, AppError> {
        self.redis
            .take(&session_key(refresh_token))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?
            .map(|value| parse_user_id(&value))
            .transpose()
    }

    async fn delete_session(&self, refresh_token: &str) -> Result<(), AppError> {
        self.redis
            .del(&session_key(refresh_token))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    async fn create_confirmation(
        &self,
        token: &str,
        user_id: ObjectId,
        ttl: Duration,
    ) -> Result<(), AppError> {
        self.redis
            .set_with_expiry(&confirmation_key(token), &user_id.to_hex(), ttl_seconds(ttl))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))
    }

    async fn take_confirmation(&self, token: &str) -> Result<Option<ObjectId>, AppError> {
        self.redis
            .take(&confirmation_key(token))
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?
            .map(|value| parse_user_id(&value))
            .transpose()
    }
}
