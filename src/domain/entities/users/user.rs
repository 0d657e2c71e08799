//! User Entity Implementation
//!
//! 사용자 계정 문서입니다. `users` 컬렉션에 저장되며
//! `username`, `email`, `referral_code` 에 유니크 인덱스가 걸려 있습니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::settings::{Subscription, UserSettings};

pub const USER_COLLECTION: &str = "users";
pub const DEFAULT_ROLE: &str = "user";
pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    #[serde(default)]
    pub avatar_url: String,
    /// 포인트 잔액. 0 미만이 되지 않습니다.
    pub points: i64,
    #[serde(default)]
    pub favorites: Vec<ObjectId>,
    #[serde(default)]
    pub achievements: Vec<String>,
    pub referral_code: String,
    #[serde(default)]
    pub subscription: Subscription,
    #[serde(default)]
    pub settings: UserSettings,
    #[serde(default)]
    pub social_links: Vec<String>,
    #[serde(default = "default_roles")]
    pub roles: Vec<String>,
    pub is_confirmed: bool,
    #[serde(default)]
    pub is_blocked: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

fn default_roles() -> Vec<String> {
    vec![DEFAULT_ROLE.to_string()]
}

/// 가입 시 확정되는 사용자 속성
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub points: i64,
    pub referral_code: String,
    pub settings: UserSettings,
}

impl User {
    pub fn new(new_user: NewUser) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            name: new_user.name,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            avatar_url: String::new(),
            points: new_user.points,
            favorites: Vec::new(),
            achievements: Vec::new(),
            referral_code: new_user.referral_code,
            subscription: Subscription::default(),
            settings: new_user.settings,
            social_links: Vec::new(),
            roles: default_roles(),
            is_confirmed: false,
            is_blocked: false,
            created_at: now,
            updated_at: now,
        }
    }
}
