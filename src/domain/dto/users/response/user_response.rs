use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::dto::common::{hex_id, hex_ids, to_utc};
use crate::domain::entities::users::{
    Appearance, Language, Subscription, SubscriptionType, User, UserSettings,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    #[serde(rename = "type")]
    pub kind: SubscriptionType,
    pub expires_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

impl From<&Subscription> for SubscriptionResponse {
    fn from(subscription: &Subscription) -> Self {
        Self {
            kind: subscription.kind,
            expires_at: subscription.expires_at.map(to_utc),
            is_active: subscription.is_active(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsResponse {
    pub country_id: Option<String>,
    pub language: Language,
    pub appearance: Appearance,
    pub email_notifications: bool,
}

impl From<&UserSettings> for SettingsResponse {
    fn from(settings: &UserSettings) -> Self {
        Self {
            country_id: settings.country_id.map(|id| id.to_hex()),
            language: settings.language,
            appearance: settings.appearance,
            email_notifications: settings.email_notifications,
        }
    }
}

/// 본인 계정 응답. 비밀번호 해시는 포함하지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub username: String,
    pub email: String,
    pub avatar_url: String,
    pub points: i64,
    pub favorites: Vec<String>,
    pub achievements: Vec<String>,
    pub referral_code: String,
    pub subscription: SubscriptionResponse,
    pub settings: SettingsResponse,
    pub social_links: Vec<String>,
    pub roles: Vec<String>,
    pub is_confirmed: bool,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        let subscription = SubscriptionResponse::from(&user.subscription);
        let settings = SettingsResponse::from(&user.settings);
        let favorites = hex_ids(&user.favorites);

        let User {
            id,
            name,
            username,
            email,
            avatar_url,
            points,
            achievements,
            referral_code,
            social_links,
            roles,
            is_confirmed,
            is_blocked,
            created_at,
            updated_at,
            ..
        } = user;

        Self {
            id: hex_id(id),
            name,
            username,
            email,
            avatar_url,
            points,
            favorites,
            achievements,
            referral_code,
            subscription,
            settings,
            social_links,
            roles,
            is_confirmed,
            is_blocked,
            created_at: to_utc(created_at),
            updated_at: to_utc(updated_at),
        }
    }
}

/// 다른 사용자가 보는 공개 프로필
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUserResponse {
    pub id: String,
    pub name: String,
    pub username: String,
    pub avatar_url: String,
    pub points: i64,
    pub achievements: Vec<String>,
    pub social_links: Vec<String>,
    pub is_confirmed: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUserResponse {
    fn from(user: User) -> Self {
        Self {
            id: hex_id(user.id),
            name: user.name,
            username: user.username,
            avatar_url: user.avatar_url,
            points: user.points,
            achievements: user.achievements,
            social_links: user.social_links,
            is_confirmed: user.is_confirmed,
            created_at: to_utc(user.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::NewUser;
    use mongodb::bson::oid::ObjectId;

    fn user() -> User {
        let mut user = User::new(NewUser {
            name: "Alice".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$2b$04$secret".to_string(),
            points: 10,
            referral_code: "A1B2C3D4".to_string(),
            settings: UserSettings::default(),
        });
        user.id = Some(ObjectId::new());
        user
    }

    #[test]
    fn test_user_response_hides_password_hash() {
        let response = UserResponse::from(user());
        let json = serde_json::to_value(&response).unwrap();

        assert!(json.get("password_hash").is_none());
        assert_eq!(json["points"], 10);
        assert_eq!(json["is_confirmed"], false);
        assert_eq!(json["subscription"]["type"], "free");
        assert_eq!(json["settings"]["language"], "en");
    }

    #[test]
    fn test_public_response_hides_email() {
        let json = serde_json::to_value(PublicUserResponse::from(user())).unwrap();

        assert!(json.get("email").is_none());
        assert!(json.get("referral_code").is_none());
        assert_eq!(json["username"], "alice");
    }
}
