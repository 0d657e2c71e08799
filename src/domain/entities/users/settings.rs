//! 사용자 설정과 구독 값 객체

use chrono::{DateTime, Months, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// 지원 언어. 알 수 없는 값은 영어로 처리합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Uk,
    De,
    Pl,
    Ru,
}

impl Language {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "uk" => Language::Uk,
            "de" => Language::De,
            "pl" => Language::Pl,
            "ru" => Language::Ru,
            _ => Language::En,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Uk => "uk",
            Language::De => "de",
            Language::Pl => "pl",
            Language::Ru => "ru",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    Dark,
    #[default]
    Light,
}

impl Appearance {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "dark" => Appearance::Dark,
            _ => Appearance::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Appearance::Dark => "dark",
            Appearance::Light => "light",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSettings {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub country_id: Option<ObjectId>,
    pub language: Language,
    pub appearance: Appearance,
    pub email_notifications: bool,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            country_id: None,
            language: Language::En,
            appearance: Appearance::Light,
            email_notifications: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionType {
    #[default]
    Free,
    Monthly,
    Quarterly,
    Annual,
}

/// 구독 정보. 무료 구독은 만료되지 않습니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(rename = "type")]
    pub kind: SubscriptionType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expires_at: Option<bson::DateTime>,
}

impl Default for Subscription {
    fn default() -> Self {
        Self::new(SubscriptionType::Free, Utc::now())
    }
}

impl Subscription {
    /// `now` 기준으로 구독 종류에 맞는 만료 시각을 계산합니다.
    pub fn new(kind: SubscriptionType, now: DateTime<Utc>) -> Self {
        let months = match kind {
            SubscriptionType::Free => None,
            SubscriptionType::Monthly => Some(1),
            SubscriptionType::Quarterly => Some(3),
            SubscriptionType::Annual => Some(12),
        };

        let expires_at = months
            .and_then(|m| now.checked_add_months(Months::new(m)))
            .map(|expires_at| bson::DateTime::from_millis(expires_at.timestamp_millis()));

        Self { kind, expires_at }
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        if self.kind == SubscriptionType::Free {
            return true;
        }

        self.expires_at
            .map(|expires_at| now.timestamp_millis() < expires_at.timestamp_millis())
            .unwrap_or(false)
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    #[test]
    fn test_language_parse_defaults_to_english() {
        assert_eq!(Language::parse("uk"), Language::Uk);
        assert_eq!(Language::parse("DE"), Language::De);
        assert_eq!(Language::parse("fr"), Language::En);
        assert_eq!(Language::parse(""), Language::En);
    }

    #[test]
    fn test_appearance_parse_defaults_to_light() {
        assert_eq!(Appearance::parse("dark"), Appearance::Dark);
        assert_eq!(Appearance::parse("neon"), Appearance::Light);
    }

    #[test]
    fn test_free_subscription_never_expires() {
        let now = Utc.with_ymd_and_hms(2024, 1, 31, 12, 0, 0).unwrap();
        let subscription = Subscription::new(SubscriptionType::Free, now);

        assert!(subscription.expires_at.is_none());
        assert!(subscription.is_active_at(now + Duration::days(10_000)));
    }

    #[test]
    fn test_paid_subscription_expiry() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();

        let monthly = Subscription::new(SubscriptionType::Monthly, now);
        assert!(monthly.is_active_at(now + Duration::days(30)));
        assert!(!monthly.is_active_at(now + Duration::days(32)));

        let quarterly = Subscription::new(SubscriptionType::Quarterly, now);
        assert!(quarterly.is_active_at(now + Duration::days(80)));
        assert!(!quarterly.is_active_at(now + Duration::days(92)));

        let annual = Subscription::new(SubscriptionType::Annual, now);
        assert!(annual.is_active_at(now + Duration::days(360)));
        assert!(!annual.is_active_at(now + Duration::days(367)));
    }
}
