//! 테스트 전용 인메모리 구현
//!
//! MongoDB/Redis/SMTP 없이 서비스와 핸들러를 끝까지 돌려 보기 위한 저장소들입니다.
//! 유니크 제약, 포인트 하한, 집합 연산은 운영 구현과 같은 결과를 내도록 맞춰 두었습니다.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Duration as ChronoDuration;
use mongodb::bson::oid::ObjectId;

use crate::config::AppConfig;
use crate::core::errors::{AppError, Resource};
use crate::core::state::AppState;
use crate::domain::entities::users::{Language, User};
use crate::domain::models::email::EmailMessage;
use crate::repositories::answers::MockAnswerRepository;
use crate::repositories::countries::MockCountryRepository;
use crate::repositories::images::MockImageHost;
use crate::repositories::questions::MockQuestionRepository;
use crate::repositories::sessions::SessionStore;
use crate::repositories::tags::MockTagRepository;
use crate::repositories::users::{UserChanges, UserFlag, UserRepository};
use crate::services::auth::{PasswordHasher, TokenManager};
use crate::services::email::EmailSender;
use crate::services::users::{UserPolicy, UserService};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn get(&self, id: ObjectId) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.id == Some(id))
            .cloned()
    }

    pub fn by_username(&self, username: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.username == username)
            .cloned()
    }

    pub fn grant_role(&self, username: &str, role: &str) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|user| user.username == username) {
            user.roles.push(role.to_string());
        }
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    fn modify<F>(&self, id: ObjectId, f: F) -> Result<User, AppError>
    where
        F: FnOnce(&mut User) -> Result<(), AppError>,
    {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|user| user.id == Some(id))
            .ok_or(AppError::NotFound(Resource::User))?;

        f(user)?;
        Ok(user.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, mut user: User) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.username == user.username || u.email == user.email)
        {
            return Err(AppError::AlreadyExists("username or email".to_string()));
        }

        user.id = Some(ObjectId::new());
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.get(id))
    }

    async fn find_by_username_or_email(&self, login: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.username == login || user.email == login)
            .cloned())
    }

    async fn find_by_referral_code(&self, code: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.referral_code == code)
            .cloned())
    }

    async fn update(&self, id: ObjectId, changes: UserChanges) -> Result<User, AppError> {
        let taken = {
            let users = self.users.lock().unwrap();
            users.iter().any(|u| {
                u.id != Some(id)
                    && (changes.username.as_deref() == Some(u.username.as_str())
                        || changes.email.as_deref() == Some(u.email.as_str()))
            })
        };
        if taken {
            return Err(AppError::AlreadyExists("username or email".to_string()));
        }

        self.modify(id, |user| {
            if let Some(name) = changes.name {
                user.name = name;
            }
            if let Some(username) = changes.username {
                user.username = username;
            }
            if let Some(email) = changes.email {
                user.email = email;
                user.is_confirmed = false;
            }
            if let Some(password_hash) = changes.password_hash {
                user.password_hash = password_hash;
            }
            if let Some(avatar_url) = changes.avatar_url {
                user.avatar_url = avatar_url;
            }
            if let Some(social_links) = changes.social_links {
                user.social_links = social_links;
            }
            if let Some(country_id) = changes.country_id {
                user.settings.country_id = Some(country_id);
            }
            if let Some(language) = changes.language {
                user.settings.language = language;
            }
            if let Some(appearance) = changes.appearance {
                user.settings.appearance = appearance;
            }
            if let Some(email_notifications) = changes.email_notifications {
                user.settings.email_notifications = email_notifications;
            }
            Ok(())
        })
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|user| user.id != Some(id));
        Ok(users.len() < before)
    }

    async fn adjust_points(&self, id: ObjectId, delta: i64) -> Result<User, AppError> {
        self.modify(id, |user| {
            if user.points + delta < 0 {
                return Err(AppError::InsufficientPoints);
            }
            user.points += delta;
            Ok(())
        })
    }

    async fn add_favorite(&self, id: ObjectId, question_id: ObjectId) -> Result<User, AppError> {
        self.modify(id, |user| {
            if !user.favorites.contains(&question_id) {
                user.favorites.push(question_id);
            }
            Ok(())
        })
    }

    async fn remove_favorite(&self, id: ObjectId, question_id: ObjectId) -> Result<User, AppError> {
        self.modify(id, |user| {
            user.favorites.retain(|favorite| *favorite != question_id);
            Ok(())
        })
    }

    async fn add_achievement(&self, id: ObjectId, achievement: String) -> Result<User, AppError> {
        self.modify(id, |user| {
            if !user.achievements.contains(&achievement) {
                user.achievements.push(achievement);
            }
            Ok(())
        })
    }

    async fn remove_achievement(
        &self,
        id: ObjectId,
        achievement: String,
    ) -> Result<User, AppError> {
        self.modify(id, |user| {
            user.achievements.retain(|a| *a != achievement);
            Ok(())
        })
    }

    async fn set_flag(&self, id: ObjectId, flag: UserFlag, value: bool) -> Result<User, AppError> {
        self.modify(id, |user| {
            match flag {
                UserFlag::Confirmed => user.is_confirmed = value,
                UserFlag::Blocked => user.is_blocked = value,
            }
            Ok(())
        })
    }
}

/// TTL 은 기록만 하고 만료시키지 않습니다.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<String, ObjectId>>,
    confirmations: Mutex<HashMap<String, ObjectId>>,
}

impl InMemorySessionStore {
    pub fn session_count(&self) -> usize {
        self.sessions.lock().unwrap().len()
    }

    pub fn has_session(&self, refresh_token: &str) -> bool {
        self.sessions.lock().unwrap().contains_key(refresh_token)
    }

    pub fn confirmation_tokens(&self) -> Vec<String> {
        self.confirmations.lock().unwrap().keys().cloned().collect()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create_session(
        &self,
        refresh_token: &str,
        user_id: ObjectId,
        _ttl: Duration,
    ) -> Result<(), AppError> {
        self.sessions
            .lock()
            .unwrap()
            .insert(refresh_token.to_string(), user_id);
        Ok(())
    }

    async fn take_session(&self, refresh_token: &str) -> Result<Option<ObjectId>, AppError> {
        Ok(self.sessions.lock().unwrap().remove(refresh_token))
    }

    async fn delete_session(&self, refresh_token: &str) -> Result<(), AppError> {
        self.sessions.lock().unwrap().remove(refresh_token);
        Ok(())
    }

    async fn create_confirmation(
        &self,
        token: &str,
        user_id: ObjectId,
        _ttl: Duration,
    ) -> Result<(), AppError> {
        self.confirmations
            .lock()
            .unwrap()
            .insert(token.to_string(), user_id);
        Ok(())
    }

    async fn take_confirmation(&self, token: &str) -> Result<Option<ObjectId>, AppError> {
        Ok(self.confirmations.lock().unwrap().remove(token))
    }
}

/// 보낸 메일을 `(수신자, 종류)` 로 기록합니다. `failing()` 은 항상 실패합니다.
#[derive(Default)]
pub struct RecordingEmailSender {
    sent: Mutex<Vec<(String, &'static str)>>,
    fail: bool,
}

impl RecordingEmailSender {
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn sent(&self) -> Vec<(String, &'static str)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    async fn send(
        &self,
        to: String,
        message: EmailMessage,
        _language: Language,
    ) -> Result<(), AppError> {
        if self.fail {
            return Err(AppError::ExternalServiceError("smtp unavailable".to_string()));
        }
        self.sent.lock().unwrap().push((to, message.kind()));
        Ok(())
    }
}

pub fn test_policy() -> UserPolicy {
    UserPolicy {
        default_points: 10,
        referral_points: 50,
        referral_code_length: 4,
        refresh_token_ttl: Duration::from_secs(30 * 24 * 60 * 60),
        confirmation_ttl: Duration::from_secs(24 * 60 * 60),
        confirmation_url: "http://localhost:8080/api/v1/users/confirm".to_string(),
    }
}

pub fn test_token_manager() -> TokenManager {
    TokenManager::new("test-signing-key", ChronoDuration::minutes(15), 32)
}

/// 인메모리 저장소로 조립한 사용자 서비스와 각 저장소 핸들
pub struct UserFixture {
    pub service: Arc<UserService>,
    pub users: Arc<InMemoryUserRepository>,
    pub sessions: Arc<InMemorySessionStore>,
    pub emails: Arc<RecordingEmailSender>,
}

impl UserFixture {
    pub fn new() -> Self {
        Self::with_email_sender(RecordingEmailSender::default())
    }

    pub fn with_email_sender(sender: RecordingEmailSender) -> Self {
        let users = Arc::new(InMemoryUserRepository::default());
        let sessions = Arc::new(InMemorySessionStore::default());
        let emails = Arc::new(sender);

        let service = Arc::new(UserService::new(
            users.clone(),
            sessions.clone(),
            emails.clone(),
            PasswordHasher::new("pepper", 4),
            test_token_manager(),
            test_policy(),
        ));

        Self {
            service,
            users,
            sessions,
            emails,
        }
    }
}

/// 사용자 흐름 외 리포지토리는 빈 mock 으로 채운 앱 상태.
/// 호출되면 mockall 이 패닉하므로 사용자 API 테스트에만 씁니다.
pub fn user_only_state(fixture: &UserFixture) -> AppState {
    AppState::from_parts(
        AppConfig::default(),
        fixture.service.clone(),
        Arc::new(MockQuestionRepository::new()),
        Arc::new(MockAnswerRepository::new()),
        Arc::new(MockTagRepository::new()),
        Arc::new(MockCountryRepository::new()),
        Arc::new(MockImageHost::new()),
    )
}
