//! # 사용자 계정 서비스 구현
//!
//! 계정의 생명주기(가입, 로그인, 토큰 갱신, 프로필 수정, 포인트/즐겨찾기, 관리자 플래그)를
//! 담당합니다.
//!
//! ## 서비스 구성
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                          UserService                         │
//! ├──────────────────────────────────────────────────────────────┤
//! │  UserRepository   ← 사용자 문서 (MongoDB)                      │
//! │  SessionStore     ← session:<refresh>, confirmation:<token>   │
//! │  EmailSender      ← 환영/확인 메일                              │
//! │  PasswordHasher   ← bcrypt(password + salt)                   │
//! │  TokenManager     ← HS256 액세스 토큰 + hex 리프레시 토큰          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 가입 순서
//!
//! 각 단계는 독립적이며 트랜잭션으로 묶이지 않습니다.
//!
//! 1. 비밀번호 해싱, 추천 코드 생성
//! 2. 사용자 문서 저장 (중복이면 `AlreadyExists`, 세션은 만들어지지 않음)
//! 3. 추천 보너스 지급. 실패는 로그만 남기고 가입은 계속됩니다.
//! 4. 환영/확인 메일 발송. 실패하면 가입 요청이 실패합니다.
//! 5. 세션 생성 후 토큰 쌍 반환

use std::sync::Arc;
use std::time::Duration;

use mongodb::bson::oid::ObjectId;

use crate::config::AppConfig;
use crate::core::errors::{AppError, Resource};
use crate::domain::dto::users::request::{SignInRequest, SignUpRequest, UpdateUserRequest};
use crate::domain::entities::users::{Appearance, Language, NewUser, User, UserSettings};
use crate::domain::models::email::EmailMessage;
use crate::domain::models::token::TokenPair;
use crate::repositories::sessions::SessionStore;
use crate::repositories::users::{UserChanges, UserFlag, UserRepository};
use crate::services::auth::{PasswordHasher, TokenManager};
use crate::services::email::EmailSender;
use crate::utils::random::{random_hex, referral_code};
use crate::utils::string_utils::{clean_optional_string, parse_optional_object_id};

const CONFIRMATION_TOKEN_BYTES: usize = 32;

/// 계정 정책 값
#[derive(Debug, Clone)]
pub struct UserPolicy {
    /// 가입 시 기본 포인트
    pub default_points: i64,
    /// 추천인과 신규 가입자 양쪽에 주는 보너스
    pub referral_points: i64,
    pub referral_code_length: usize,
    pub refresh_token_ttl: Duration,
    pub confirmation_ttl: Duration,
    pub confirmation_url: String,
}

impl UserPolicy {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            default_points: config.users.default_points,
            referral_points: config.users.referral_points,
            referral_code_length: config.users.referral_code_length,
            refresh_token_ttl: config.auth.refresh_token_ttl(),
            confirmation_ttl: config.auth.confirmation_ttl(),
            confirmation_url: config.email.confirmation_url.clone(),
        }
    }
}

/// 사용자 계정 비즈니스 로직 서비스
pub struct UserService {
    users: Arc<dyn UserRepository>,
    sessions: Arc<dyn SessionStore>,
    email: Arc<dyn EmailSender>,
    hasher: PasswordHasher,
    tokens: TokenManager,
    policy: UserPolicy,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn user_id(user: &User) -> Result<ObjectId, AppError> {
    user.id
        .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        sessions: Arc<dyn SessionStore>,
        email: Arc<dyn EmailSender>,
        hasher: PasswordHasher,
        tokens: TokenManager,
        policy: UserPolicy,
    ) -> Self {
        Self {
            users,
            sessions,
            email,
            hasher,
            tokens,
            policy,
        }
    }

    /// 새 계정 생성 후 토큰 쌍 발급
    ///
    /// # Errors
    ///
    /// * `AppError::AlreadyExists` - 사용자명 또는 이메일 중복
    /// * `AppError::ValidationError` - 잘못된 국가 ID
    /// * `AppError::ExternalServiceError` - 메일 발송 실패
    pub async fn sign_up(&self, request: SignUpRequest) -> Result<TokenPair, AppError> {
        let start_time = std::time::Instant::now();

        let country_id = parse_optional_object_id(request.country_id.as_deref(), "country_id")?;
        let language = request
            .language
            .as_deref()
            .map(Language::parse)
            .unwrap_or_default();

        let password_hash = self.hasher.hash(&request.password)?;

        let user = User::new(NewUser {
            name: request.name.trim().to_string(),
            username: request.username.trim().to_string(),
            email: normalize_email(&request.email),
            password_hash,
            points: self.policy.default_points,
            referral_code: referral_code(self.policy.referral_code_length),
            settings: UserSettings {
                country_id,
                language,
                ..UserSettings::default()
            },
        });

        let mut user = self.users.create(user).await?;
        let id = user_id(&user)?;
        log::info!("👤 새 사용자 가입: {} ({})", user.username, id);

        if let Some(code) = clean_optional_string(request.referral_code) {
            if let Some(points) = self.apply_referral(&code, id).await {
                user.points = points;
            }
        }

        self.email
            .send(
                user.email.clone(),
                EmailMessage::Welcome {
                    name: user.name.clone(),
                },
                language,
            )
            .await?;
        self.send_confirmation(&user).await?;

        let tokens = self.create_session(id).await?;

        log::info!("Total sign-up took: {:?}", start_time.elapsed());
        Ok(tokens)
    }

    /// 추천 코드가 다른 사용자의 것이면 양쪽에 보너스를 줍니다.
    /// 신규 사용자의 갱신된 포인트를 돌려주며, 어떤 실패도 가입을 막지 않습니다.
    async fn apply_referral(&self, code: &str, new_user_id: ObjectId) -> Option<i64> {
        let code = code.to_uppercase();
        let referrer = match self.users.find_by_referral_code(&code).await {
            Ok(Some(referrer)) if referrer.id != Some(new_user_id) => referrer,
            Ok(_) => {
                log::info!("알 수 없는 추천 코드: {}", code);
                return None;
            }
            Err(e) => {
                log::warn!("⚠️ 추천 코드 조회 실패: {}", e);
                return None;
            }
        };

        let bonus = self.policy.referral_points;

        if let Some(referrer_id) = referrer.id {
            if let Err(e) = self.users.adjust_points(referrer_id, bonus).await {
                log::warn!("⚠️ 추천인 보너스 지급 실패 ({}): {}", referrer_id, e);
            }
        }

        match self.users.adjust_points(new_user_id, bonus).await {
            Ok(user) => {
                log::info!("🎁 추천 보너스 지급: {} → {}", referrer.username, new_user_id);
                Some(user.points)
            }
            Err(e) => {
                log::warn!("⚠️ 신규 사용자 보너스 지급 실패 ({}): {}", new_user_id, e);
                None
            }
        }
    }

    /// 사용자명 또는 이메일로 로그인
    ///
    /// 사용자가 없을 때와 비밀번호가 틀렸을 때 모두 `NotFound(User)` 입니다.
    pub async fn sign_in(&self, request: SignInRequest) -> Result<TokenPair, AppError> {
        let login = request.username_or_email.trim();
        let login = if login.contains('@') {
            normalize_email(login)
        } else {
            login.to_string()
        };

        let user = self
            .users
            .find_by_username_or_email(&login)
            .await?
            .ok_or(AppError::NotFound(Resource::User))?;

        if !self.hasher.check(&user.password_hash, &request.password) {
            log::debug!("비밀번호 불일치: {}", login);
            return Err(AppError::NotFound(Resource::User));
        }

        if user.is_blocked {
            log::warn!("🚫 차단된 사용자 로그인 시도: {}", user.username);
            return Err(AppError::Blocked);
        }

        self.create_session(user_id(&user)?).await
    }

    /// 리프레시 토큰의 세션을 소비하고 새 토큰 쌍을 발급합니다.
    ///
    /// 세션은 읽는 명령과 같은 명령(GETDEL)으로 지워지므로 같은 토큰으로 동시에 들어온
    /// 갱신 요청 중 하나만 성공합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 없거나 만료된(또는 이미 쓰인) 리프레시 토큰, 삭제된 사용자
    /// * `AppError::Blocked` - 차단된 사용자
    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let id = self
            .sessions
            .take_session(refresh_token)
            .await?
            .ok_or_else(|| {
                AppError::AuthenticationError("세션이 없거나 만료되었습니다".to_string())
            })?;

        let user = self.users.find_by_id(id).await?.ok_or_else(|| {
            AppError::AuthenticationError("세션의 사용자가 존재하지 않습니다".to_string())
        })?;
        if user.is_blocked {
            return Err(AppError::Blocked);
        }

        self.create_session(id).await
    }

    /// 해당 리프레시 토큰의 세션만 지웁니다. 없는 토큰이어도 성공입니다.
    pub async fn sign_out(&self, refresh_token: &str) -> Result<(), AppError> {
        self.sessions.delete_session(refresh_token).await
    }

    async fn create_session(&self, id: ObjectId) -> Result<TokenPair, AppError> {
        let tokens = self.tokens.issue(id)?;
        self.sessions
            .create_session(&tokens.refresh_token, id, self.policy.refresh_token_ttl)
            .await?;

        Ok(tokens)
    }

    /// 액세스 토큰의 주인을 불러옵니다. 인증 미들웨어가 사용합니다.
    pub async fn authenticate(&self, access_token: &str) -> Result<User, AppError> {
        let id = self.tokens.parse(access_token)?;

        let user = self.users.find_by_id(id).await?.ok_or_else(|| {
            AppError::AuthenticationError("토큰의 사용자가 존재하지 않습니다".to_string())
        })?;
        if user.is_blocked {
            return Err(AppError::Blocked);
        }

        Ok(user)
    }

    pub async fn get_by_id(&self, id: ObjectId) -> Result<User, AppError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Resource::User))
    }

    /// 부분 수정. 비어 있는 필드는 그대로 둡니다.
    /// 이메일이 실제로 바뀌면 확인 상태가 초기화되고 새 주소로 확인 메일을 보냅니다.
    pub async fn update(&self, id: ObjectId, request: UpdateUserRequest) -> Result<User, AppError> {
        let current = self.get_by_id(id).await?;

        let email = request
            .email
            .as_deref()
            .map(normalize_email)
            .filter(|email| *email != current.email);
        let email_changed = email.is_some();

        let password_hash = match request.password.as_deref() {
            Some(password) => Some(self.hasher.hash(password)?),
            None => None,
        };

        let changes = UserChanges {
            name: request.name,
            username: request.username,
            email,
            password_hash,
            avatar_url: request.avatar_url,
            social_links: request.social_links,
            country_id: parse_optional_object_id(request.country_id.as_deref(), "country_id")?,
            language: request.language.as_deref().map(Language::parse),
            appearance: request.appearance.as_deref().map(Appearance::parse),
            email_notifications: request.email_notifications,
        };

        if changes.is_empty() {
            return Ok(current);
        }

        let updated = self.users.update(id, changes).await?;

        if email_changed {
            log::info!("✉️ 이메일 변경, 확인 상태 초기화: {}", id);
            self.send_confirmation(&updated).await?;
        }

        Ok(updated)
    }

    pub async fn delete(&self, id: ObjectId) -> Result<(), AppError> {
        if !self.users.delete(id).await? {
            return Err(AppError::NotFound(Resource::User));
        }

        log::info!("🗑️ 사용자 삭제: {}", id);
        Ok(())
    }

    /// 포인트 가감. 잔액이 음수가 되면 `InsufficientPoints` 이고 저장값은 바뀌지 않습니다.
    pub async fn adjust_points(&self, id: ObjectId, delta: i64) -> Result<User, AppError> {
        self.users.adjust_points(id, delta).await
    }

    pub async fn add_favorite(&self, id: ObjectId, question_id: ObjectId) -> Result<User, AppError> {
        self.users.add_favorite(id, question_id).await
    }

    pub async fn remove_favorite(
        &self,
        id: ObjectId,
        question_id: ObjectId,
    ) -> Result<User, AppError> {
        self.users.remove_favorite(id, question_id).await
    }

    pub async fn add_achievement(&self, id: ObjectId, achievement: String) -> Result<User, AppError> {
        self.users.add_achievement(id, achievement).await
    }

    pub async fn remove_achievement(
        &self,
        id: ObjectId,
        achievement: String,
    ) -> Result<User, AppError> {
        self.users.remove_achievement(id, achievement).await
    }

    pub async fn confirm(&self, id: ObjectId) -> Result<User, AppError> {
        self.users.set_flag(id, UserFlag::Confirmed, true).await
    }

    pub async fn block(&self, id: ObjectId) -> Result<User, AppError> {
        log::warn!("🚫 사용자 차단: {}", id);
        self.users.set_flag(id, UserFlag::Blocked, true).await
    }

    pub async fn unblock(&self, id: ObjectId) -> Result<User, AppError> {
        log::info!("사용자 차단 해제: {}", id);
        self.users.set_flag(id, UserFlag::Blocked, false).await
    }

    /// 메일 링크의 확인 토큰을 소비하고 계정을 확인 상태로 바꿉니다.
    pub async fn confirm_email(&self, token: &str) -> Result<User, AppError> {
        let id = self
            .sessions
            .take_confirmation(token.trim())
            .await?
            .ok_or_else(|| {
                AppError::ValidationError("invalid or expired confirmation token".to_string())
            })?;

        self.confirm(id).await
    }

    async fn send_confirmation(&self, user: &User) -> Result<(), AppError> {
        let id = user_id(user)?;
        let token = random_hex(CONFIRMATION_TOKEN_BYTES);

        self.sessions
            .create_confirmation(&token, id, self.policy.confirmation_ttl)
            .await?;

        let link = format!("{}?token={}", self.policy.confirmation_url, token);
        self.email
            .send(
                user.email.clone(),
                EmailMessage::Confirmation { link },
                user.settings.language,
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::users::MockUserRepository;
    use crate::test_support::{
        test_policy, test_token_manager, InMemorySessionStore, RecordingEmailSender, UserFixture,
    };

    fn sign_up_request(username: &str, email: &str) -> SignUpRequest {
        SignUpRequest {
            name: "Alice".to_string(),
            username: username.to_string(),
            email: email.to_string(),
            password: "Secr3t!".to_string(),
            country_id: None,
            language: None,
            referral_code: None,
        }
    }

    fn sign_in_request(login: &str, password: &str) -> SignInRequest {
        SignInRequest {
            username_or_email: login.to_string(),
            password: password.to_string(),
        }
    }

    #[actix_web::test]
    async fn test_sign_up_creates_user_session_and_emails() {
        let fixture = UserFixture::new();

        let tokens = fixture
            .service
            .sign_up(sign_up_request("alice", "Alice@Example.com"))
            .await
            .unwrap();

        let alice = fixture.users.by_username("alice").unwrap();
        assert_eq!(alice.email, "alice@example.com");
        assert_eq!(alice.points, 10);
        assert!(!alice.is_confirmed);
        assert_eq!(alice.referral_code.len(), 8);
        assert_ne!(alice.password_hash, "Secr3t!");

        assert!(!tokens.access_token.is_empty());
        assert!(fixture.sessions.has_session(&tokens.refresh_token));
        assert_eq!(fixture.sessions.confirmation_tokens().len(), 1);

        let kinds: Vec<_> = fixture.emails.sent().into_iter().map(|(_, kind)| kind).collect();
        assert_eq!(kinds, vec!["welcome", "confirmation"]);
    }

    #[actix_web::test]
    async fn test_sign_up_with_referral_code_rewards_both_users() {
        let fixture = UserFixture::new();
        fixture
            .service
            .sign_up(sign_up_request("bob", "bob@example.com"))
            .await
            .unwrap();
        let bob = fixture.users.by_username("bob").unwrap();

        let mut request = sign_up_request("alice", "alice@example.com");
        request.referral_code = Some(bob.referral_code.to_lowercase());
        fixture.service.sign_up(request).await.unwrap();

        assert_eq!(fixture.users.by_username("bob").unwrap().points, 60);
        assert_eq!(fixture.users.by_username("alice").unwrap().points, 60);
    }

    #[actix_web::test]
    async fn test_sign_up_with_unknown_referral_code_still_succeeds() {
        let fixture = UserFixture::new();
        fixture
            .service
            .sign_up(sign_up_request("bob", "bob@example.com"))
            .await
            .unwrap();

        let mut request = sign_up_request("alice", "alice@example.com");
        request.referral_code = Some("DEADBEEF00".to_string());
        let result = fixture.service.sign_up(request).await;

        assert!(result.is_ok());
        assert_eq!(fixture.users.by_username("bob").unwrap().points, 10);
        assert_eq!(fixture.users.by_username("alice").unwrap().points, 10);
    }

    #[actix_web::test]
    async fn test_duplicate_sign_up_fails_without_session() {
        let fixture = UserFixture::new();
        fixture
            .service
            .sign_up(sign_up_request("alice", "alice@example.com"))
            .await
            .unwrap();
        assert_eq!(fixture.sessions.session_count(), 1);

        let same_username = fixture
            .service
            .sign_up(sign_up_request("alice", "other@example.com"))
            .await;
        let same_email = fixture
            .service
            .sign_up(sign_up_request("alice2", "ALICE@example.com"))
            .await;

        assert!(matches!(same_username, Err(AppError::AlreadyExists(_))));
        assert!(matches!(same_email, Err(AppError::AlreadyExists(_))));
        assert_eq!(fixture.sessions.session_count(), 1);
        assert_eq!(fixture.users.count(), 1);
    }

    #[actix_web::test]
    async fn test_sign_up_fails_when_email_cannot_be_sent() {
        let fixture = UserFixture::with_email_sender(RecordingEmailSender::failing());

        let result = fixture
            .service
            .sign_up(sign_up_request("alice", "alice@example.com"))
            .await;

        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
        assert_eq!(fixture.sessions.session_count(), 0);
    }

    #[actix_web::test]
    async fn test_sign_in_by_username_and_email() {
        let fixture = UserFixture::new();
        fixture
            .service
            .sign_up(sign_up_request("alice", "alice@example.com"))
            .await
            .unwrap();

        let by_username = fixture.service.sign_in(sign_in_request("alice", "Secr3t!")).await;
        let by_email = fixture
            .service
            .sign_in(sign_in_request("ALICE@example.com", "Secr3t!"))
            .await;

        assert!(by_username.is_ok());
        assert!(by_email.is_ok());
        assert_eq!(fixture.sessions.session_count(), 3);
    }

    #[actix_web::test]
    async fn test_sign_in_wrong_password_is_not_found() {
        let fixture = UserFixture::new();
        fixture
            .service
            .sign_up(sign_up_request("alice", "alice@example.com"))
            .await
            .unwrap();

        let wrong_password = fixture.service.sign_in(sign_in_request("alice", "nope")).await;
        let unknown_user = fixture.service.sign_in(sign_in_request("mallory", "Secr3t!")).await;

        assert!(matches!(wrong_password, Err(AppError::NotFound(Resource::User))));
        assert!(matches!(unknown_user, Err(AppError::NotFound(Resource::User))));
    }

    #[actix_web::test]
    async fn test_blocked_user_cannot_sign_in() {
        let fixture = UserFixture::new();
        fixture
            .service
            .sign_up(sign_up_request("alice", "alice@example.com"))
            .await
            .unwrap();
        let id = fixture.users.by_username("alice").unwrap().id.unwrap();
        fixture.service.block(id).await.unwrap();

        let result = fixture.service.sign_in(sign_in_request("alice", "Secr3t!")).await;

        assert!(matches!(result, Err(AppError::Blocked)));
    }

    #[actix_web::test]
    async fn test_refresh_replaces_session() {
        let fixture = UserFixture::new();
        let first = fixture
            .service
            .sign_up(sign_up_request("alice", "alice@example.com"))
            .await
            .unwrap();

        let second = fixture.service.refresh_tokens(&first.refresh_token).await.unwrap();

        assert_ne!(first.refresh_token, second.refresh_token);
        assert!(!fixture.sessions.has_session(&first.refresh_token));
        assert!(fixture.sessions.has_session(&second.refresh_token));

        let reused = fixture.service.refresh_tokens(&first.refresh_token).await;
        assert!(matches!(reused, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_concurrent_refresh_with_same_token_succeeds_once() {
        let fixture = UserFixture::new();
        let tokens = fixture
            .service
            .sign_up(sign_up_request("alice", "alice@example.com"))
            .await
            .unwrap();

        let (a, b) = futures_util::future::join(
            fixture.service.refresh_tokens(&tokens.refresh_token),
            fixture.service.refresh_tokens(&tokens.refresh_token),
        )
        .await;

        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        assert_eq!(fixture.sessions.session_count(), 1);
    }

    #[actix_web::test]
    async fn test_refresh_with_unknown_token_is_unauthorized() {
        let fixture = UserFixture::new();

        let result = fixture.service.refresh_tokens("0123456789abcdef").await;

        assert!(matches!(result, Err(AppError::AuthenticationError(_))));
    }

    #[actix_web::test]
    async fn test_sign_out_removes_session() {
        let fixture = UserFixture::new();
        let tokens = fixture
            .service
            .sign_up(sign_up_request("alice", "alice@example.com"))
            .await
            .unwrap();

        fixture.service.sign_out(&tokens.refresh_token).await.unwrap();

        assert!(!fixture.sessions.has_session(&tokens.refresh_token));
    }

    #[actix_web::test]
    async fn test_authenticate_access_token() {
        let fixture = UserFixture::new();
        let tokens = fixture
            .service
            .sign_up(sign_up_request("alice", "alice@example.com"))
            .await
            .unwrap();

        let user = fixture.service.authenticate(&tokens.access_token).await.unwrap();
        assert_eq!(user.username, "alice");

        fixture.service.block(user.id.unwrap()).await.unwrap();
        let blocked = fixture.service.authenticate(&tokens.access_token).await;
        assert!(matches!(blocked, Err(AppError::Blocked)));
    }

    #[actix_web::test]
    async fn test_adjust_points_never_goes_negative() {
        let fixture = UserFixture::new();
        fixture
            .service
            .sign_up(sign_up_request("alice", "alice@example.com"))
            .await
            .unwrap();
        let id = fixture.users.by_username("alice").unwrap().id.unwrap();

        let result = fixture.service.adjust_points(id, -11).await;
        assert!(matches!(result, Err(AppError::InsufficientPoints)));
        assert_eq!(fixture.users.get(id).unwrap().points, 10);

        let user = fixture.service.adjust_points(id, -10).await.unwrap();
        assert_eq!(user.points, 0);
    }

    #[actix_web::test]
    async fn test_favorites_are_idempotent() {
        let fixture = UserFixture::new();
        fixture
            .service
            .sign_up(sign_up_request("alice", "alice@example.com"))
            .await
            .unwrap();
        let id = fixture.users.by_username("alice").unwrap().id.unwrap();
        let question_id = ObjectId::new();

        fixture.service.add_favorite(id, question_id).await.unwrap();
        let user = fixture.service.add_favorite(id, question_id).await.unwrap();
        assert_eq!(user.favorites, vec![question_id]);

        let user = fixture.service.remove_favorite(id, ObjectId::new()).await.unwrap();
        assert_eq!(user.favorites.len(), 1);

        let user = fixture.service.remove_favorite(id, question_id).await.unwrap();
        assert!(user.favorites.is_empty());
    }

    #[actix_web::test]
    async fn test_achievements_are_idempotent() {
        let fixture = UserFixture::new();
        fixture
            .service
            .sign_up(sign_up_request("alice", "alice@example.com"))
            .await
            .unwrap();
        let id = fixture.users.by_username("alice").unwrap().id.unwrap();

        fixture.service.add_achievement(id, "first_answer".to_string()).await.unwrap();
        let user = fixture.service.add_achievement(id, "first_answer".to_string()).await.unwrap();
        assert_eq!(user.achievements.len(), 1);

        let user = fixture.service.remove_achievement(id, "missing".to_string()).await.unwrap();
        assert_eq!(user.achievements.len(), 1);
    }

    #[actix_web::test]
    async fn test_update_email_resets_confirmation_and_sends_mail() {
        let fixture = UserFixture::new();
        fixture
            .service
            .sign_up(sign_up_request("alice", "alice@example.com"))
            .await
            .unwrap();
        let id = fixture.users.by_username("alice").unwrap().id.unwrap();
        fixture.service.confirm(id).await.unwrap();

        let request = UpdateUserRequest {
            email: Some("new@example.com".to_string()),
            name: Some("Alice B".to_string()),
            ..Default::default()
        };
        let user = fixture.service.update(id, request).await.unwrap();

        assert_eq!(user.email, "new@example.com");
        assert_eq!(user.name, "Alice B");
        assert!(!user.is_confirmed);
        let last = fixture.emails.sent().last().cloned().unwrap();
        assert_eq!(last, ("new@example.com".to_string(), "confirmation"));
    }

    #[actix_web::test]
    async fn test_update_same_email_keeps_confirmation() {
        let fixture = UserFixture::new();
        fixture
            .service
            .sign_up(sign_up_request("alice", "alice@example.com"))
            .await
            .unwrap();
        let id = fixture.users.by_username("alice").unwrap().id.unwrap();
        fixture.service.confirm(id).await.unwrap();
        let sent_before = fixture.emails.sent().len();

        let request = UpdateUserRequest {
            email: Some("alice@example.com".to_string()),
            ..Default::default()
        };
        let user = fixture.service.update(id, request).await.unwrap();

        assert!(user.is_confirmed);
        assert_eq!(fixture.emails.sent().len(), sent_before);
    }

    #[actix_web::test]
    async fn test_update_password_allows_new_sign_in() {
        let fixture = UserFixture::new();
        fixture
            .service
            .sign_up(sign_up_request("alice", "alice@example.com"))
            .await
            .unwrap();
        let id = fixture.users.by_username("alice").unwrap().id.unwrap();

        let request = UpdateUserRequest {
            password: Some("N3w-password".to_string()),
            ..Default::default()
        };
        fixture.service.update(id, request).await.unwrap();

        assert!(fixture.service.sign_in(sign_in_request("alice", "N3w-password")).await.is_ok());
        assert!(fixture.service.sign_in(sign_in_request("alice", "Secr3t!")).await.is_err());
    }

    #[actix_web::test]
    async fn test_updated_password_keeps_surrounding_whitespace() {
        let fixture = UserFixture::new();
        fixture
            .service
            .sign_up(sign_up_request("alice", "alice@example.com"))
            .await
            .unwrap();
        let id = fixture.users.by_username("alice").unwrap().id.unwrap();

        let request: UpdateUserRequest =
            serde_json::from_str(r#"{"password": "  N3w-pass  "}"#).unwrap();
        fixture.service.update(id, request).await.unwrap();

        assert!(fixture.service.sign_in(sign_in_request("alice", "  N3w-pass  ")).await.is_ok());
        assert!(fixture.service.sign_in(sign_in_request("alice", "N3w-pass")).await.is_err());
    }

    #[actix_web::test]
    async fn test_confirm_email_token_is_single_use() {
        let fixture = UserFixture::new();
        fixture
            .service
            .sign_up(sign_up_request("alice", "alice@example.com"))
            .await
            .unwrap();
        let token = fixture.sessions.confirmation_tokens().pop().unwrap();

        let user = fixture.service.confirm_email(&token).await.unwrap();
        assert!(user.is_confirmed);

        let again = fixture.service.confirm_email(&token).await;
        assert!(matches!(again, Err(AppError::ValidationError(_))));
    }

    #[actix_web::test]
    async fn test_block_and_unblock_are_idempotent() {
        let fixture = UserFixture::new();
        fixture
            .service
            .sign_up(sign_up_request("alice", "alice@example.com"))
            .await
            .unwrap();
        let id = fixture.users.by_username("alice").unwrap().id.unwrap();

        fixture.service.block(id).await.unwrap();
        assert!(fixture.service.block(id).await.unwrap().is_blocked);
        fixture.service.unblock(id).await.unwrap();
        assert!(!fixture.service.unblock(id).await.unwrap().is_blocked);
    }

    #[actix_web::test]
    async fn test_delete_missing_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_delete().returning(|_| Ok(false));

        let service = UserService::new(
            Arc::new(users),
            Arc::new(InMemorySessionStore::default()),
            Arc::new(RecordingEmailSender::default()),
            PasswordHasher::new("pepper", 4),
            test_token_manager(),
            test_policy(),
        );

        let result = service.delete(ObjectId::new()).await;
        assert!(matches!(result, Err(AppError::NotFound(Resource::User))));
    }

    #[actix_web::test]
    async fn test_referral_lookup_failure_is_swallowed() {
        let mut users = MockUserRepository::new();
        users.expect_create().returning(|mut user| {
            user.id = Some(ObjectId::new());
            Ok(user)
        });
        users
            .expect_find_by_referral_code()
            .returning(|_| Err(AppError::DatabaseError("connection reset".to_string())));
        users.expect_adjust_points().never();

        let service = UserService::new(
            Arc::new(users),
            Arc::new(InMemorySessionStore::default()),
            Arc::new(RecordingEmailSender::default()),
            PasswordHasher::new("pepper", 4),
            test_token_manager(),
            test_policy(),
        );

        let mut request = sign_up_request("alice", "alice@example.com");
        request.referral_code = Some("ABCD1234".to_string());

        assert!(service.sign_up(request).await.is_ok());
    }
}
