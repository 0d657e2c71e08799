//! # Application State
//!
//! 모든 서비스를 한 번에 조립해 `web::Data<AppState>` 로 핸들러와 미들웨어에 넘깁니다.
//! 전역 레지스트리 없이 생성자 인자로만 의존성이 흐릅니다.
//!
//! ## 조립 순서
//!
//! ```text
//! Step 1  인프라 연결      MongoDB, Redis
//! Step 2  리포지토리 생성   Mongo*Repository, RedisSessionStore, ImgbbImageHost
//! Step 3  인덱스 보장      users, questions, answers, tags
//! Step 4  서비스 조립      User → Tag → Country → Question → Answer → Image
//! ```

use std::sync::Arc;

use crate::caching::redis::RedisClient;
use crate::config::AppConfig;
use crate::core::errors::AppError;
use crate::db::Database;
use crate::repositories::answers::{AnswerRepository, MongoAnswerRepository};
use crate::repositories::countries::{CountryRepository, MongoCountryRepository};
use crate::repositories::images::{ImageHost, ImgbbImageHost};
use crate::repositories::questions::{MongoQuestionRepository, QuestionRepository};
use crate::repositories::sessions::RedisSessionStore;
use crate::repositories::tags::{MongoTagRepository, TagRepository};
use crate::repositories::users::MongoUserRepository;
use crate::services::answers::AnswerService;
use crate::services::auth::{PasswordHasher, TokenManager};
use crate::services::countries::CountryService;
use crate::services::email::{EmailSender, LogEmailSender, SmtpEmailSender};
use crate::services::images::ImageService;
use crate::services::questions::QuestionService;
use crate::services::tags::TagService;
use crate::services::users::{UserPolicy, UserService};
use crate::utils::display_terminal::StartupProgress;

const REPOSITORY_COUNT: usize = 7;
const SERVICE_COUNT: usize = 6;

/// 핸들러가 공유하는 서비스 묶음
pub struct AppState {
    pub config: AppConfig,
    pub users: Arc<UserService>,
    pub questions: Arc<QuestionService>,
    pub answers: Arc<AnswerService>,
    pub tags: Arc<TagService>,
    pub countries: Arc<CountryService>,
    pub images: Arc<ImageService>,
}

impl AppState {
    /// 외부 저장소에 연결하고 모든 컴포넌트를 조립합니다.
    pub async fn build(config: AppConfig) -> Result<Self, AppError> {
        let mut progress = StartupProgress::new(&config.app.name);
        progress.begin("Connecting data stores");
        let database = Database::new(&config.mongo, &config.app.name).await?;
        progress.item("MongoDB", database.database_name());
        let redis = RedisClient::new(&config.redis)
            .await
            .map_err(|e| AppError::RedisError(e.to_string()))?;
        progress.item("Redis", "connected");
        progress.finish(2);

        progress.begin("Creating repositories");
        let user_repo = Arc::new(MongoUserRepository::new(&database));
        let question_repo = Arc::new(MongoQuestionRepository::new(&database));
        let answer_repo = Arc::new(MongoAnswerRepository::new(&database));
        let tag_repo = Arc::new(MongoTagRepository::new(&database));
        let country_repo = Arc::new(MongoCountryRepository::new(&database));
        let sessions = Arc::new(RedisSessionStore::new(redis));
        let image_host = Arc::new(ImgbbImageHost::new(&config.imgbb)?);
        if config.imgbb.api_key.is_empty() {
            log::warn!("⚠️ imgbb.api_key 가 비어 있어 이미지 업로드가 실패합니다");
        }
        progress.finish(REPOSITORY_COUNT);

        progress.begin("Ensuring indexes");
        user_repo.create_indexes().await?;
        progress.item("users", "ok");
        question_repo.create_indexes().await?;
        progress.item("questions", "ok");
        answer_repo.create_indexes().await?;
        progress.item("answers", "ok");
        tag_repo.create_indexes().await?;
        progress.item("tags", "ok");
        progress.finish(0);

        progress.begin("Assembling services");
        let email: Arc<dyn EmailSender> = if config.smtp.enabled {
            progress.item("email", "smtp");
            Arc::new(SmtpEmailSender::new(&config.smtp)?)
        } else {
            progress.item("email", "log only");
            Arc::new(LogEmailSender)
        };

        let user_service = Arc::new(UserService::new(
            user_repo,
            sessions,
            email,
            PasswordHasher::new(config.auth.password_salt.clone(), config.bcrypt_cost()),
            TokenManager::from_config(&config.auth),
            UserPolicy::from_config(&config),
        ));

        let state = Self::from_parts(
            config,
            user_service,
            question_repo,
            answer_repo,
            tag_repo,
            country_repo,
            image_host,
        );
        progress.finish(SERVICE_COUNT);

        progress.ready();
        Ok(state)
    }

    /// 이미 만든 사용자 서비스와 리포지토리로 나머지 서비스를 조립합니다.
    pub fn from_parts(
        config: AppConfig,
        users: Arc<UserService>,
        question_repo: Arc<dyn QuestionRepository>,
        answer_repo: Arc<dyn AnswerRepository>,
        tag_repo: Arc<dyn TagRepository>,
        country_repo: Arc<dyn CountryRepository>,
        image_host: Arc<dyn ImageHost>,
    ) -> Self {
        let tags = Arc::new(TagService::new(tag_repo));
        let countries = Arc::new(CountryService::new(country_repo));
        let questions = Arc::new(QuestionService::new(question_repo, tags.clone()));
        let answers = Arc::new(AnswerService::new(
            answer_repo,
            questions.clone(),
            users.clone(),
        ));
        let images = Arc::new(ImageService::new(image_host));

        Self {
            config,
            users,
            questions,
            answers,
            tags,
            countries,
            images,
        }
    }
}
