//! # 사용자 리포지토리
//!
//! 사용자 문서의 데이터 액세스 계층입니다. 서비스는 [`UserRepository`] 트레이트에만
//! 의존하며, 운영 구현은 MongoDB `users` 컬렉션을 쓰는 [`MongoUserRepository`] 입니다.
//!
//! ## 원자성
//!
//! 모든 변경은 단일 문서 연산 하나로 끝납니다.
//!
//! - 포인트 조정: 조건부 `$inc` (`points >= -delta` 필터). 음수 잔액이 저장될 수 없습니다.
//! - 즐겨찾기/업적: `$addToSet` / `$pull`. 중복 추가와 없는 값 제거는 변화가 없습니다.
//! - 유니크 제약: `username`, `email` 유니크 인덱스 위반은 `AlreadyExists` 로 바뀝니다.

use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::core::errors::{AppError, Resource};
use crate::db::{is_duplicate_key, Database};
use crate::domain::entities::users::{Appearance, Language, User, USER_COLLECTION};

/// 관리자가 토글하는 계정 상태 플래그
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserFlag {
    Confirmed,
    Blocked,
}

impl UserFlag {
    pub fn field(&self) -> &'static str {
        match self {
            UserFlag::Confirmed => "is_confirmed",
            UserFlag::Blocked => "is_blocked",
        }
    }
}

/// 프로필 부분 수정. `None` 필드는 건드리지 않습니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub avatar_url: Option<String>,
    pub social_links: Option<Vec<String>>,
    pub country_id: Option<ObjectId>,
    pub language: Option<Language>,
    pub appearance: Option<Appearance>,
    pub email_notifications: Option<bool>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        *self == UserChanges::default()
    }

    /// `$set` 에 들어갈 문서. 이메일이 바뀌면 확인 상태도 함께 초기화합니다.
    pub fn to_set_document(&self) -> Document {
        let mut set = doc! { "updated_at": DateTime::now() };

        if let Some(name) = &self.name {
            set.insert("name", name.as_str());
        }
        if let Some(username) = &self.username {
            set.insert("username", username.as_str());
        }
        if let Some(email) = &self.email {
            set.insert("email", email.as_str());
            set.insert("is_confirmed", false);
        }
        if let Some(password_hash) = &self.password_hash {
            set.insert("password_hash", password_hash.as_str());
        }
        if let Some(avatar_url) = &self.avatar_url {
            set.insert("avatar_url", avatar_url.as_str());
        }
        if let Some(social_links) = &self.social_links {
            set.insert("social_links", social_links.clone());
        }
        if let Some(country_id) = self.country_id {
            set.insert("settings.country_id", country_id);
        }
        if let Some(language) = self.language {
            set.insert("settings.language", language.as_str());
        }
        if let Some(appearance) = self.appearance {
            set.insert("settings.appearance", appearance.as_str());
        }
        if let Some(email_notifications) = self.email_notifications {
            set.insert("settings.email_notifications", email_notifications);
        }

        set
    }
}

/// 사용자 저장소 추상화
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// 새 사용자를 저장하고 ID 가 채워진 문서를 돌려줍니다.
    async fn create(&self, user: User) -> Result<User, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, AppError>;

    /// 로그인 식별자는 사용자명 또는 이메일입니다.
    async fn find_by_username_or_email(&self, login: &str) -> Result<Option<User>, AppError>;

    async fn find_by_referral_code(&self, code: &str) -> Result<Option<User>, AppError>;

    async fn update(&self, id: ObjectId, changes: UserChanges) -> Result<User, AppError>;

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;

    /// 포인트를 `delta` 만큼 더합니다. 결과가 음수가 되면 `InsufficientPoints` 이고 값은 그대로입니다.
    async fn adjust_points(&self, id: ObjectId, delta: i64) -> Result<User, AppError>;

    async fn add_favorite(&self, id: ObjectId, question_id: ObjectId) -> Result<User, AppError>;

    async fn remove_favorite(&self, id: ObjectId, question_id: ObjectId) -> Result<User, AppError>;

    async fn add_achievement(&self, id: ObjectId, achievement: String) -> Result<User, AppError>;

    async fn remove_achievement(&self, id: ObjectId, achievement: String)
        -> Result<User, AppError>;

    async fn set_flag(&self, id: ObjectId, flag: UserFlag, value: bool) -> Result<User, AppError>;
}

/// MongoDB 기반 사용자 리포지토리
///
/// ```rust,ignore
/// let repo = MongoUserRepository::new(&database);
/// repo.create_indexes().await?;
///
/// let user = repo.adjust_points(user_id, -20).await?; // 잔액 부족이면 InsufficientPoints
/// ```
pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<User>(USER_COLLECTION),
        }
    }

    /// 유니크 인덱스: email, username. 추천 코드 조회용 인덱스는 유니크가 아닙니다.
    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("email_unique".to_string())
                    .build(),
            )
            .build();

        let username_index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("username_unique".to_string())
                    .build(),
            )
            .build();

        let referral_index = IndexModel::builder()
            .keys(doc! { "referral_code": 1 })
            .options(
                IndexOptions::builder()
                    .name("referral_code".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_indexes([email_index, username_index, referral_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    fn after_update() -> FindOneAndUpdateOptions {
        FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build()
    }

    /// `_id` 로 찾아 갱신하고 갱신된 문서를 돌려줍니다. 없으면 NotFound.
    async fn update_by_id(&self, id: ObjectId, update: Document) -> Result<User, AppError> {
        self.collection
            .find_one_and_update(doc! { "_id": id }, update)
            .with_options(Self::after_update())
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::AlreadyExists("username or email".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?
            .ok_or(AppError::NotFound(Resource::User))
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn create(&self, mut user: User) -> Result<User, AppError> {
        let result = self.collection.insert_one(&user).await.map_err(|e| {
            if is_duplicate_key(&e) {
                AppError::AlreadyExists("username or email".to_string())
            } else {
                AppError::DatabaseError(e.to_string())
            }
        })?;

        user.id = result.inserted_id.as_object_id();
        Ok(user)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_username_or_email(&self, login: &str) -> Result<Option<User>, AppError> {
        self.collection
            .find_one(doc! { "$or": [{ "username": login }, { "email": login }] })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_referral_code(&self, code: &str) -> Result<Option<User>, AppError> {
        self.collection
            .find_one(doc! { "referral_code": code })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn update(&self, id: ObjectId, changes: UserChanges) -> Result<User, AppError> {
        self.update_by_id(id, doc! { "$set": changes.to_set_document() })
            .await
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    async fn adjust_points(&self, id: ObjectId, delta: i64) -> Result<User, AppError> {
        let mut filter = doc! { "_id": id };
        if delta < 0 {
            filter.insert("points", doc! { "$gte": -delta });
        }

        let updated = self
            .collection
            .find_one_and_update(
                filter,
                doc! {
                    "$inc": { "points": delta },
                    "$set": { "updated_at": DateTime::now() },
                },
            )
            .with_options(Self::after_update())
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        match updated {
            Some(user) => Ok(user),
            // 필터에 걸린 이유가 잔액인지 존재 여부인지 구분
            None => match self.find_by_id(id).await? {
                Some(_) => Err(AppError::InsufficientPoints),
                None => Err(AppError::NotFound(Resource::User)),
            },
        }
    }

    async fn add_favorite(&self, id: ObjectId, question_id: ObjectId) -> Result<User, AppError> {
        self.update_by_id(id, doc! { "$addToSet": { "favorites": question_id } })
            .await
    }

    async fn remove_favorite(&self, id: ObjectId, question_id: ObjectId) -> Result<User, AppError> {
        self.update_by_id(id, doc! { "$pull": { "favorites": question_id } })
            .await
    }

    async fn add_achievement(&self, id: ObjectId, achievement: String) -> Result<User, AppError> {
        self.update_by_id(id, doc! { "$addToSet": { "achievements": achievement } })
            .await
    }

    async fn remove_achievement(
        &self,
        id: ObjectId,
        achievement: String,
    ) -> Result<User, AppError> {
        self.update_by_id(id, doc! { "$pull": { "achievements": achievement } })
            .await
    }

    async fn set_flag(&self, id: ObjectId, flag: UserFlag, value: bool) -> Result<User, AppError> {
        let mut set = doc! { "updated_at": DateTime::now() };
        set.insert(flag.field(), value);

        self.update_by_id(id, doc! { "$set": set }).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_set_document_only_contains_present_fields() {
        let changes = UserChanges {
            name: Some("Alice".to_string()),
            language: Some(Language::Uk),
            ..Default::default()
        };
        let set = changes.to_set_document();

        assert_eq!(set.get_str("name").unwrap(), "Alice");
        assert_eq!(set.get_str("settings.language").unwrap(), "uk");
        assert!(set.contains_key("updated_at"));
        assert!(!set.contains_key("email"));
        assert!(!set.contains_key("is_confirmed"));
    }

    #[test]
    fn test_email_change_resets_confirmation() {
        let changes = UserChanges {
            email: Some("new@example.com".to_string()),
            ..Default::default()
        };
        let set = changes.to_set_document();

        assert_eq!(set.get_str("email").unwrap(), "new@example.com");
        assert!(!set.get_bool("is_confirmed").unwrap());
    }

    #[test]
    fn test_changes_is_empty() {
        assert!(UserChanges::default().is_empty());
        assert!(!UserChanges {
            email_notifications: Some(false),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_flag_fields() {
        assert_eq!(UserFlag::Confirmed.field(), "is_confirmed");
        assert_eq!(UserFlag::Blocked.field(), "is_blocked");
    }

    #[test]
    fn test_mock_user_repository_trait_bounds() {
        fn check_send_sync<T: Send + Sync>() {}
        check_send_sync::<MockUserRepository>();
    }
}
