//! 태그 리포지토리
//!
//! `(name, country_id)` 복합 유니크 인덱스 위에서 upsert 로 "없으면 생성" 을 수행합니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::core::errors::AppError;
use crate::db::{is_duplicate_key, Database};
use crate::domain::entities::tags::{Tag, TAG_COLLECTION};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// 정규화된 이름과 국가로 태그를 찾고, 없으면 만듭니다.
    async fn find_or_create(&self, name: String, country_id: Option<ObjectId>)
        -> Result<Tag, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Tag>, AppError>;

    async fn find_all(&self) -> Result<Vec<Tag>, AppError>;

    async fn find_all_by_country(&self, country_id: ObjectId) -> Result<Vec<Tag>, AppError>;

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError>;
}

pub struct MongoTagRepository {
    collection: Collection<Tag>,
}

impl MongoTagRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Tag>(TAG_COLLECTION),
        }
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1, "country_id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("name_country_unique".to_string())
                    .build(),
            )
            .build();

        self.collection
            .create_index(index)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_many(&self, filter: Document) -> Result<Vec<Tag>, AppError> {
        let options = FindOptions::builder().sort(doc! { "name": 1 }).build();

        let cursor = self
            .collection
            .find(filter)
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

/// 국가가 없는 태그는 `country_id: null` 로 찾습니다. 필드가 없는 문서도 함께 일치합니다.
pub fn identity_filter(name: &str, country_id: Option<ObjectId>) -> Document {
    doc! {
        "name": name,
        "country_id": country_id.map(Bson::ObjectId).unwrap_or(Bson::Null),
    }
}

#[async_trait]
impl TagRepository for MongoTagRepository {
    async fn find_or_create(
        &self,
        name: String,
        country_id: Option<ObjectId>,
    ) -> Result<Tag, AppError> {
        let filter = identity_filter(&name, country_id);
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let upserted = self
            .collection
            .find_one_and_update(filter.clone(), doc! { "$setOnInsert": { "name": name.as_str() } })
            .with_options(options)
            .await;

        let found = match upserted {
            Ok(tag) => tag,
            // 동시 upsert 경합에서 진 쪽은 이미 만들어진 문서를 읽습니다.
            Err(e) if is_duplicate_key(&e) => self
                .collection
                .find_one(filter)
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?,
            Err(e) => return Err(AppError::DatabaseError(e.to_string())),
        };

        found.ok_or_else(|| AppError::DatabaseError(format!("태그 upsert 결과가 없습니다: {}", name)))
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Tag>, AppError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<Tag>, AppError> {
        self.find_many(doc! {}).await
    }

    async fn find_all_by_country(&self, country_id: ObjectId) -> Result<Vec<Tag>, AppError> {
        self.find_many(doc! { "country_id": country_id }).await
    }

    async fn delete(&self, id: ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }
}
