//! 질문 리포지토리
//!
//! 수정/삭제는 `{_id, user_id}` 필터로 작성자 본인 문서에만 적용됩니다.

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document, Regex},
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::core::errors::{AppError, Resource};
use crate::db::{escape_regex, Database};
use crate::domain::entities::questions::{
    Question, QuestionChanges, QuestionFilter, QUESTION_COLLECTION,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    async fn create(&self, question: Question) -> Result<Question, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Question>, AppError>;

    /// 최신순 목록
    async fn find_all(&self, filter: QuestionFilter) -> Result<Vec<Question>, AppError>;

    async fn update(
        &self,
        id: ObjectId,
        user_id: ObjectId,
        changes: QuestionChanges,
    ) -> Result<Question, AppError>;

    async fn delete(&self, id: ObjectId, user_id: ObjectId) -> Result<bool, AppError>;

    /// `verified_answer_id` 가 `expected` 일 때만 `value` 로 바꿉니다. 바뀌었으면 true.
    async fn set_verified_answer(
        &self,
        id: ObjectId,
        expected: Option<ObjectId>,
        value: Option<ObjectId>,
    ) -> Result<bool, AppError>;
}

pub struct MongoQuestionRepository {
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Question>(QUESTION_COLLECTION),
        }
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let indexes = [
            IndexModel::builder()
                .keys(doc! { "created_at": -1 })
                .options(IndexOptions::builder().name("created_at_desc".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "user_id": 1 })
                .options(IndexOptions::builder().name("user_id".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "tags": 1 })
                .options(IndexOptions::builder().name("tags".to_string()).build())
                .build(),
        ];

        self.collection
            .create_indexes(indexes)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

/// 목록 필터를 MongoDB 쿼리로 바꿉니다. 제목은 대소문자 무시 부분 일치입니다.
pub fn filter_document(filter: &QuestionFilter) -> Document {
    let mut query = Document::new();

    if let Some(title) = filter.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        query.insert(
            "title",
            Regex {
                pattern: escape_regex(title),
                options: "i".to_string(),
            },
        );
    }
    if let Some(tag) = filter.tag {
        query.insert("tags", tag);
    }
    if let Some(country_id) = filter.country_id {
        query.insert("country_id", country_id);
    }
    if let Some(user_id) = filter.user_id {
        query.insert("user_id", user_id);
    }

    query
}

/// 변경분을 `$set` 문서로 바꿉니다.
pub fn changes_document(changes: &QuestionChanges) -> Document {
    let mut set = doc! { "updated_at": DateTime::now() };

    if let Some(title) = &changes.title {
        set.insert("title", title.as_str());
    }
    if let Some(description) = &changes.description {
        set.insert("description", description.as_str());
    }
    if let Some(attachments_url) = &changes.attachments_url {
        set.insert("attachments_url", attachments_url.clone());
    }
    if let Some(tags) = &changes.tags {
        set.insert("tags", tags.clone());
    }
    if let Some(points) = changes.points {
        set.insert("points", points);
    }

    set
}

/// 채택 선점 필터. `null` 조건은 필드가 없는 기존 문서에도 맞습니다.
pub fn verified_answer_filter(id: ObjectId, expected: Option<ObjectId>) -> Document {
    doc! { "_id": id, "verified_answer_id": expected }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn create(&self, mut question: Question) -> Result<Question, AppError> {
        let result = self
            .collection
            .insert_one(&question)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        question.id = result.inserted_id.as_object_id();
        Ok(question)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Question>, AppError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_all(&self, filter: QuestionFilter) -> Result<Vec<Question>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": -1 })
            .build();

        let cursor = self
            .collection
            .find(filter_document(&filter))
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn update(
        &self,
        id: ObjectId,
        user_id: ObjectId,
        changes: QuestionChanges,
    ) -> Result<Question, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection
            .find_one_and_update(
                doc! { "_id": id, "user_id": user_id },
                doc! { "$set": changes_document(&changes) },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .ok_or(AppError::NotFound(Resource::Question))
    }

    async fn delete(&self, id: ObjectId, user_id: ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id, "user_id": user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    async fn set_verified_answer(
        &self,
        id: ObjectId,
        expected: Option<ObjectId>,
        value: Option<ObjectId>,
    ) -> Result<bool, AppError> {
        let result = self
            .collection
            .update_one(
                verified_answer_filter(id, expected),
                doc! { "$set": { "verified_answer_id": value, "updated_at": DateTime::now() } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count > 0)
    }
}
