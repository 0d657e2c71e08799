//! 답변 리포지토리

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime, Document},
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use crate::core::errors::{AppError, Resource};
use crate::db::Database;
use crate::domain::entities::answers::{Answer, AnswerFilter, ANSWER_COLLECTION};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnswerRepository: Send + Sync {
    async fn create(&self, answer: Answer) -> Result<Answer, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Answer>, AppError>;

    /// 오래된 순 목록
    async fn find_all(&self, filter: AnswerFilter) -> Result<Vec<Answer>, AppError>;

    /// 작성자 본인의 답변 본문 수정
    async fn update_text(
        &self,
        id: ObjectId,
        user_id: ObjectId,
        text: String,
    ) -> Result<Answer, AppError>;

    async fn delete(&self, id: ObjectId, user_id: ObjectId) -> Result<bool, AppError>;

    async fn add_like(&self, id: ObjectId) -> Result<Answer, AppError>;

    /// 좋아요가 0 이면 그대로 둡니다.
    async fn remove_like(&self, id: ObjectId) -> Result<Answer, AppError>;

    /// `is_verified` 가 `expected` 일 때만 `value` 로 바꿉니다. 바뀌었으면 true.
    async fn set_verified(&self, id: ObjectId, expected: bool, value: bool)
        -> Result<bool, AppError>;
}

pub struct MongoAnswerRepository {
    collection: Collection<Answer>,
}

impl MongoAnswerRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Answer>(ANSWER_COLLECTION),
        }
    }

    pub async fn create_indexes(&self) -> Result<(), AppError> {
        let indexes = [
            IndexModel::builder()
                .keys(doc! { "question_id": 1, "created_at": 1 })
                .options(IndexOptions::builder().name("question_created".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "user_id": 1 })
                .options(IndexOptions::builder().name("user_id".to_string()).build())
                .build(),
        ];

        self.collection
            .create_indexes(indexes)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn update_one_returning(
        &self,
        filter: Document,
        update: Document,
    ) -> Result<Option<Answer>, AppError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection
            .find_one_and_update(filter, update)
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

pub fn filter_document(filter: &AnswerFilter) -> Document {
    let mut query = Document::new();

    if let Some(question_id) = filter.question_id {
        query.insert("question_id", question_id);
    }
    if let Some(user_id) = filter.user_id {
        query.insert("user_id", user_id);
    }

    query
}

#[async_trait]
impl AnswerRepository for MongoAnswerRepository {
    async fn create(&self, mut answer: Answer) -> Result<Answer, AppError> {
        let result = self
            .collection
            .insert_one(&answer)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        answer.id = result.inserted_id.as_object_id();
        Ok(answer)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Answer>, AppError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_all(&self, filter: AnswerFilter) -> Result<Vec<Answer>, AppError> {
        let options = FindOptions::builder()
            .sort(doc! { "created_at": 1 })
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

    async fn update_text(
        &self,
        id: ObjectId,
        user_id: ObjectId,
        text: String,
    ) -> Result<Answer, AppError> {
        self.update_one_returning(
            doc! { "_id": id, "user_id": user_id },
            doc! { "$set": { "text": text, "updated_at": DateTime::now() } },
        )
        .await?
        .ok_or(AppError::NotFound(Resource::Answer))
    }

    async fn delete(&self, id: ObjectId, user_id: ObjectId) -> Result<bool, AppError> {
        let result = self
            .collection
            .delete_one(doc! { "_id": id, "user_id": user_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    async fn add_like(&self, id: ObjectId) -> Result<Answer, AppError> {
        self.update_one_returning(doc! { "_id": id }, doc! { "$inc": { "likes": 1 } })
            .await?
            .ok_or(AppError::NotFound(Resource::Answer))
    }

    async fn remove_like(&self, id: ObjectId) -> Result<Answer, AppError> {
        let updated = self
            .update_one_returning(
                doc! { "_id": id, "likes": { "$gt": 0 } },
                doc! { "$inc": { "likes": -1 } },
            )
            .await?;

        match updated {
            Some(answer) => Ok(answer),
            None => self
                .find_by_id(id)
                .await?
                .ok_or(AppError::NotFound(Resource::Answer)),
        }
    }

    async fn set_verified(
        &self,
        id: ObjectId,
        expected: bool,
        value: bool,
    ) -> Result<bool, AppError> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id, "is_verified": expected },
                doc! { "$set": { "is_verified": value, "updated_at": DateTime::now() } },
            )
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.modified_count > 0)
    }
}
