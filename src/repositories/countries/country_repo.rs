//! 국가 리포지토리

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::FindOptions,
    Collection,
};

use crate::core::errors::AppError;
use crate::db::Database;
use crate::domain::entities::countries::{Country, COUNTRY_COLLECTION};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CountryRepository: Send + Sync {
    async fn create(&self, country: Country) -> Result<Country, AppError>;

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Country>, AppError>;

    /// 영어 이름순 목록
    async fn find_all(&self) -> Result<Vec<Country>, AppError>;
}

pub struct MongoCountryRepository {
    collection: Collection<Country>,
}

impl MongoCountryRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Country>(COUNTRY_COLLECTION),
        }
    }
}

#[async_trait]
impl CountryRepository for MongoCountryRepository {
    async fn create(&self, mut country: Country) -> Result<Country, AppError> {
        let result = self
            .collection
            .insert_one(&country)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        country.id = result.inserted_id.as_object_id();
        Ok(country)
    }

    async fn find_by_id(&self, id: ObjectId) -> Result<Option<Country>, AppError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<Country>, AppError> {
        let options = FindOptions::builder().sort(doc! { "names.en": 1 }).build();

        let cursor = self
            .collection
            .find(doc! {})
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        cursor
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}
