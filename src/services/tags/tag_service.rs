//! 태그 서비스
//!
//! 태그는 `(정규화된 이름, 국가)` 로 식별됩니다. 질문 작성 시 이름으로 넘어온 태그는
//! 없으면 만들어지고 있으면 재사용됩니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::core::errors::{AppError, Resource};
use crate::domain::entities::tags::{normalize_tag_name, Tag};
use crate::repositories::tags::TagRepository;

pub struct TagService {
    tags: Arc<dyn TagRepository>,
}

impl TagService {
    pub fn new(tags: Arc<dyn TagRepository>) -> Self {
        Self { tags }
    }

    pub async fn create(&self, name: &str, country_id: Option<ObjectId>) -> Result<Tag, AppError> {
        let name = normalize_tag_name(name);
        if name.is_empty() {
            return Err(AppError::ValidationError("tag name is required".to_string()));
        }

        self.tags.find_or_create(name, country_id).await
    }

    /// 태그 이름 목록을 ID 목록으로 바꿉니다. 중복 이름은 한 번만 들어갑니다.
    pub async fn resolve(
        &self,
        names: &[String],
        country_id: Option<ObjectId>,
    ) -> Result<Vec<ObjectId>, AppError> {
        let mut seen: Vec<String> = Vec::with_capacity(names.len());
        let mut ids = Vec::with_capacity(names.len());

        for name in names {
            let normalized = normalize_tag_name(name);
            if normalized.is_empty() || seen.contains(&normalized) {
                continue;
            }

            let tag = self.tags.find_or_create(normalized.clone(), country_id).await?;
            seen.push(normalized);
            if let Some(id) = tag.id {
                ids.push(id);
            }
        }

        Ok(ids)
    }

    pub async fn get_by_id(&self, id: ObjectId) -> Result<Tag, AppError> {
        self.tags
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Resource::Tag))
    }

    pub async fn get_all(&self, country_id: Option<ObjectId>) -> Result<Vec<Tag>, AppError> {
        match country_id {
            Some(country_id) => self.tags.find_all_by_country(country_id).await,
            None => self.tags.find_all().await,
        }
    }

    pub async fn delete(&self, id: ObjectId) -> Result<(), AppError> {
        if !self.tags.delete(id).await? {
            return Err(AppError::NotFound(Resource::Tag));
        }
        log::info!("🏷️ 태그 삭제: {}", id);
        Ok(())
    }
}
