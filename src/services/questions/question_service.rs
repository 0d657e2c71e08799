//! 질문 서비스
//!
//! 질문의 태그는 이름으로 받아 작성자 국가 기준으로 [`TagService::resolve`] 를 거쳐
//! ID 로 저장됩니다. 수정과 삭제는 작성자 본인만 할 수 있고, 남의 질문은 없는 것과 같습니다.

use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime};

use crate::core::errors::{AppError, Resource};
use crate::domain::dto::questions::{CreateQuestionRequest, UpdateQuestionRequest};
use crate::domain::entities::questions::{Question, QuestionChanges, QuestionFilter};
use crate::repositories::questions::QuestionRepository;
use crate::services::tags::TagService;

pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
    tags: Arc<TagService>,
}

fn clean_attachments(urls: Vec<String>) -> Vec<String> {
    urls.into_iter()
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .collect()
}

impl QuestionService {
    pub fn new(questions: Arc<dyn QuestionRepository>, tags: Arc<TagService>) -> Self {
        Self { questions, tags }
    }

    pub async fn create(
        &self,
        user_id: ObjectId,
        country_id: Option<ObjectId>,
        request: CreateQuestionRequest,
    ) -> Result<Question, AppError> {
        let tags = self.tags.resolve(&request.tags, country_id).await?;
        let now = DateTime::now();

        let question = Question {
            id: None,
            title: request.title.trim().to_string(),
            description: request.description.trim().to_string(),
            attachments_url: clean_attachments(request.attachments_url),
            tags,
            points: request.points,
            country_id,
            user_id,
            verified_answer_id: None,
            created_at: now,
            updated_at: now,
        };

        let question = self.questions.create(question).await?;
        log::info!("❓ 질문 작성: {:?} by {}", question.id, user_id);
        Ok(question)
    }

    pub async fn get_by_id(&self, id: ObjectId) -> Result<Question, AppError> {
        self.questions
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Resource::Question))
    }

    pub async fn get_all(&self, filter: QuestionFilter) -> Result<Vec<Question>, AppError> {
        self.questions.find_all(filter).await
    }

    /// 작성자 본인의 질문만 수정됩니다. 태그가 오면 질문의 국가 기준으로 다시 풉니다.
    pub async fn update(
        &self,
        id: ObjectId,
        user_id: ObjectId,
        request: UpdateQuestionRequest,
    ) -> Result<Question, AppError> {
        let current = self.get_by_id(id).await?;
        if current.user_id != user_id {
            return Err(AppError::NotFound(Resource::Question));
        }

        let tags = match request.tags {
            Some(names) => Some(self.tags.resolve(&names, current.country_id).await?),
            None => None,
        };

        let changes = QuestionChanges {
            title: request.title,
            description: request.description,
            attachments_url: request.attachments_url.map(clean_attachments),
            tags,
            points: request.points,
        };

        if changes.is_empty() {
            return Ok(current);
        }

        self.questions.update(id, user_id, changes).await
    }

    /// 아직 채택된 답변이 없을 때만 `answer_id` 를 채택 답변으로 기록합니다.
    pub async fn claim_verified_answer(
        &self,
        id: ObjectId,
        answer_id: ObjectId,
    ) -> Result<bool, AppError> {
        self.questions
            .set_verified_answer(id, None, Some(answer_id))
            .await
    }

    /// `answer_id` 가 채택 답변으로 기록돼 있을 때만 비웁니다.
    pub async fn release_verified_answer(
        &self,
        id: ObjectId,
        answer_id: ObjectId,
    ) -> Result<bool, AppError> {
        self.questions
            .set_verified_answer(id, Some(answer_id), None)
            .await
    }

    pub async fn delete(&self, id: ObjectId, user_id: ObjectId) -> Result<(), AppError> {
        if !self.questions.delete(id, user_id).await? {
            return Err(AppError::NotFound(Resource::Question));
        }
        log::info!("🗑️ 질문 삭제: {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::tags::Tag;
    use crate::repositories::questions::MockQuestionRepository;
    use crate::repositories::tags::MockTagRepository;

    fn tag_service() -> Arc<TagService> {
        let mut tags = MockTagRepository::new();
        tags.expect_find_or_create().returning(|name, country_id| {
            Ok(Tag {
                id: Some(ObjectId::new()),
                name,
                country_id,
            })
        });
        Arc::new(TagService::new(Arc::new(tags)))
    }

    fn question(user_id: ObjectId) -> Question {
        let now = DateTime::now();
        Question {
            id: Some(ObjectId::new()),
            title: "How do lifetimes work?".to_string(),
            description: "...".to_string(),
            attachments_url: Vec::new(),
            tags: Vec::new(),
            points: 5,
            country_id: None,
            user_id,
            verified_answer_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[actix_web::test]
    async fn test_create_resolves_tags() {
        let mut questions = MockQuestionRepository::new();
        questions.expect_create().returning(|mut question| {
            question.id = Some(ObjectId::new());
            Ok(question)
        });

        let service = QuestionService::new(Arc::new(questions), tag_service());
        let request = CreateQuestionRequest {
            title: "  Borrow checker ".to_string(),
            description: "Why does this not compile?".to_string(),
            attachments_url: vec![" ".to_string(), "https://i.ibb.co/x.png".to_string()],
            tags: vec!["Rust".to_string(), "rust".to_string(), "lifetimes".to_string()],
            points: 20,
        };

        let question = service.create(ObjectId::new(), None, request).await.unwrap();

        assert_eq!(question.title, "Borrow checker");
        assert_eq!(question.tags.len(), 2);
        assert_eq!(question.attachments_url, vec!["https://i.ibb.co/x.png".to_string()]);
        assert_eq!(question.points, 20);
    }

    #[actix_web::test]
    async fn test_update_of_foreign_question_is_not_found() {
        let owner = ObjectId::new();
        let existing = question(owner);
        let id = existing.id.unwrap();

        let mut questions = MockQuestionRepository::new();
        questions
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        questions.expect_update().never();

        let service = QuestionService::new(Arc::new(questions), tag_service());
        let request = UpdateQuestionRequest {
            title: Some("hijacked".to_string()),
            ..Default::default()
        };

        let result = service.update(id, ObjectId::new(), request).await;

        assert!(matches!(result, Err(AppError::NotFound(Resource::Question))));
    }

    #[actix_web::test]
    async fn test_empty_update_returns_current() {
        let owner = ObjectId::new();
        let existing = question(owner);
        let id = existing.id.unwrap();

        let mut questions = MockQuestionRepository::new();
        questions
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        questions.expect_update().never();

        let service = QuestionService::new(Arc::new(questions), tag_service());
        let question = service
            .update(id, owner, UpdateQuestionRequest::default())
            .await
            .unwrap();

        assert_eq!(question.points, 5);
    }

    #[actix_web::test]
    async fn test_delete_missing_question() {
        let mut questions = MockQuestionRepository::new();
        questions.expect_delete().returning(|_, _| Ok(false));

        let service = QuestionService::new(Arc::new(questions), tag_service());

        assert!(matches!(
            service.delete(ObjectId::new(), ObjectId::new()).await,
            Err(AppError::NotFound(Resource::Question))
        ));
    }
}
