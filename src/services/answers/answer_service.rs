//! 답변 서비스
//!
//! ## 채택(verify)
//!
//! 질문 작성자가 다른 사용자의 답변 하나를 채택하면 질문에 걸린 포인트가
//! 질문 작성자에게서 답변 작성자에게로 옮겨집니다.
//!
//! 1. 질문의 `verified_answer_id: null → answer_id` 조건부 갱신으로 질문 단위 채택을 선점합니다.
//!    동시에 들어온 두 채택 중 하나만 통과합니다.
//! 2. 답변의 `is_verified: false → true` 조건부 갱신. 실패하면 질문 선점을 풉니다.
//! 3. 질문 작성자 포인트 차감. 잔액 부족이면 채택을 되돌리고 `InsufficientPoints`.
//! 4. 답변 작성자 포인트 지급. 실패하면 차감분을 돌려주고 채택을 되돌립니다.
//!
//! 여러 문서에 걸친 트랜잭션은 쓰지 않으므로 되돌리기 자체가 실패하면 로그만 남습니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::core::errors::{AppError, Resource};
use crate::domain::dto::answers::{CreateAnswerRequest, UpdateAnswerRequest};
use crate::domain::entities::answers::{Answer, AnswerFilter};
use crate::repositories::answers::AnswerRepository;
use crate::services::questions::QuestionService;
use crate::services::users::UserService;
use crate::utils::string_utils::parse_object_id;

pub struct AnswerService {
    answers: Arc<dyn AnswerRepository>,
    questions: Arc<QuestionService>,
    users: Arc<UserService>,
}

impl AnswerService {
    pub fn new(
        answers: Arc<dyn AnswerRepository>,
        questions: Arc<QuestionService>,
        users: Arc<UserService>,
    ) -> Self {
        Self {
            answers,
            questions,
            users,
        }
    }

    /// 존재하는 질문에만 답변할 수 있습니다.
    pub async fn create(
        &self,
        user_id: ObjectId,
        request: CreateAnswerRequest,
    ) -> Result<Answer, AppError> {
        let question_id = parse_object_id(&request.question_id, "question_id")?;
        self.questions.get_by_id(question_id).await?;

        let answer = Answer::new(request.text.trim().to_string(), question_id, user_id);
        let answer = self.answers.create(answer).await?;

        log::info!("💬 답변 작성: {:?} → 질문 {}", answer.id, question_id);
        Ok(answer)
    }

    pub async fn get_by_id(&self, id: ObjectId) -> Result<Answer, AppError> {
        self.answers
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Resource::Answer))
    }

    pub async fn get_all(&self, filter: AnswerFilter) -> Result<Vec<Answer>, AppError> {
        self.answers.find_all(filter).await
    }

    pub async fn update(
        &self,
        id: ObjectId,
        user_id: ObjectId,
        request: UpdateAnswerRequest,
    ) -> Result<Answer, AppError> {
        match request.text {
            Some(text) => self.answers.update_text(id, user_id, text.trim().to_string()).await,
            None => {
                let answer = self.get_by_id(id).await?;
                if answer.user_id != user_id {
                    return Err(AppError::NotFound(Resource::Answer));
                }
                Ok(answer)
            }
        }
    }

    pub async fn delete(&self, id: ObjectId, user_id: ObjectId) -> Result<(), AppError> {
        if !self.answers.delete(id, user_id).await? {
            return Err(AppError::NotFound(Resource::Answer));
        }
        log::info!("🗑️ 답변 삭제: {}", id);
        Ok(())
    }

    pub async fn like(&self, id: ObjectId) -> Result<Answer, AppError> {
        self.answers.add_like(id).await
    }

    pub async fn unlike(&self, id: ObjectId) -> Result<Answer, AppError> {
        self.answers.remove_like(id).await
    }

    /// 질문 작성자가 답변을 채택합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthorizationError` - 질문 작성자가 아님
    /// * `AppError::ValidationError` - 자기 답변, 이미 채택된 답변/질문
    /// * `AppError::InsufficientPoints` - 질문 작성자의 포인트 부족
    pub async fn verify(&self, id: ObjectId, user_id: ObjectId) -> Result<Answer, AppError> {
        let answer = self.get_by_id(id).await?;
        let question = self.questions.get_by_id(answer.question_id).await?;

        if question.user_id != user_id {
            return Err(AppError::AuthorizationError(
                "only the question author can verify answers".to_string(),
            ));
        }
        if answer.user_id == user_id {
            return Err(AppError::ValidationError(
                "cannot verify your own answer".to_string(),
            ));
        }

        if answer.is_verified {
            return Err(AppError::ValidationError("answer already verified".to_string()));
        }

        let question_id = answer.question_id;
        if !self.questions.claim_verified_answer(question_id, id).await? {
            return Err(AppError::ValidationError(
                "question already has a verified answer".to_string(),
            ));
        }

        let flipped = self.answers.set_verified(id, false, true).await;
        match flipped {
            Ok(true) => {}
            Ok(false) => {
                self.release_claim(question_id, id).await;
                return Err(AppError::ValidationError("answer already verified".to_string()));
            }
            Err(e) => {
                self.release_claim(question_id, id).await;
                return Err(e);
            }
        }

        if question.points > 0 {
            let transferred = self
                .transfer_points(question.user_id, answer.user_id, question.points)
                .await;
            if let Err(e) = transferred {
                self.revert_verification(id).await;
                self.release_claim(question_id, id).await;
                return Err(e);
            }
        }

        log::info!(
            "✅ 답변 채택: {} ({} 포인트 → {})",
            id,
            question.points,
            answer.user_id
        );
        self.get_by_id(id).await
    }

    async fn transfer_points(
        &self,
        from: ObjectId,
        to: ObjectId,
        points: i64,
    ) -> Result<(), AppError> {
        self.users.adjust_points(from, -points).await?;

        if let Err(e) = self.users.adjust_points(to, points).await {
            if let Err(refund) = self.users.adjust_points(from, points).await {
                log::error!("❌ 포인트 환불 실패 ({} ← {}): {}", from, points, refund);
            }
            return Err(e);
        }

        Ok(())
    }

    async fn revert_verification(&self, id: ObjectId) {
        if let Err(e) = self.answers.set_verified(id, true, false).await {
            log::error!("❌ 채택 되돌리기 실패 ({}): {}", id, e);
        }
    }

    async fn release_claim(&self, question_id: ObjectId, answer_id: ObjectId) {
        if let Err(e) = self
            .questions
            .release_verified_answer(question_id, answer_id)
            .await
        {
            log::error!("❌ 질문 채택 선점 해제 실패 ({}): {}", question_id, e);
        }
    }
}
