//! 이메일 발송 서비스
//!
//! 계정 서비스는 [`EmailSender`] 트레이트에만 의존합니다.
//!
//! - [`SmtpEmailSender`]: lettre 비동기 SMTP 전송 (`smtp.enabled = true`)
//! - [`LogEmailSender`]: 실제로 보내지 않고 로그만 남깁니다 (개발/테스트)

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::SmtpConfig;
use crate::core::errors::{AppError, ErrorContext};
use crate::domain::entities::users::Language;
use crate::domain::models::email::EmailMessage;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// 언어별 제목/본문으로 메시지를 만들어 보냅니다.
    async fn send(&self, to: String, message: EmailMessage, language: Language)
        -> Result<(), AppError>;
}

pub struct SmtpEmailSender {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpEmailSender {
    pub fn new(config: &SmtpConfig) -> Result<Self, AppError> {
        let mailer = if config.username.is_empty() {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                .port(config.port)
                .build()
        } else {
            let creds = Credentials::new(config.username.clone(), config.password.clone());
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
                .with_context(|| format!("SMTP 전송 생성 실패 ({})", config.host))?
                .port(config.port)
                .credentials(creds)
                .build()
        };

        Ok(Self {
            mailer,
            from: config.from.clone(),
        })
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    async fn send(
        &self,
        to: String,
        message: EmailMessage,
        language: Language,
    ) -> Result<(), AppError> {
        let from = self
            .from
            .parse::<Mailbox>()
            .with_context(|| format!("잘못된 발신 주소 {}", self.from))?;
        let recipient = to
            .parse()
            .map_err(|e| AppError::ValidationError(format!("invalid email address: {}", e)))?;

        let email = Message::builder()
            .from(from)
            .to(recipient)
            .subject(message.subject(language))
            .header(ContentType::TEXT_HTML)
            .body(message.render_html(language))
            .context("메일 작성 실패")?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("메일 발송 실패: {}", e)))?;

        log::info!("📧 {} 메일 발송: {}", message.kind(), to);
        Ok(())
    }
}

/// SMTP 가 꺼져 있을 때 쓰는 발송기
#[derive(Debug, Default)]
pub struct LogEmailSender;

#[async_trait]
impl EmailSender for LogEmailSender {
    async fn send(
        &self,
        to: String,
        message: EmailMessage,
        language: Language,
    ) -> Result<(), AppError> {
        log::info!(
            "📭 SMTP 비활성화, {} 메일 생략: {} ({}) \"{}\"",
            message.kind(),
            to,
            language.as_str(),
            message.subject(language)
        );
        Ok(())
    }
}
