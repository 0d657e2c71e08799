//! 외부 이미지 호스팅 (imgbb)
//!
//! 업로드 API 형식:
//!
//! ```text
//! POST https://api.imgbb.com/1/upload?key=API_KEY
//! Content-Type: application/x-www-form-urlencoded
//!
//! image=<base64>&name=<file name>
//! ```

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;

use crate::config::ImgbbConfig;
use crate::core::errors::{AppError, ErrorContext};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageHost: Send + Sync {
    /// 이미지를 올리고 공개 URL 을 돌려줍니다.
    async fn upload(&self, name: String, bytes: Vec<u8>) -> Result<String, AppError>;
}

#[derive(Debug, Deserialize)]
struct ImgbbResponse {
    data: ImgbbData,
}

#[derive(Debug, Deserialize)]
struct ImgbbData {
    display_url: String,
}

pub struct ImgbbImageHost {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl ImgbbImageHost {
    pub fn new(config: &ImgbbConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl ImageHost for ImgbbImageHost {
    async fn upload(&self, name: String, bytes: Vec<u8>) -> Result<String, AppError> {
        if self.api_key.is_empty() {
            return Err(AppError::ExternalServiceError(
                "imgbb.api_key 가 설정되지 않았습니다".to_string(),
            ));
        }

        let params = [("image", STANDARD.encode(&bytes)), ("name", name)];

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("imgbb 요청 실패: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalServiceError(format!(
                "imgbb 업로드 실패 ({}): {}",
                status, error_text
            )));
        }

        response
            .json::<ImgbbResponse>()
            .await
            .map(|body| body.data.display_url)
            .map_err(|e| AppError::ExternalServiceError(format!("imgbb 응답 파싱 실패: {}", e)))
    }
}
