//! 이미지 업로드 서비스
//!
//! 파일 이름은 내용의 SHA-256 hex 입니다. 같은 이미지는 같은 이름으로 올라갑니다.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::core::errors::AppError;
use crate::repositories::images::ImageHost;

/// 업로드 허용 최대 크기 (바이트)
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

pub struct ImageService {
    host: Arc<dyn ImageHost>,
}

/// 내용 기반 파일 이름
pub fn image_name(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// PNG, JPEG, GIF, WebP 시그니처만 받습니다.
pub fn is_supported_image(bytes: &[u8]) -> bool {
    bytes.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A])
        || bytes.starts_with(&[0xFF, 0xD8, 0xFF])
        || bytes.starts_with(b"GIF87a")
        || bytes.starts_with(b"GIF89a")
        || (bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP")
}

impl ImageService {
    pub fn new(host: Arc<dyn ImageHost>) -> Self {
        Self { host }
    }

    /// 이미지를 외부 호스팅에 올리고 공개 URL 을 돌려줍니다.
    pub async fn upload(&self, bytes: Vec<u8>) -> Result<String, AppError> {
        if bytes.is_empty() {
            return Err(AppError::ValidationError("image is empty".to_string()));
        }
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(AppError::ValidationError(format!(
                "image must be at most {} bytes",
                MAX_IMAGE_BYTES
            )));
        }
        if !is_supported_image(&bytes) {
            return Err(AppError::ValidationError(
                "unsupported image format".to_string(),
            ));
        }

        let name = image_name(&bytes);
        let size = bytes.len();
        let url = self.host.upload(name.clone(), bytes).await?;

        log::info!("🖼️ 이미지 업로드: {} ({} bytes)", name, size);
        Ok(url)
    }
}
