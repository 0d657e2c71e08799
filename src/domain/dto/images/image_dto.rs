use serde::{Deserialize, Serialize};

/// 업로드된 이미지의 공개 URL
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageResponse {
    pub url: String,
}
