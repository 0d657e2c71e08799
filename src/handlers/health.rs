//! 헬스체크 엔드포인트
//!
//! 로드밸런서와 모니터링용입니다. 저장소 연결 상태는 확인하지 않습니다.

use actix_web::{get, HttpResponse};
use serde_json::json;

/// `GET /health`
#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// `GET /api/v1/ping`
#[get("/ping")]
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().body("pong")
}
