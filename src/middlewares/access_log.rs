//! 접근 로그
//!
//! actix `Logger` 는 자신보다 안쪽에서 만들어진 응답 헤더만 볼 수 있습니다.
//! `%{x-request-id}o` 가 채워지려면 `request_id` 미들웨어를 `access_logger()` 보다 먼저
//! `.wrap` 해서 안쪽에 두어야 합니다.
//!
//! ```rust,ignore
//! App::new()
//!     .wrap(from_fn(request_id))   // 안쪽
//!     .wrap(access_logger())       // 바깥쪽
//! ```

use actix_web::middleware::Logger;

/// 원격 주소, 요청 줄, 상태, 바이트 수, 처리 시간, 요청 ID
pub const ACCESS_LOG_FORMAT: &str = r#"%a "%r" %s %b %Dms [%{x-request-id}o]"#;

pub fn access_logger() -> Logger {
    Logger::new(ACCESS_LOG_FORMAT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use actix_web::middleware::from_fn;
    use actix_web::{test, web, App, HttpResponse};
    use log::{Level, LevelFilter, Log, Metadata, Record};

    use crate::middlewares::request_id;

    static LINES: Mutex<Vec<String>> = Mutex::new(Vec::new());

    /// info 이상 로그 줄을 모아 두는 테스트용 로거
    struct CaptureLogger;

    impl Log for CaptureLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= Level::Info
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                LINES.lock().unwrap().push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLogger = CaptureLogger;

    #[actix_web::test]
    async fn test_access_log_contains_request_id() {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(LevelFilter::Info);

        let app = test::init_service(
            App::new()
                .wrap(from_fn(request_id))
                .wrap(access_logger())
                .route("/ping", web::get().to(HttpResponse::Ok)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header(("x-request-id", "trace-7f3a"))
            .to_request();
        test::call_and_read_body(&app, req).await;

        let lines = LINES.lock().unwrap();
        let line = lines
            .iter()
            .find(|line| line.contains("\"GET /ping"))
            .expect("access log line");
        assert!(line.ends_with("[trace-7f3a]"), "{}", line);
    }
}
