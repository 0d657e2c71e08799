//! API 라우트 설정 모듈
//!
//! 모든 API 는 `/api/v1` 아래에 있고 스코프 전체가 `AuthMiddleware::optional()` 로 감싸집니다.
//! 토큰이 있으면 사용자를 extension 에 넣고, 없거나 잘못되었으면 익명으로 통과시킵니다.
//! 인증이 필요한 핸들러는 `AuthenticatedUser` 추출기로 401 을 냅니다.
//!
//! 관리자 스코프(`/api/v1/admin`)만 `AuthMiddleware::required_with_role("admin")` 을 추가로 씁니다.
//!
//! ```text
//! /health
//! /api/v1
//! ├── /ping
//! ├── /users       가입, 로그인, 토큰, 내 정보, 즐겨찾기, 공개 프로필
//! ├── /questions
//! ├── /answers
//! ├── /tags
//! ├── /countries
//! ├── /images
//! └── /admin       (admin 역할 필수)
//! ```
//!
//! 같은 스코프 안에서 고정 경로(`/confirm`, `/country/{id}`)는 `/{id}` 보다 먼저 등록합니다.

use actix_web::web;

use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// 모든 라우트를 설정합니다
///
/// ```rust,ignore
/// let app = App::new().app_data(state.clone()).configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(handlers::health::health_check);

    cfg.service(
        web::scope("/api/v1")
            .wrap(AuthMiddleware::optional())
            .service(handlers::health::ping)
            .configure(configure_user_routes)
            .configure(configure_question_routes)
            .configure(configure_answer_routes)
            .configure(configure_tag_routes)
            .configure(configure_country_routes)
            .configure(configure_image_routes)
            .configure(configure_admin_routes),
    );
}

fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/users")
            .service(handlers::users::sign_up)
            .service(handlers::users::sign_in)
            .service(handlers::users::refresh_tokens)
            .service(handlers::users::sign_out)
            .service(handlers::users::confirm_email)
            .service(handlers::users::get_me)
            .service(handlers::users::update_me)
            .service(handlers::users::delete_me)
            .service(handlers::users::add_favorite)
            .service(handlers::users::remove_favorite)
            .service(handlers::users::get_user),
    );
}

fn configure_question_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/questions")
            .service(handlers::questions::list_questions)
            .service(handlers::questions::create_question)
            .service(handlers::questions::get_question)
            .service(handlers::questions::update_question)
            .service(handlers::questions::delete_question),
    );
}

fn configure_answer_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/answers")
            .service(handlers::answers::list_answers)
            .service(handlers::answers::create_answer)
            .service(handlers::answers::like_answer)
            .service(handlers::answers::unlike_answer)
            .service(handlers::answers::verify_answer)
            .service(handlers::answers::get_answer)
            .service(handlers::answers::update_answer)
            .service(handlers::answers::delete_answer),
    );
}

fn configure_tag_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tags")
            .service(handlers::tags::list_tags)
            .service(handlers::tags::create_tag)
            .service(handlers::tags::list_tags_by_country)
            .service(handlers::tags::get_tag),
    );
}

fn configure_country_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/countries")
            .service(handlers::countries::list_countries)
            .service(handlers::countries::get_country),
    );
}

fn configure_image_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/images").service(handlers::images::upload_image));
}

fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .wrap(AuthMiddleware::required_with_role("admin"))
            .service(handlers::admin::adjust_points)
            .service(handlers::admin::add_achievement)
            .service(handlers::admin::remove_achievement)
            .service(handlers::admin::confirm_user)
            .service(handlers::admin::block_user)
            .service(handlers::admin::unblock_user)
            .service(handlers::admin::create_country)
            .service(handlers::admin::delete_tag),
    );
}
