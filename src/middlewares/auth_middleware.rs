//! JWT 인증 미들웨어
//!
//! ActixWeb 요청 파이프라인에서 액세스 토큰을 검증하고 사용자 정보를 Request Extensions 에 넣습니다.
//! 토큰 검증과 사용자 조회는 `web::Data<AppState>` 의 `UserService` 를 씁니다.
//!
//! | 상황 | Required | Optional |
//! |------|----------|----------|
//! | 토큰 없음/잘못됨/만료 | 401 `ERR_UNAUTHORIZED` | 익명 통과 |
//! | 차단된 사용자 | 403 `ERR_USER_BLOCKED` | 403 `ERR_USER_BLOCKED` |
//! | 역할 부족 | 403 `ERR_FORBIDDEN` | - |

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::domain::models::auth::{AuthMode, RequiredRole};
use crate::middlewares::auth_inner::AuthMiddlewareService;

/// JWT 인증 미들웨어
pub struct AuthMiddleware {
    /// 인증 모드 (Required/Optional)
    mode: AuthMode,
    /// 접근에 필요한 역할 (선택사항)
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            required_role: None,
        }
    }

    pub fn new_with_role(mode: AuthMode, required_role: RequiredRole) -> Self {
        Self {
            mode,
            required_role: Some(required_role),
        }
    }

    /// 필수 인증 미들웨어 생성
    pub fn required() -> Self {
        Self::new(AuthMode::Required)
    }

    /// 선택적 인증 미들웨어 생성
    pub fn optional() -> Self {
        Self::new(AuthMode::Optional)
    }

    /// 특정 역할 요구 인증 미들웨어 생성
    pub fn required_with_role(role: &str) -> Self {
        Self::new_with_role(AuthMode::Required, RequiredRole::new(role))
    }
}

/// ActixWeb Transform trait 구현
impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            mode: self.mode.clone(),
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, web, App, HttpResponse};

    use crate::domain::dto::users::SignUpRequest;
    use crate::domain::models::auth::AuthenticatedUser;
    use crate::test_support::{user_only_state, UserFixture};

    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id.to_hex())
    }

    async fn access_token(fixture: &UserFixture) -> String {
        fixture
            .service
            .sign_up(SignUpRequest {
                name: "Alice".to_string(),
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                password: "Secr3t!".to_string(),
                country_id: None,
                language: None,
                referral_code: None,
            })
            .await
            .unwrap()
            .access_token
    }

    #[actix_web::test]
    async fn test_required_mode() {
        let fixture = UserFixture::new();
        let token = access_token(&fixture).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(user_only_state(&fixture)))
                .service(
                    web::scope("/private")
                        .wrap(AuthMiddleware::required())
                        .route("", web::get().to(whoami)),
                ),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/private").to_request())
            .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/private")
            .insert_header(("Authorization", "Bearer not.a.jwt"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/private")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let body = test::call_and_read_body(&app, req).await;
        let alice = fixture.users.by_username("alice").unwrap().id.unwrap();
        assert_eq!(body, alice.to_hex().as_bytes());
    }

    #[actix_web::test]
    async fn test_optional_mode_lets_invalid_tokens_through() {
        let fixture = UserFixture::new();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(user_only_state(&fixture)))
                .service(
                    web::scope("/open")
                        .wrap(AuthMiddleware::optional())
                        .route("", web::get().to(HttpResponse::Ok)),
                ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/open")
            .insert_header(("Authorization", "Bearer expired-or-garbage"))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_role_requirement() {
        let fixture = UserFixture::new();
        let token = access_token(&fixture).await;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(user_only_state(&fixture)))
                .service(
                    web::scope("/moderation")
                        .wrap(AuthMiddleware::required_with_role("moderator"))
                        .route("", web::get().to(whoami)),
                ),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/moderation")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);

        fixture.users.grant_role("alice", "moderator");
        let req = test::TestRequest::get()
            .uri("/moderation")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }
}
