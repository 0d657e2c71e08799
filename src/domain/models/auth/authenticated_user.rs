//! 인증된 요청 주체
//!
//! 인증 미들웨어가 액세스 토큰을 검증하고 사용자 문서를 읽어 Request Extensions 에
//! 넣어 둡니다. 핸들러는 추출기로 꺼내 씁니다.

use std::future::{ready, Ready};

use actix_web::{FromRequest, HttpMessage, HttpRequest};
use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppError;
use crate::domain::entities::users::{Language, User, ADMIN_ROLE};

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: ObjectId,
    pub roles: Vec<String>,
    pub country_id: Option<ObjectId>,
    pub language: Language,
}

impl AuthenticatedUser {
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLE)
    }
}

impl TryFrom<&User> for AuthenticatedUser {
    type Error = AppError;

    fn try_from(user: &User) -> Result<Self, Self::Error> {
        let user_id = user
            .id
            .ok_or_else(|| AppError::InternalError("사용자 ID가 없습니다".to_string()))?;

        Ok(Self {
            user_id,
            roles: user.roles.clone(),
            country_id: user.settings.country_id,
            language: user.settings.language,
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>() {
            Some(user) => ready(Ok(user.clone())),
            None => ready(Err(AppError::AuthenticationError(
                "인증되지 않은 요청입니다".to_string(),
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OptionalUser(pub Option<AuthenticatedUser>);

impl FromRequest for OptionalUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        let user = req.extensions().get::<AuthenticatedUser>().cloned();
        ready(Ok(OptionalUser(user)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::users::{NewUser, UserSettings};

    #[test]
    fn test_from_user_requires_id() {
        let mut user = User::new(NewUser {
            name: "Bob".to_string(),
            username: "bob".to_string(),
            email: "bob@example.com".to_string(),
            password_hash: "hash".to_string(),
            points: 10,
            referral_code: "CAFEBABE".to_string(),
            settings: UserSettings::default(),
        });

        assert!(AuthenticatedUser::try_from(&user).is_err());

        user.id = Some(ObjectId::new());
        user.roles.push("admin".to_string());
        let principal = AuthenticatedUser::try_from(&user).unwrap();
        assert!(principal.is_admin());
        assert!(principal.has_role("user"));
        assert_eq!(principal.language, Language::En);
    }
}
