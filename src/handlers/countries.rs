//! # Country HTTP Handlers
//!
//! 이름은 `?lang=` 으로 고른 언어로 내려가며, 그 언어의 이름이 없으면 영어 이름입니다.
//! 생성은 관리자 전용입니다 ([`crate::handlers::admin::create_country`]).

use actix_web::{get, web, HttpResponse};

use crate::core::errors::AppError;
use crate::core::state::AppState;
use crate::domain::dto::countries::{CountryResponse, LanguageQuery};
use crate::domain::entities::users::Language;
use crate::domain::models::auth::OptionalUser;
use crate::utils::string_utils::parse_object_id;

/// 쿼리 > 로그인 사용자 설정 > 영어
fn resolve_language(query: &LanguageQuery, user: &OptionalUser) -> Language {
    match (&query.lang, &user.0) {
        (Some(lang), _) => Language::parse(lang),
        (None, Some(user)) => user.language,
        (None, None) => Language::En,
    }
}

#[get("")]
pub async fn list_countries(
    state: web::Data<AppState>,
    user: OptionalUser,
    query: web::Query<LanguageQuery>,
) -> Result<HttpResponse, AppError> {
    let language = resolve_language(&query, &user);

    let countries: Vec<CountryResponse> = state
        .countries
        .get_all()
        .await?
        .into_iter()
        .map(|country| CountryResponse::localized(country, language))
        .collect();
    Ok(HttpResponse::Ok().json(countries))
}

#[get("/{id}")]
pub async fn get_country(
    state: web::Data<AppState>,
    user: OptionalUser,
    path: web::Path<String>,
    query: web::Query<LanguageQuery>,
) -> Result<HttpResponse, AppError> {
    let id = parse_object_id(&path, "id")?;
    let language = resolve_language(&query, &user);

    let country = state.countries.get_by_id(id).await?;
    Ok(HttpResponse::Ok().json(CountryResponse::localized(country, language)))
}
