//! 국가 서비스

use std::collections::BTreeMap;
use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::core::errors::{AppError, Resource};
use crate::domain::entities::countries::Country;
use crate::repositories::countries::CountryRepository;

pub struct CountryService {
    countries: Arc<dyn CountryRepository>,
}

impl CountryService {
    pub fn new(countries: Arc<dyn CountryRepository>) -> Self {
        Self { countries }
    }

    /// 이름 앞뒤 공백은 잘라서 저장합니다.
    pub async fn create(&self, names: BTreeMap<String, String>) -> Result<Country, AppError> {
        let names = names
            .into_iter()
            .map(|(code, name)| (code, name.trim().to_string()))
            .collect();

        let country = self.countries.create(Country { id: None, names }).await?;
        log::info!("🌍 국가 생성: {:?}", country.id);
        Ok(country)
    }

    pub async fn get_by_id(&self, id: ObjectId) -> Result<Country, AppError> {
        self.countries
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound(Resource::Country))
    }

    pub async fn get_all(&self) -> Result<Vec<Country>, AppError> {
        self.countries.find_all().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::countries::MockCountryRepository;

    #[actix_web::test]
    async fn test_create_trims_names() {
        let mut repo = MockCountryRepository::new();
        repo.expect_create()
            .withf(|country| country.names.get("en").map(String::as_str) == Some("Poland"))
            .returning(|mut country| {
                country.id = Some(ObjectId::new());
                Ok(country)
            });

        let service = CountryService::new(Arc::new(repo));
        let names = BTreeMap::from([("en".to_string(), "  Poland ".to_string())]);

        let country = service.create(names).await.unwrap();

        assert!(country.id.is_some());
    }

    #[actix_web::test]
    async fn test_missing_country_is_not_found() {
        let mut repo = MockCountryRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = CountryService::new(Arc::new(repo));

        assert!(matches!(
            service.get_by_id(ObjectId::new()).await,
            Err(AppError::NotFound(Resource::Country))
        ));
    }
}
