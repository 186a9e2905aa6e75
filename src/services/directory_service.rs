use reqwest::Method;

use crate::api::{endpoints, ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::models::{Id, Package, Psychologist};

/// Public psychologist listing browsed by clients and visitors.
pub struct DirectoryService<'a> {
    api: &'a ApiClient,
}

impl<'a> DirectoryService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub async fn psychologists(
        &self,
        search: Option<&str>,
        specialization: Option<&str>,
    ) -> Result<Vec<Psychologist>, ApiError> {
        let options = RequestOptions::new(Method::GET)
            .query("search", search.filter(|s| !s.trim().is_empty()))
            .query("specialization", specialization.filter(|s| !s.trim().is_empty()));
        self.api.request(endpoints::PSYCHOLOGISTS, options).await
    }

    pub async fn psychologist(&self, id: &Id) -> Result<Psychologist, ApiError> {
        self.api.get(&endpoints::psychologist(id)).await
    }

    pub async fn packages(&self, psychologist_id: &Id) -> Result<Vec<Package>, ApiError> {
        let packages: Vec<Package> = self
            .api
            .get(&endpoints::psychologist_packages(psychologist_id))
            .await?;
        Ok(packages.into_iter().filter(|p| p.is_active).collect())
    }
}
