/// Ingredient dictionary client
///
/// API Flow:
/// 1. Detail: /ingredients/{id} → `{"ID", "Name"}`, 404 when unknown
/// 2. Substitutes: /ingredients/{id}/substitutes → array, 404/405 while the
///    endpoint is not deployed
use reqwest::{Client as HttpClient, StatusCode};

use crate::{
    error::AppResult,
    models::{IngredientDetail, IngredientSubstitute},
    services::providers::{endpoint, ensure_success, DictionaryProvider},
};

#[derive(Clone)]
pub struct DictionaryServiceProvider {
    http_client: HttpClient,
    api_url: String,
}

impl DictionaryServiceProvider {
    pub fn new(http_client: HttpClient, api_url: String) -> Self {
        Self {
            http_client,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl DictionaryProvider for DictionaryServiceProvider {
    async fn fetch_ingredient(&self, ingredient_id: &str) -> AppResult<Option<IngredientDetail>> {
        let url = endpoint(&self.api_url, &["ingredients", ingredient_id])?;

        let response = self.http_client.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!(ingredient_id = %ingredient_id, "Ingredient not in dictionary");
            return Ok(None);
        }

        let response = ensure_success(response, "dictionary").await?;
        let detail: IngredientDetail = response.json().await?;

        Ok(Some(detail))
    }

    async fn fetch_substitutes(
        &self,
        ingredient_id: &str,
    ) -> AppResult<Vec<IngredientSubstitute>> {
        let url = endpoint(&self.api_url, &["ingredients", ingredient_id, "substitutes"])?;

        let response = self.http_client.get(url).send().await?;
        if matches!(
            response.status(),
            StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED
        ) {
            return Ok(Vec::new());
        }

        let response = ensure_success(response, "dictionary").await?;
        let substitutes: Option<Vec<IngredientSubstitute>> = response.json().await?;

        Ok(substitutes.unwrap_or_default())
    }
}
