/// Recipe catalog client
///
/// `GET {base}/recipes` returns every recipe with its ingredient lines.
use reqwest::Client as HttpClient;

use crate::{
    error::AppResult,
    models::Recipe,
    services::providers::{endpoint, ensure_success, RecipeProvider},
};

#[derive(Clone)]
pub struct RecipeServiceProvider {
    http_client: HttpClient,
    api_url: String,
}

impl RecipeServiceProvider {
    pub fn new(http_client: HttpClient, api_url: String) -> Self {
        Self {
            http_client,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl RecipeProvider for RecipeServiceProvider {
    async fn fetch_recipes(&self) -> AppResult<Vec<Recipe>> {
        let url = endpoint(&self.api_url, &["recipes"])?;

        let response = self.http_client.get(url).send().await?;
        let response = ensure_success(response, "recipe").await?;
        let recipes: Option<Vec<Recipe>> = response.json().await?;
        let recipes = recipes.unwrap_or_default();

        tracing::debug!(recipes = recipes.len(), "Recipe catalog fetched");

        Ok(recipes)
    }
}
