/// Pantry service client
///
/// `GET {base}/pantry` returns the whole inventory as a JSON array, or `null`
/// when the pantry is empty.
use reqwest::Client as HttpClient;

use crate::{
    error::AppResult,
    models::PantryItem,
    services::providers::{endpoint, ensure_success, PantryProvider},
};

#[derive(Clone)]
pub struct PantryServiceProvider {
    http_client: HttpClient,
    api_url: String,
}

impl PantryServiceProvider {
    pub fn new(http_client: HttpClient, api_url: String) -> Self {
        Self {
            http_client,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl PantryProvider for PantryServiceProvider {
    async fn fetch_pantry(&self) -> AppResult<Vec<PantryItem>> {
        let url = endpoint(&self.api_url, &["pantry"])?;

        let response = self.http_client.get(url).send().await?;
        let response = ensure_success(response, "pantry").await?;
        let items: Option<Vec<PantryItem>> = response.json().await?;
        let items = items.unwrap_or_default();

        tracing::debug!(items = items.len(), "Pantry fetched");

        Ok(items)
    }
}
