/// Upstream data providers
///
/// The matching service reads from three collaborators: the pantry inventory,
/// the recipe catalog and the ingredient dictionary. Each is hidden behind a
/// trait so the scoring pipeline can be driven by HTTP clients in production
/// and by in-memory fakes or mocks in tests.
use reqwest::{Response, StatusCode, Url};

use crate::{
    error::{AppError, AppResult},
    models::{IngredientDetail, IngredientSubstitute, PantryItem, Recipe},
};

pub mod dictionary;
pub mod pantry;
pub mod recipes;

pub use dictionary::DictionaryServiceProvider;
pub use pantry::PantryServiceProvider;
pub use recipes::RecipeServiceProvider;

/// Source of the current pantry inventory
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PantryProvider: Send + Sync {
    /// Returns the full inventory in a single call
    async fn fetch_pantry(&self) -> AppResult<Vec<PantryItem>>;
}

/// Source of the recipe catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait RecipeProvider: Send + Sync {
    /// Returns the full catalog in a single call
    async fn fetch_recipes(&self) -> AppResult<Vec<Recipe>>;
}

/// Ingredient dictionary: display names and substitutes
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait DictionaryProvider: Send + Sync {
    /// Fetch a single ingredient
    ///
    /// Returns `Ok(None)` when the dictionary does not know the id.
    async fn fetch_ingredient(&self, ingredient_id: &str) -> AppResult<Option<IngredientDetail>>;

    /// Fetch the substitutes recorded for an ingredient
    ///
    /// An unavailable endpoint is reported the same way as "no substitutes":
    /// an empty list, not an error.
    async fn fetch_substitutes(&self, ingredient_id: &str)
        -> AppResult<Vec<IngredientSubstitute>>;
}

/// Joins path segments onto a service base URL, escaping each segment
pub(crate) fn endpoint(base_url: &str, segments: &[&str]) -> AppResult<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| AppError::Internal(format!("Invalid base URL {}: {}", base_url, e)))?;

    url.path_segments_mut()
        .map_err(|_| AppError::Internal(format!("Base URL {} cannot take a path", base_url)))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

/// Converts anything but `200 OK` into an `ExternalApi` error
pub(crate) async fn ensure_success(response: Response, service: &str) -> AppResult<Response> {
    if response.status() == StatusCode::OK {
        return Ok(response);
    }

    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    tracing::error!(
        service = service,
        status = %status,
        body = %body,
        "Upstream request failed"
    );
    Err(AppError::ExternalApi(format!(
        "{} service returned {}",
        service,
        status.as_u16()
    )))
}
