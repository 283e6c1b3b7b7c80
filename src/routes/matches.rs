use axum::{
    body::Bytes,
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::{MatchQueryRequest, MatchResult},
    routes::AppState,
};

/// Raw query string of `GET /matches`
///
/// Kept as strings so malformed values get our own error message.
#[derive(Debug, Default, Deserialize)]
pub struct MatchesQuery {
    pub allow_subs: Option<String>,
    pub max_missing: Option<String>,
}

impl MatchesQuery {
    /// Only the literal `true` enables substitutes
    pub fn allow_subs(&self) -> bool {
        self.allow_subs.as_deref() == Some("true")
    }

    /// Missing or empty means 0; anything that is not a non-negative integer
    /// is rejected
    pub fn max_missing(&self) -> AppResult<i64> {
        match self.max_missing.as_deref() {
            None | Some("") => Ok(0),
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|n| *n >= 0)
                .ok_or_else(|| {
                    AppError::InvalidInput(
                        "max_missing must be a non-negative integer".to_string(),
                    )
                }),
        }
    }
}

/// Scores all recipes against the current pantry
///
/// Query params:
/// - `allow_subs=true` treats in-pantry substitutes as equivalent
/// - `max_missing=N` keeps recipes missing at most N required ingredients
pub async fn get_matches(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<MatchesQuery>,
) -> AppResult<Json<Vec<MatchResult>>> {
    let allow_subs = params.allow_subs();
    let max_missing = params.max_missing()?;

    tracing::info!(
        request_id = %request_id,
        allow_subs,
        max_missing,
        "Processing match request"
    );

    let results = state.matching.score(allow_subs, max_missing).await?;

    Ok(Json(results))
}

/// "What can I cook tonight?"
///
/// The prompt and `pantry_constrained` flag are accepted for forward
/// compatibility; ranking is purely coverage-based and ignores substitutes.
/// The body is read as JSON whatever the `Content-Type` header says.
pub async fn query_matches(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    body: Bytes,
) -> AppResult<Json<Vec<MatchResult>>> {
    let request = parse_query_body(&body).map_err(|e| {
        tracing::debug!(request_id = %request_id, error = %e, "Rejected match query body");
        AppError::InvalidInput("invalid request body".to_string())
    })?;

    let max_missing = request.max_missing.max(0);

    tracing::info!(
        request_id = %request_id,
        prompt_len = request.prompt.len(),
        pantry_constrained = request.pantry_constrained,
        max_missing,
        "Processing match query"
    );

    let results = state.matching.score(false, max_missing).await?;

    Ok(Json(results))
}

fn parse_query_body(body: &[u8]) -> serde_json::Result<MatchQueryRequest> {
    serde_json::from_slice(body)
}
