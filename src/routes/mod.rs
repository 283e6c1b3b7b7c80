use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::{any::Any, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::{
    error::AppError,
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::MatchingService,
};

pub mod matches;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub matching: Arc<MatchingService>,
}

impl AppState {
    pub fn new(matching: MatchingService) -> Self {
        Self {
            matching: Arc::new(matching),
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    with_middleware(
        Router::new()
            .route("/healthz", get(health_check))
            .route("/matches", get(matches::get_matches))
            .route("/matches/query", post(matches::query_matches))
            .with_state(state),
    )
}

fn with_middleware(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(middleware::from_fn(request_id_middleware))
            .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
            .layer(CorsLayer::permissive())
            .layer(CatchPanicLayer::custom(handle_panic)),
    )
}

/// Turns a handler panic into a JSON 500
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");
    AppError::Internal("handler panicked".to_string()).into_response()
}

/// Health check endpoint
async fn health_check() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
