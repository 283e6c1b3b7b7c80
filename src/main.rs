use std::sync::Arc;

use pantry_matching::{
    config::Config,
    routes::{create_router, AppState},
    services::{
        providers::{DictionaryServiceProvider, PantryServiceProvider, RecipeServiceProvider},
        MatchingService,
    },
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pantry_matching=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let http_client = reqwest::Client::builder()
        .timeout(config.http_timeout())
        .build()?;

    let matching = MatchingService::new(
        Arc::new(PantryServiceProvider::new(
            http_client.clone(),
            config.pantry_url.clone(),
        )),
        Arc::new(RecipeServiceProvider::new(
            http_client.clone(),
            config.recipe_url.clone(),
        )),
        Arc::new(DictionaryServiceProvider::new(
            http_client,
            config.dictionary_url.clone(),
        )),
    )
    .with_lookup_timeout(config.lookup_timeout());

    let app = create_router(AppState::new(matching));

    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        addr = %config.bind_addr(),
        pantry_url = %config.pantry_url,
        recipe_url = %config.recipe_url,
        dictionary_url = %config.dictionary_url,
        "Matching service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
