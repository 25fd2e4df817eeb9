use std::sync::Arc;

use catalogue_recommender::{
    config::Config,
    db::{create_redis_client, Cache},
    routes::{create_router, AppState},
    services::{sources, CatalogueService, ResultCache},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalogue_recommender=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Result caching is optional
    let (results, cache_writer) = match &config.redis_url {
        Some(redis_url) => {
            let client = create_redis_client(redis_url)?;
            let (cache, handle) = Cache::new(client).await;
            tracing::info!(ttl = config.recommendation_cache_ttl, "Recommendation cache enabled");
            (
                Some(ResultCache {
                    cache,
                    ttl: config.recommendation_cache_ttl,
                }),
                Some(handle),
            )
        }
        None => (None, None),
    };

    let source = sources::from_config(&config).await?;
    let catalogue = CatalogueService::load(source, config.engine_settings(), results).await?;

    let state = Arc::new(AppState::new(
        catalogue,
        config.default_recommendation_count,
    ));
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    tracing::info!(host = %config.host, port = config.port, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = cache_writer {
        handle.shutdown().await;
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutting down");
}
