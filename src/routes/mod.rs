use std::sync::Arc;

use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{middleware::request_id, services::CatalogueService};

pub mod catalogue;
pub mod recommendations;
pub mod report;
pub mod titles;

/// Shared handler state
pub struct AppState {
    pub catalogue: Arc<CatalogueService>,
    /// Count used when a recommendation request does not give one
    pub default_recommendation_count: usize,
}

impl AppState {
    pub fn new(catalogue: CatalogueService, default_recommendation_count: usize) -> Self {
        Self {
            catalogue: Arc::new(catalogue),
            default_recommendation_count,
        }
    }
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id::request_id_middleware))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(request_id::make_span_with_request_id),
                )
                .layer(CorsLayer::permissive()),
        )
}

/// API routes under /api/v1
fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/recommendations", get(recommendations::recommend))
        .route("/titles/search", get(titles::search))
        .route("/catalogue", get(catalogue::summary))
        .route("/catalogue/rebuild", post(catalogue::rebuild))
        .route("/report", get(report::report))
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
