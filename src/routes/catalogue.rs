use axum::{extract::State, Extension, Json};
use std::sync::Arc;

use crate::{
    error::AppResult, middleware::request_id::RequestId, models::CatalogueSummary,
    routes::AppState,
};

/// Describes the currently published snapshot
pub async fn summary(State(state): State<Arc<AppState>>) -> Json<CatalogueSummary> {
    Json(state.catalogue.summary().await)
}

/// Reloads the catalogue source and publishes a fresh snapshot
pub async fn rebuild(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
) -> AppResult<Json<CatalogueSummary>> {
    tracing::info!(request_id = %request_id, "Catalogue rebuild requested");

    let summary = state.catalogue.rebuild().await?;

    tracing::info!(
        request_id = %request_id,
        generation = %summary.generation,
        build_time_ms = summary.build_time_ms,
        "Catalogue rebuild completed"
    );

    Ok(Json(summary))
}
