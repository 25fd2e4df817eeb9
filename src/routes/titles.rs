use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::TitleMatch,
    routes::AppState,
};

fn default_limit() -> usize {
    20
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    q: String,
    #[serde(default = "default_limit")]
    limit: usize,
}

/// Handler for title search endpoint
pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> AppResult<Json<Vec<TitleMatch>>> {
    if params.q.trim().is_empty() {
        return Err(AppError::InvalidInput("q must not be empty".to_string()));
    }

    let titles = state.catalogue.search_titles(&params.q, params.limit).await;
    Ok(Json(titles))
}
