use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    middleware::request_id::RequestId,
    models::RecommendationResponse,
    routes::AppState,
};

/// Upper bound on the requested count
const MAX_RECOMMENDATIONS: usize = 100;

#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    pub title: String,
    pub n: Option<usize>,
}

/// Handler for the recommendations endpoint
pub async fn recommend(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Query(query): Query<RecommendationQuery>,
) -> AppResult<Json<RecommendationResponse>> {
    let n = query.n.unwrap_or(state.default_recommendation_count);
    if n > MAX_RECOMMENDATIONS {
        return Err(AppError::InvalidInput(format!(
            "n must be at most {}",
            MAX_RECOMMENDATIONS
        )));
    }

    tracing::info!(
        request_id = %request_id,
        title = %query.title,
        n,
        "Processing recommendation request"
    );

    let (snapshot, recommendations) = state.catalogue.recommend(&query.title, n).await?;

    Ok(Json(RecommendationResponse {
        title: query.title,
        generation: snapshot.generation(),
        recommendations,
    }))
}
