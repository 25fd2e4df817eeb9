use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    routes::AppState,
    services::report::{CatalogueReport, ReportFilter},
};

/// Handler for the exploratory report endpoint
pub async fn report(
    State(state): State<Arc<AppState>>,
    Query(filter): Query<ReportFilter>,
) -> AppResult<Json<CatalogueReport>> {
    if let (Some(from), Some(to)) = (filter.year_from, filter.year_to) {
        if from > to {
            return Err(AppError::InvalidInput(
                "year_from must not be after year_to".to_string(),
            ));
        }
    }

    Ok(Json(state.catalogue.report(&filter).await))
}
