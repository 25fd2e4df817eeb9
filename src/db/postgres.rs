use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::error::AppResult;

/// Creates the PostgreSQL pool the catalogue source reads through
///
/// Catalogue loads are a single bulk query per rebuild, so the pool stays small.
pub async fn create_pool(database_url: &str) -> AppResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await?;

    tracing::info!("Connected to catalogue database");

    Ok(pool)
}
