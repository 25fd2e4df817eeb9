/// Catalogue data sources
///
/// The recommendation pipeline always rebuilds from the full catalogue, so every
/// source hands back the complete list of items in a stable order. Row order
/// becomes item index and therefore the tie-break order of rankings.
use std::sync::Arc;

use crate::{
    config::{Config, SourceKind},
    error::{AppError, AppResult},
    models::CatalogueItem,
};

pub mod file;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod records;

pub use file::FileSource;
pub use http::HttpSource;
pub use memory::InMemorySource;
pub use postgres::PostgresSource;

/// Trait for catalogue sources
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogueSource: Send + Sync {
    /// Loads every catalogue item
    async fn load(&self) -> AppResult<Vec<CatalogueItem>>;

    /// Source name for logging
    fn name(&self) -> &'static str;
}

/// Creates the source selected by configuration
pub async fn from_config(config: &Config) -> AppResult<Arc<dyn CatalogueSource>> {
    let source: Arc<dyn CatalogueSource> = match config.catalogue_source {
        SourceKind::File => Arc::new(FileSource::new(&config.catalogue_path)),
        SourceKind::Http => {
            let url = config.catalogue_url.clone().ok_or_else(|| {
                AppError::InvalidInput("CATALOGUE_URL is required for the http source".to_string())
            })?;
            Arc::new(HttpSource::new(url))
        }
        SourceKind::Postgres => {
            let database_url = config.database_url.as_deref().ok_or_else(|| {
                AppError::InvalidInput(
                    "DATABASE_URL is required for the postgres source".to_string(),
                )
            })?;
            let pool = crate::db::create_pool(database_url).await?;
            Arc::new(PostgresSource::new(pool))
        }
    };

    tracing::info!(source = source.name(), "Catalogue source configured");
    Ok(source)
}
