use std::path::PathBuf;

use crate::{error::AppResult, models::CatalogueItem};

use super::{records::parse_catalogue_csv, CatalogueSource};

/// Reads the catalogue from a local CSV file
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CatalogueSource for FileSource {
    async fn load(&self) -> AppResult<Vec<CatalogueItem>> {
        let bytes = tokio::fs::read(&self.path).await?;
        let items = parse_catalogue_csv(bytes.as_slice())?;

        tracing::info!(
            path = %self.path.display(),
            items = items.len(),
            "Catalogue loaded from file"
        );

        Ok(items)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
