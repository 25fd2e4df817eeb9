use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::CatalogueItem,
};

use super::{records::parse_catalogue_csv, CatalogueSource};

/// Downloads the catalogue CSV over HTTP
#[derive(Clone)]
pub struct HttpSource {
    http_client: HttpClient,
    url: String,
}

impl HttpSource {
    pub fn new(url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            url,
        }
    }
}

#[async_trait::async_trait]
impl CatalogueSource for HttpSource {
    async fn load(&self) -> AppResult<Vec<CatalogueItem>> {
        let response = self.http_client.get(&self.url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "Catalogue download returned status {}: {}",
                status, body
            )));
        }

        let bytes = response.bytes().await?;
        let items = parse_catalogue_csv(bytes.as_ref())?;

        tracing::info!(url = %self.url, items = items.len(), "Catalogue downloaded");

        Ok(items)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
