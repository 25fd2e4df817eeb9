use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{error::AppResult, models::CatalogueItem};

use super::CatalogueSource;

/// Catalogue held in memory; replacing its items takes effect on the next rebuild
#[derive(Clone, Default)]
pub struct InMemorySource {
    items: Arc<RwLock<Vec<CatalogueItem>>>,
}

impl InMemorySource {
    pub fn new(items: Vec<CatalogueItem>) -> Self {
        Self {
            items: Arc::new(RwLock::new(items)),
        }
    }

    pub async fn replace(&self, items: Vec<CatalogueItem>) {
        *self.items.write().await = items;
    }
}

#[async_trait::async_trait]
impl CatalogueSource for InMemorySource {
    async fn load(&self) -> AppResult<Vec<CatalogueItem>> {
        Ok(self.items.read().await.clone())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
