use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use crate::{
    cached,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{CatalogueSummary, ScoredTitle, TitleMatch},
};

use super::{
    report::{build_report, CatalogueReport, ReportFilter},
    snapshot::{CatalogueSnapshot, EngineSettings},
    sources::CatalogueSource,
};

/// Optional result cache and the lifetime of its entries
#[derive(Clone)]
pub struct ResultCache {
    pub cache: Cache,
    pub ttl: u64,
}

/// Owns the published catalogue snapshot and rebuilds it from its source
///
/// Lookups clone the current `Arc` and never hold the lock while ranking. A
/// rebuild runs beside the published snapshot and replaces it with one pointer
/// swap, so readers always see a consistent matrix/index pair.
pub struct CatalogueService {
    source: Arc<dyn CatalogueSource>,
    settings: EngineSettings,
    current: RwLock<Arc<CatalogueSnapshot>>,
    rebuild_lock: Mutex<()>,
    results: Option<ResultCache>,
}

impl CatalogueService {
    /// Loads the catalogue and builds the first snapshot
    pub async fn load(
        source: Arc<dyn CatalogueSource>,
        settings: EngineSettings,
        results: Option<ResultCache>,
    ) -> AppResult<Self> {
        let snapshot = build_from(source.as_ref(), settings.clone()).await?;

        Ok(Self {
            source,
            settings,
            current: RwLock::new(Arc::new(snapshot)),
            rebuild_lock: Mutex::new(()),
            results,
        })
    }

    /// Currently published snapshot
    pub async fn snapshot(&self) -> Arc<CatalogueSnapshot> {
        self.current.read().await.clone()
    }

    /// Reloads the source, builds a new snapshot and publishes it
    ///
    /// On failure the previous snapshot stays published.
    pub async fn rebuild(&self) -> AppResult<CatalogueSummary> {
        let _guard = self.rebuild_lock.lock().await;
        let previous = self.snapshot().await.generation();

        let snapshot = match build_from(self.source.as_ref(), self.settings.clone()).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    generation = %previous,
                    "Catalogue rebuild failed, keeping current snapshot"
                );
                return Err(e);
            }
        };

        let summary = snapshot.summary();
        *self.current.write().await = Arc::new(snapshot);

        tracing::info!(
            previous = %previous,
            generation = %summary.generation,
            items = summary.item_count,
            "Catalogue snapshot published"
        );

        Ok(summary)
    }

    /// Scored recommendations for `title` from the current snapshot
    pub async fn recommend(
        &self,
        title: &str,
        n: usize,
    ) -> AppResult<(Arc<CatalogueSnapshot>, Vec<ScoredTitle>)> {
        let snapshot = self.snapshot().await;

        let recommendations = match &self.results {
            Some(ResultCache { cache, ttl }) => {
                let key = CacheKey::Recommendations {
                    generation: snapshot.generation(),
                    title: title.to_string(),
                    count: n,
                };
                let snapshot = snapshot.clone();
                let title = title.to_string();
                let computed: AppResult<Vec<ScoredTitle>> =
                    cached!(cache, key, *ttl, async move { snapshot.recommend_scored(&title, n) });
                computed?
            }
            None => snapshot.recommend_scored(title, n)?,
        };

        Ok((snapshot, recommendations))
    }

    pub async fn search_titles(&self, query: &str, limit: usize) -> Vec<TitleMatch> {
        self.snapshot().await.search_titles(query, limit)
    }

    pub async fn summary(&self) -> CatalogueSummary {
        self.snapshot().await.summary()
    }

    pub async fn report(&self, filter: &ReportFilter) -> CatalogueReport {
        build_report(self.snapshot().await.items(), filter)
    }
}

/// Loads items and runs the CPU-bound build on the blocking pool
async fn build_from(
    source: &dyn CatalogueSource,
    settings: EngineSettings,
) -> AppResult<CatalogueSnapshot> {
    let items = source.load().await?;
    tracing::info!(
        source = source.name(),
        items = items.len(),
        "Building catalogue snapshot"
    );

    tokio::task::spawn_blocking(move || CatalogueSnapshot::build(items, settings))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
}
