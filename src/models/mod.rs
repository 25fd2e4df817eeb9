use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod catalogue_item;
pub mod category;

pub use catalogue_item::{CatalogueItem, ContentType};
pub use category::Category;

/// A recommended title with its similarity to the query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredTitle {
    pub title: String,
    pub score: f64,
}

/// Response for a recommendation lookup
#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    /// The query title
    pub title: String,
    /// Snapshot the ranking was computed against
    pub generation: Uuid,
    pub recommendations: Vec<ScoredTitle>,
}

/// A title search hit
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TitleMatch {
    /// Row of the item in the current snapshot
    pub index: usize,
    pub title: String,
    pub content_type: Option<ContentType>,
    pub release_year: Option<i32>,
}

/// Description of a built catalogue snapshot
#[derive(Debug, Clone, Serialize)]
pub struct CatalogueSummary {
    pub generation: Uuid,
    pub item_count: usize,
    pub vocabulary_size: usize,
    /// Items whose document produced no terms
    pub zero_vector_count: usize,
    pub built_at: DateTime<Utc>,
    pub build_time_ms: u64,
}
