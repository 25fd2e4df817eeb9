pub mod catalogue;
pub mod compositor;
pub mod recommender;
pub mod report;
pub mod similarity;
pub mod snapshot;
pub mod sources;
pub mod stop_words;
pub mod title_index;
pub mod vectorizer;

pub use catalogue::{CatalogueService, ResultCache};
pub use snapshot::{CatalogueSnapshot, EngineSettings};
pub use title_index::AmbiguityPolicy;
