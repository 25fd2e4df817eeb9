use std::time::Instant;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{CatalogueItem, CatalogueSummary, ScoredTitle, TitleMatch},
};

use super::{
    compositor::{FeatureCompositor, DEFAULT_FIELD_SEPARATOR},
    recommender,
    similarity::SimilarityMatrix,
    title_index::{AmbiguityPolicy, TitleIndex},
    vectorizer::VectorSpace,
};

/// Settings that shape how a snapshot is built and queried
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub field_separator: String,
    pub ambiguity: AmbiguityPolicy,
    pub strict_count: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            field_separator: DEFAULT_FIELD_SEPARATOR.to_string(),
            ambiguity: AmbiguityPolicy::default(),
            strict_count: false,
        }
    }
}

/// Immutable result of one full pipeline run over the catalogue
///
/// Items, vector space, similarity matrix and title index are only consistent
/// with each other, so they are built and replaced together.
#[derive(Debug)]
pub struct CatalogueSnapshot {
    generation: Uuid,
    built_at: DateTime<Utc>,
    build_time_ms: u64,
    items: Vec<CatalogueItem>,
    space: VectorSpace,
    zero_vector_count: usize,
    matrix: SimilarityMatrix,
    index: TitleIndex,
    settings: EngineSettings,
}

impl CatalogueSnapshot {
    /// Runs compositor, vectorizer, similarity builder and title indexing
    pub fn build(items: Vec<CatalogueItem>, settings: EngineSettings) -> AppResult<Self> {
        let start = Instant::now();

        let compositor = FeatureCompositor::new(settings.field_separator.clone());
        let documents = compositor.compose_all(&items);

        let (space, vectors) = VectorSpace::fit_transform(&documents)?;
        let zero_vector_count = vectors.iter().filter(|v| v.is_zero()).count();
        if zero_vector_count > 0 {
            tracing::warn!(
                count = zero_vector_count,
                "Catalogue items without any indexable terms"
            );
        }

        let matrix = SimilarityMatrix::build(&vectors);

        let titles: Vec<&str> = items.iter().map(|item| item.title.as_str()).collect();
        let index = TitleIndex::build(&titles);
        if index.len() < items.len() {
            tracing::info!(
                duplicates = items.len() - index.len(),
                "Catalogue contains repeated titles"
            );
        }

        let build_time_ms = start.elapsed().as_millis() as u64;
        let snapshot = Self {
            generation: Uuid::new_v4(),
            built_at: Utc::now(),
            build_time_ms,
            items,
            space,
            zero_vector_count,
            matrix,
            index,
            settings,
        };

        tracing::info!(
            generation = %snapshot.generation,
            items = snapshot.items.len(),
            vocabulary = snapshot.space.dimensions(),
            build_time_ms,
            "Catalogue snapshot built"
        );

        Ok(snapshot)
    }

    /// Titles of the `n` items most similar to `title`
    pub fn recommend(&self, title: &str, n: usize) -> AppResult<Vec<String>> {
        Ok(self
            .recommend_scored(title, n)?
            .into_iter()
            .map(|scored| scored.title)
            .collect())
    }

    /// Like [`recommend`](Self::recommend) but keeps each similarity score
    pub fn recommend_scored(&self, title: &str, n: usize) -> AppResult<Vec<ScoredTitle>> {
        let row = self.index.resolve(title, self.settings.ambiguity)?;
        let ranked = recommender::top_n(&self.matrix, row, n, self.settings.strict_count)?;

        Ok(ranked
            .into_iter()
            .map(|(j, score)| ScoredTitle {
                title: self.items[j].title.clone(),
                score,
            })
            .collect())
    }

    /// Case-insensitive substring search over titles, in catalogue order
    pub fn search_titles(&self, query: &str, limit: usize) -> Vec<TitleMatch> {
        let needle = query.trim().to_lowercase();

        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.title.to_lowercase().contains(&needle))
            .take(limit)
            .map(|(index, item)| TitleMatch {
                index,
                title: item.title.clone(),
                content_type: item.content_type,
                release_year: item.release_year,
            })
            .collect()
    }

    pub fn similarity(&self, i: usize, j: usize) -> f64 {
        self.matrix.get(i, j)
    }

    pub fn summary(&self) -> CatalogueSummary {
        CatalogueSummary {
            generation: self.generation,
            item_count: self.items.len(),
            vocabulary_size: self.space.dimensions(),
            zero_vector_count: self.zero_vector_count,
            built_at: self.built_at,
            build_time_ms: self.build_time_ms,
        }
    }

    pub fn generation(&self) -> Uuid {
        self.generation
    }

    pub fn items(&self) -> &[CatalogueItem] {
        &self.items
    }

    pub fn vector_space(&self) -> &VectorSpace {
        &self.space
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn item(title: &str, genre: &str, description: &str) -> CatalogueItem {
        CatalogueItem {
            title: title.to_string(),
            listed_in: Some(genre.to_string()),
            description: Some(description.to_string()),
            ..Default::default()
        }
    }

    fn scenario() -> CatalogueSnapshot {
        CatalogueSnapshot::build(
            vec![
                item("A", "Comedy", "funny"),
                item("B", "Comedy", "funny"),
                item("C", "Drama", "serious"),
            ],
            EngineSettings::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_similar_items_rank_first() {
        let snapshot = scenario();
        assert!(snapshot.similarity(0, 1) > snapshot.similarity(0, 2));
        assert_eq!(snapshot.recommend("A", 2).unwrap(), vec!["B", "C"]);
    }

    #[test]
    fn test_self_similarity_and_symmetry() {
        let snapshot = scenario();
        for i in 0..3 {
            assert!((snapshot.similarity(i, i) - 1.0).abs() < 1e-9);
            for j in 0..3 {
                assert_eq!(snapshot.similarity(i, j), snapshot.similarity(j, i));
            }
        }
    }

    #[test]
    fn test_empty_item_recommends_in_index_order() {
        let snapshot = CatalogueSnapshot::build(
            vec![
                item("Western", "Westerns", "cowboys ride"),
                CatalogueItem::default(),
                item("Anime", "Anime Features", "mecha pilots"),
                item("Noir", "Thrillers", "detective rain"),
            ],
            EngineSettings::default(),
        )
        .unwrap();

        assert_eq!(snapshot.similarity(1, 1), 0.0);
        assert_eq!(snapshot.summary().zero_vector_count, 1);
        assert_eq!(
            snapshot.recommend("", 3).unwrap(),
            vec!["Western", "Anime", "Noir"]
        );
    }

    #[test]
    fn test_unknown_title() {
        let err = scenario().recommend("NoSuchTitle", 5).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_recommend_is_idempotent() {
        let snapshot = scenario();
        let first = snapshot.recommend_scored("C", 2).unwrap();
        let second = snapshot.recommend_scored("C", 2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_catalogue_fails() {
        let err = CatalogueSnapshot::build(Vec::new(), EngineSettings::default()).unwrap_err();
        assert!(matches!(err, AppError::EmptyCorpus));
    }

    #[test]
    fn test_duplicate_titles_follow_policy() {
        let items = vec![
            item("Love", "Romance", "first"),
            item("Love", "Romance", "second"),
            item("Hate", "Drama", "third"),
        ];

        let rejecting = CatalogueSnapshot::build(items.clone(), EngineSettings::default()).unwrap();
        assert!(matches!(
            rejecting.recommend("Love", 1),
            Err(AppError::AmbiguousTitle { matches: 2, .. })
        ));

        let settings = EngineSettings {
            ambiguity: AmbiguityPolicy::FirstMatch,
            ..Default::default()
        };
        let first_match = CatalogueSnapshot::build(items, settings).unwrap();
        // duplicates across rows are returned as-is
        assert_eq!(first_match.recommend("Love", 2).unwrap(), vec!["Love", "Hate"]);
    }

    #[test]
    fn test_search_titles() {
        let snapshot = scenario();
        let hits = snapshot.search_titles("b", 10);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].index, 1);
        assert_eq!(hits[0].title, "B");
    }
}
