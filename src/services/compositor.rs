use crate::models::CatalogueItem;

/// Separator placed between item fields unless configured otherwise
pub const DEFAULT_FIELD_SEPARATOR: &str = " ";

/// Builds the per-item document the vectorizer consumes
///
/// Fields are joined in a fixed order: title, country, director, genre listing,
/// description, category. Missing fields contribute an empty string.
#[derive(Debug, Clone)]
pub struct FeatureCompositor {
    separator: String,
}

impl Default for FeatureCompositor {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD_SEPARATOR)
    }
}

impl FeatureCompositor {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    /// Joins fields with no separator at all, so adjacent field values run together
    pub fn source_parity() -> Self {
        Self::new("")
    }

    pub fn compose(&self, item: &CatalogueItem) -> String {
        let category = item.category();
        let fields = [
            item.title.as_str(),
            item.country.as_deref().unwrap_or_default(),
            item.director.as_deref().unwrap_or_default(),
            item.listed_in.as_deref().unwrap_or_default(),
            item.description.as_deref().unwrap_or_default(),
            category.document_text(),
        ];

        fields.join(&self.separator)
    }

    pub fn compose_all(&self, items: &[CatalogueItem]) -> Vec<String> {
        items.iter().map(|item| self.compose(item)).collect()
    }
}
