use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Category;

/// Kind of catalogue entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Movie,
    TvShow,
}

impl ContentType {
    /// Parses the dataset's `type` column ("Movie" / "TV Show")
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "movie" => Some(ContentType::Movie),
            "tv show" | "tv_show" | "series" => Some(ContentType::TvShow),
            _ => None,
        }
    }
}

/// One row of the catalogue
///
/// Text fields are `None` when the source value was absent or blank.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CatalogueItem {
    pub show_id: Option<String>,
    pub content_type: Option<ContentType>,
    pub title: String,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub country: Option<String>,
    pub date_added: Option<NaiveDate>,
    pub release_year: Option<i32>,
    pub rating: Option<String>,
    pub duration: Option<String>,
    /// Comma-joined genre listing
    pub listed_in: Option<String>,
    pub description: Option<String>,
}

impl CatalogueItem {
    /// Creates an item carrying only a title
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn category(&self) -> Category {
        Category::from_rating(self.rating.as_deref())
    }
}

/// Trims a raw field value, mapping blank input to `None`
pub fn normalize_text(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Parses the dataset's `date_added` format, e.g. "September 25, 2021"
pub fn parse_date_added(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%B %d, %Y").ok()
}
