use serde::{Serialize, Serializer};
use std::fmt::Display;

/// Audience category derived from a content rating code
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Kids,
    AllPublic,
    WithSupervision,
    Mature,
    Unrated,
    /// No rating was recorded
    Missing,
    /// A rating code outside the lookup table, kept verbatim
    Unrecognized(String),
}

impl Category {
    /// Maps a rating code to its category
    pub fn from_rating(rating: Option<&str>) -> Self {
        let Some(rating) = rating.map(str::trim).filter(|r| !r.is_empty()) else {
            return Category::Missing;
        };

        match rating {
            "TV-Y" | "TV-Y7" | "TV-Y7-FV" => Category::Kids,
            "G" | "TV-G" => Category::AllPublic,
            "PG" | "PG-13" | "TV-PG" | "R" => Category::WithSupervision,
            "TV-MA" | "TV-14" | "NC-17" => Category::Mature,
            "NR" | "UR" => Category::Unrated,
            other => Category::Unrecognized(other.to_string()),
        }
    }

    /// Label used in reports
    pub fn label(&self) -> &str {
        match self {
            Category::Kids => "kids",
            Category::AllPublic => "all public",
            Category::WithSupervision => "with supervision",
            Category::Mature => "mature",
            Category::Unrated => "unrated",
            Category::Missing => "missing",
            Category::Unrecognized(_) => "unrecognized",
        }
    }

    /// Text this category contributes to an item's document
    ///
    /// A missing category contributes nothing; an unrecognized one contributes
    /// the raw rating code.
    pub fn document_text(&self) -> &str {
        match self {
            Category::Missing => "",
            Category::Unrecognized(raw) => raw,
            known => known.label(),
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
