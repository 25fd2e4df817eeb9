use std::collections::HashMap;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// How a lookup resolves a title carried by more than one item
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityPolicy {
    /// Fail with `AmbiguousTitle`
    #[default]
    Reject,
    /// Use the item with the lowest index
    FirstMatch,
}

/// Maps each title to the rows carrying it, in ascending row order
#[derive(Debug, Clone, Default)]
pub struct TitleIndex {
    rows: HashMap<String, Vec<usize>>,
}

impl TitleIndex {
    pub fn build<S: AsRef<str>>(titles: &[S]) -> Self {
        let mut rows: HashMap<String, Vec<usize>> = HashMap::new();
        for (row, title) in titles.iter().enumerate() {
            rows.entry(title.as_ref().to_string()).or_default().push(row);
        }
        Self { rows }
    }

    /// Resolves `title` to a single row under `policy`
    pub fn resolve(&self, title: &str, policy: AmbiguityPolicy) -> AppResult<usize> {
        let rows = self
            .rows
            .get(title)
            .ok_or_else(|| AppError::NotFound(title.to_string()))?;

        match (rows.as_slice(), policy) {
            ([row], _) => Ok(*row),
            ([first, ..], AmbiguityPolicy::FirstMatch) => Ok(*first),
            (_, AmbiguityPolicy::Reject) => Err(AppError::AmbiguousTitle {
                title: title.to_string(),
                matches: rows.len(),
            }),
            ([], AmbiguityPolicy::FirstMatch) => Err(AppError::NotFound(title.to_string())),
        }
    }

    pub fn rows_for(&self, title: &str) -> &[usize] {
        self.rows.get(title).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of distinct titles
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
