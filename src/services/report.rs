//! Exploratory report over a catalogue snapshot.
//!
//! A pure function of the items and a filter: missing-value counts, the most
//! frequent countries/genres/cast members with a movie/TV split, type and
//! audience-category distributions, and when content was added.

use std::collections::{BTreeMap, HashMap};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::models::{CatalogueItem, Category, ContentType};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Label counted for an absent multi-valued field
const MISSING_LABEL: &str = "missing";

fn default_top() -> usize {
    10
}

/// Restricts which items a report covers
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReportFilter {
    /// Inclusive lower bound on release year
    pub year_from: Option<i32>,
    /// Inclusive upper bound on release year
    pub year_to: Option<i32>,
    /// Keep only items produced (in part) in this country
    pub country: Option<String>,
    /// Number of entries per facet
    #[serde(default = "default_top")]
    pub top: usize,
}

impl Default for ReportFilter {
    fn default() -> Self {
        Self {
            year_from: None,
            year_to: None,
            country: None,
            top: default_top(),
        }
    }
}

impl ReportFilter {
    fn matches(&self, item: &CatalogueItem) -> bool {
        if self.year_from.is_some() || self.year_to.is_some() {
            let Some(year) = item.release_year else {
                return false;
            };
            if self.year_from.is_some_and(|from| year < from)
                || self.year_to.is_some_and(|to| year > to)
            {
                return false;
            }
        }

        match &self.country {
            Some(country) => split_values(item.country.as_deref()).any(|c| c == country.trim()),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MissingValues {
    pub column: &'static str,
    pub missing: usize,
    /// Integer percentage, rounded down
    pub percent: usize,
}

/// Movie / TV show breakdown of a count
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct TypeCounts {
    pub movies: usize,
    pub tv_shows: usize,
    pub other: usize,
    pub total: usize,
}

impl TypeCounts {
    fn add(&mut self, content_type: Option<ContentType>) {
        match content_type {
            Some(ContentType::Movie) => self.movies += 1,
            Some(ContentType::TvShow) => self.tv_shows += 1,
            None => self.other += 1,
        }
        self.total += 1;
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FacetEntry {
    pub name: String,
    #[serde(flatten)]
    pub counts: TypeCounts,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct YearCount {
    pub year: i32,
    #[serde(flatten)]
    pub counts: TypeCounts,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthCount {
    pub month: u32,
    pub label: &'static str,
    #[serde(flatten)]
    pub counts: TypeCounts,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogueReport {
    pub total_items: usize,
    pub missing_values: Vec<MissingValues>,
    pub top_countries: Vec<FacetEntry>,
    pub top_genres: Vec<FacetEntry>,
    pub top_cast: Vec<FacetEntry>,
    pub type_distribution: TypeCounts,
    pub category_distribution: Vec<CategoryCount>,
    pub added_by_year: Vec<YearCount>,
    pub added_by_month: Vec<MonthCount>,
}

/// Comma-split values of a multi-valued field; absent fields count as "missing"
fn split_values(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or(MISSING_LABEL)
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn missing_values(items: &[&CatalogueItem]) -> Vec<MissingValues> {
    let columns: [(&'static str, fn(&CatalogueItem) -> bool); 12] = [
        ("show_id", |i| i.show_id.is_none()),
        ("type", |i| i.content_type.is_none()),
        ("title", |i| i.title.is_empty()),
        ("director", |i| i.director.is_none()),
        ("cast", |i| i.cast.is_none()),
        ("country", |i| i.country.is_none()),
        ("date_added", |i| i.date_added.is_none()),
        ("release_year", |i| i.release_year.is_none()),
        ("rating", |i| i.rating.is_none()),
        ("duration", |i| i.duration.is_none()),
        ("listed_in", |i| i.listed_in.is_none()),
        ("description", |i| i.description.is_none()),
    ];

    let total = items.len();
    let mut report: Vec<MissingValues> = columns
        .iter()
        .map(|&(column, is_missing)| {
            let missing = items.iter().filter(|item| is_missing(item)).count();
            let percent = if total == 0 { 0 } else { 100 * missing / total };
            MissingValues {
                column,
                missing,
                percent,
            }
        })
        .collect();

    report.sort_by(|a, b| b.missing.cmp(&a.missing).then_with(|| a.column.cmp(b.column)));
    report
}

fn top_facet(
    items: &[&CatalogueItem],
    field: fn(&CatalogueItem) -> Option<&str>,
    top: usize,
) -> Vec<FacetEntry> {
    let mut counts: HashMap<&str, TypeCounts> = HashMap::new();
    for item in items {
        for value in split_values(field(item)) {
            counts.entry(value).or_default().add(item.content_type);
        }
    }

    let mut entries: Vec<FacetEntry> = counts
        .into_iter()
        .map(|(name, counts)| FacetEntry {
            name: name.to_string(),
            counts,
        })
        .collect();

    entries.sort_by(|a, b| {
        b.counts
            .total
            .cmp(&a.counts.total)
            .then_with(|| a.name.cmp(&b.name))
    });
    entries.truncate(top);
    entries
}

fn category_distribution(items: &[&CatalogueItem]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for item in items {
        let category = item.category();
        if category != Category::Missing {
            *counts.entry(category.label().to_string()).or_insert(0) += 1;
        }
    }

    counts
        .into_iter()
        .map(|(category, count)| CategoryCount { category, count })
        .collect()
}

/// Builds the report for the items `filter` selects
pub fn build_report(items: &[CatalogueItem], filter: &ReportFilter) -> CatalogueReport {
    let selected: Vec<&CatalogueItem> = items.iter().filter(|item| filter.matches(item)).collect();

    let mut type_distribution = TypeCounts::default();
    let mut by_year: BTreeMap<i32, TypeCounts> = BTreeMap::new();
    let mut by_month: BTreeMap<u32, TypeCounts> = BTreeMap::new();

    for item in &selected {
        type_distribution.add(item.content_type);

        if let Some(added) = item.date_added {
            by_year.entry(added.year()).or_default().add(item.content_type);
            by_month.entry(added.month()).or_default().add(item.content_type);
        }
    }

    CatalogueReport {
        total_items: selected.len(),
        missing_values: missing_values(&selected),
        top_countries: top_facet(&selected, |i| i.country.as_deref(), filter.top),
        top_genres: top_facet(&selected, |i| i.listed_in.as_deref(), filter.top),
        top_cast: top_facet(&selected, |i| i.cast.as_deref(), filter.top),
        type_distribution,
        category_distribution: category_distribution(&selected),
        added_by_year: by_year
            .into_iter()
            .rev()
            .map(|(year, counts)| YearCount { year, counts })
            .collect(),
        added_by_month: by_month
            .into_iter()
            .map(|(month, counts)| MonthCount {
                month,
                label: MONTH_LABELS[(month - 1) as usize],
                counts,
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(
        title: &str,
        content_type: ContentType,
        country: Option<&str>,
        year: i32,
        rating: Option<&str>,
        added: Option<(i32, u32, u32)>,
    ) -> CatalogueItem {
        CatalogueItem {
            title: title.to_string(),
            content_type: Some(content_type),
            country: country.map(str::to_string),
            release_year: Some(year),
            rating: rating.map(str::to_string),
            listed_in: Some("Dramas, International Movies".to_string()),
            date_added: added.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
            ..Default::default()
        }
    }

    fn catalogue() -> Vec<CatalogueItem> {
        vec![
            item("Roma", ContentType::Movie, Some("Mexico"), 2018, Some("R"), Some((2018, 12, 14))),
            item("Narcos", ContentType::TvShow, Some("United States, Colombia"), 2017, Some("TV-MA"), Some((2017, 9, 1))),
            item("Dark", ContentType::TvShow, Some("Germany"), 2020, Some("TV-MA"), Some((2020, 6, 27))),
            item("Metropolis", ContentType::Movie, None, 1927, None, None),
        ]
    }

    #[test]
    fn test_missing_values_sorted_by_count() {
        let report = build_report(&catalogue(), &ReportFilter::default());
        assert_eq!(report.total_items, 4);

        let first = &report.missing_values[0];
        assert_eq!(first.column, "cast");
        assert_eq!(first.missing, 4);
        assert_eq!(first.percent, 100);

        let country = report
            .missing_values
            .iter()
            .find(|m| m.column == "country")
            .unwrap();
        assert_eq!(country.missing, 1);
        assert_eq!(country.percent, 25);
    }

    #[test]
    fn test_country_facet_splits_and_counts_missing() {
        let report = build_report(&catalogue(), &ReportFilter::default());
        let names: Vec<&str> = report.top_countries.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["Colombia", "Germany", "Mexico", "United States", "missing"]
        );

        let genres = &report.top_genres;
        assert_eq!(genres[0].name, "Dramas");
        assert_eq!(genres[0].counts.movies, 2);
        assert_eq!(genres[0].counts.tv_shows, 2);
    }

    #[test]
    fn test_year_filter() {
        let filter = ReportFilter {
            year_from: Some(2017),
            year_to: Some(2018),
            ..Default::default()
        };
        let report = build_report(&catalogue(), &filter);
        assert_eq!(report.total_items, 2);
        assert_eq!(report.type_distribution.movies, 1);
        assert_eq!(report.type_distribution.tv_shows, 1);
    }

    #[test]
    fn test_country_filter_and_categories() {
        let filter = ReportFilter {
            country: Some("Colombia".to_string()),
            ..Default::default()
        };
        let report = build_report(&catalogue(), &filter);
        assert_eq!(report.total_items, 1);
        assert_eq!(
            report.category_distribution,
            vec![CategoryCount {
                category: "mature".to_string(),
                count: 1
            }]
        );
    }

    #[test]
    fn test_category_distribution_skips_missing() {
        let report = build_report(&catalogue(), &ReportFilter::default());
        let total: usize = report.category_distribution.iter().map(|c| c.count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_added_by_year_and_month() {
        let report = build_report(&catalogue(), &ReportFilter::default());
        let years: Vec<i32> = report.added_by_year.iter().map(|y| y.year).collect();
        assert_eq!(years, vec![2020, 2018, 2017]);

        let labels: Vec<&str> = report.added_by_month.iter().map(|m| m.label).collect();
        assert_eq!(labels, vec!["Jun", "Sep", "Dec"]);
    }

    #[test]
    fn test_report_serializes_flattened_counts() {
        let report = build_report(&catalogue(), &ReportFilter::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["added_by_month"][0]["label"], "Jun");
        assert_eq!(json["added_by_month"][0]["tv_shows"], 1);
    }
}
