use sqlx::PgPool;

use crate::{
    error::AppResult,
    models::{
        catalogue_item::{normalize_text, parse_date_added},
        CatalogueItem, ContentType,
    },
};

use super::CatalogueSource;

/// Raw row of the `catalogue_titles` table
#[derive(Debug, sqlx::FromRow)]
struct CatalogueRow {
    show_id: Option<String>,
    content_type: Option<String>,
    title: Option<String>,
    director: Option<String>,
    cast: Option<String>,
    country: Option<String>,
    date_added: Option<String>,
    release_year: Option<i32>,
    rating: Option<String>,
    duration: Option<String>,
    listed_in: Option<String>,
    description: Option<String>,
}

impl From<CatalogueRow> for CatalogueItem {
    fn from(row: CatalogueRow) -> Self {
        CatalogueItem {
            show_id: normalize_text(row.show_id.as_deref()),
            content_type: row.content_type.as_deref().and_then(ContentType::parse),
            title: normalize_text(row.title.as_deref()).unwrap_or_default(),
            director: normalize_text(row.director.as_deref()),
            cast: normalize_text(row.cast.as_deref()),
            country: normalize_text(row.country.as_deref()),
            date_added: row.date_added.as_deref().and_then(parse_date_added),
            release_year: row.release_year,
            rating: normalize_text(row.rating.as_deref()),
            duration: normalize_text(row.duration.as_deref()),
            listed_in: normalize_text(row.listed_in.as_deref()),
            description: normalize_text(row.description.as_deref()),
        }
    }
}

/// Loads the catalogue from PostgreSQL
#[derive(Clone)]
pub struct PostgresSource {
    db_pool: PgPool,
}

impl PostgresSource {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait::async_trait]
impl CatalogueSource for PostgresSource {
    async fn load(&self) -> AppResult<Vec<CatalogueItem>> {
        // row order is item order, so it must be deterministic
        let rows: Vec<CatalogueRow> = sqlx::query_as(
            r#"
            SELECT show_id, content_type, title, director, "cast", country,
                   date_added, release_year, rating, duration, listed_in, description
            FROM catalogue_titles
            ORDER BY position
            "#,
        )
        .fetch_all(&self.db_pool)
        .await?;

        let items: Vec<CatalogueItem> = rows.into_iter().map(CatalogueItem::from).collect();
        tracing::info!(items = items.len(), "Catalogue loaded from database");

        Ok(items)
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}
