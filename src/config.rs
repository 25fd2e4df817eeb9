use serde::Deserialize;

use crate::services::{compositor::DEFAULT_FIELD_SEPARATOR, AmbiguityPolicy, EngineSettings};

/// Where the catalogue is loaded from
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    File,
    Http,
    Postgres,
}

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Which catalogue source to build from
    #[serde(default)]
    pub catalogue_source: SourceKind,

    /// Path of the catalogue CSV for the `file` source
    #[serde(default = "default_catalogue_path")]
    pub catalogue_path: String,

    /// URL of the catalogue CSV for the `http` source
    pub catalogue_url: Option<String>,

    /// PostgreSQL connection URL for the `postgres` source
    pub database_url: Option<String>,

    /// Redis connection URL; result caching is disabled when unset
    pub redis_url: Option<String>,

    /// Lifetime of cached recommendation lists, in seconds
    #[serde(default = "default_cache_ttl")]
    pub recommendation_cache_ttl: u64,

    #[serde(default = "default_recommendation_count")]
    pub default_recommendation_count: usize,

    /// How lookups treat a title shared by several items
    #[serde(default)]
    pub ambiguous_titles: AmbiguityPolicy,

    /// Fail instead of returning a short list when the catalogue is too small
    #[serde(default)]
    pub strict_count: bool,

    /// Text placed between item fields when composing documents
    #[serde(default = "default_field_separator")]
    pub field_separator: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_catalogue_path() -> String {
    "data/netflix_titles.csv".to_string()
}

fn default_cache_ttl() -> u64 {
    3600
}

fn default_recommendation_count() -> usize {
    10
}

fn default_field_separator() -> String {
    DEFAULT_FIELD_SEPARATOR.to_string()
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Settings the recommendation engine is built with
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            field_separator: self.field_separator.clone(),
            ambiguity: self.ambiguous_titles,
            strict_count: self.strict_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config: Config = envy::from_iter(vars(&[])).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.catalogue_source, SourceKind::File);
        assert_eq!(config.catalogue_path, "data/netflix_titles.csv");
        assert_eq!(config.redis_url, None);
        assert_eq!(config.default_recommendation_count, 10);
        assert_eq!(config.ambiguous_titles, AmbiguityPolicy::Reject);
        assert!(!config.strict_count);
        assert_eq!(config.field_separator, " ");
    }

    #[test]
    fn test_overrides_from_environment() {
        let config: Config = envy::from_iter(vars(&[
            ("CATALOGUE_SOURCE", "http"),
            ("CATALOGUE_URL", "https://example.org/titles.csv"),
            ("AMBIGUOUS_TITLES", "first_match"),
            ("STRICT_COUNT", "true"),
            ("PORT", "8080"),
        ]))
        .unwrap();

        assert_eq!(config.catalogue_source, SourceKind::Http);
        assert_eq!(
            config.catalogue_url.as_deref(),
            Some("https://example.org/titles.csv")
        );
        assert_eq!(config.port, 8080);

        let settings = config.engine_settings();
        assert_eq!(settings.ambiguity, AmbiguityPolicy::FirstMatch);
        assert!(settings.strict_count);
    }
}
