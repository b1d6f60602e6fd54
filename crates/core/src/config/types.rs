use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::DEFAULT_RECOMMENDATION_LIMIT;
use crate::enrichment::OmdbConfig;
use crate::scheduler::RefreshConfig;

/// Root configuration. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub omdb: OmdbConfig,
    #[serde(default)]
    pub posters: PostersConfig,
    #[serde(default)]
    pub refresh: RefreshConfig,
    #[serde(default)]
    pub recommendations: RecommendationsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Whether metadata lookups can be made.
    pub fn enrichment_enabled(&self) -> bool {
        !self.omdb.api_key.trim().is_empty()
    }
}

/// Catalog file configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    /// JSON catalog file. Asked for interactively when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Poster storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PostersConfig {
    #[serde(default = "default_posters_dir")]
    pub dir: PathBuf,
}

impl Default for PostersConfig {
    fn default() -> Self {
        Self {
            dir: default_posters_dir(),
        }
    }
}

fn default_posters_dir() -> PathBuf {
    PathBuf::from("posters")
}

/// Recommendation configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendationsConfig {
    /// Maximum films per recommendation list.
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// How many of the most-viewed genres to recommend from.
    #[serde(default = "default_top_genres")]
    pub top_genres: usize,
}

impl Default for RecommendationsConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            top_genres: default_top_genres(),
        }
    }
}

fn default_limit() -> usize {
    DEFAULT_RECOMMENDATION_LIMIT
}

fn default_top_genres() -> usize {
    3
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

fn default_level() -> String {
    "warn".to_string()
}

/// Sanitized config for logging (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub catalog: CatalogConfig,
    pub omdb: SanitizedOmdbConfig,
    pub posters: PostersConfig,
    pub refresh: RefreshConfig,
    pub recommendations: RecommendationsConfig,
    pub logging: LoggingConfig,
}

/// Sanitized OMDb config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedOmdbConfig {
    pub api_key_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            catalog: config.catalog.clone(),
            omdb: SanitizedOmdbConfig {
                api_key_configured: config.enrichment_enabled(),
                base_url: config.omdb.base_url.clone(),
                timeout_secs: config.omdb.timeout_secs,
            },
            posters: config.posters.clone(),
            refresh: config.refresh.clone(),
            recommendations: config.recommendations.clone(),
            logging: config.logging.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_empty_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.catalog.path.is_none());
        assert!(!config.enrichment_enabled());
        assert_eq!(config.omdb.timeout_secs, 30);
        assert_eq!(config.posters.dir.to_str().unwrap(), "posters");
        assert!(config.refresh.enabled);
        assert_eq!(config.refresh.interval_secs, 300);
        assert_eq!(config.recommendations.limit, 10);
        assert_eq!(config.recommendations.top_genres, 3);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
[catalog]
path = "/data/films.json"

[omdb]
api_key = "abc123"
base_url = "http://localhost:9999/"
timeout_secs = 5

[posters]
dir = "/data/posters"

[refresh]
enabled = false
interval_secs = 60

[recommendations]
limit = 4
top_genres = 1

[logging]
level = "debug"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.catalog.path.unwrap().to_str().unwrap(), "/data/films.json");
        assert_eq!(config.omdb.api_key, "abc123");
        assert_eq!(config.omdb.base_url.as_deref(), Some("http://localhost:9999/"));
        assert_eq!(config.omdb.timeout_secs, 5);
        assert_eq!(config.posters.dir.to_str().unwrap(), "/data/posters");
        assert!(!config.refresh.enabled);
        assert!(config.refresh.run_on_start); // default
        assert_eq!(config.recommendations.limit, 4);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_sanitized_config_hides_key() {
        let mut config = Config::default();
        config.omdb.api_key = "secret-key".to_string();

        let sanitized = SanitizedConfig::from(&config);
        assert!(sanitized.omdb.api_key_configured);

        let json = serde_json::to_string(&sanitized).unwrap();
        assert!(!json.contains("secret-key"));
    }

    #[test]
    fn test_blank_api_key_disables_enrichment() {
        let config: Config = toml::from_str("[omdb]\napi_key = \"  \"").unwrap();
        assert!(!config.enrichment_enabled());
    }
}
