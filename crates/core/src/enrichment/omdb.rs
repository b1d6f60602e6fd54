//! OMDb (Open Movie Database) API client.
//!
//! OMDb requires an API key. A lookup is a single GET with `t` (title) and
//! `y` (year); a miss comes back as HTTP 200 with `"Response": "False"` and
//! no title.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::ExternalFilmData;
use super::{EnrichmentError, MetadataProvider};

const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// OMDb API client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    /// OMDb API key (required for lookups).
    #[serde(default)]
    pub api_key: String,
    /// Base URL (default: https://www.omdbapi.com/).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Request timeout in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

/// OMDb API client.
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    /// Create a new OMDb client.
    pub fn new(config: OmdbConfig) -> Result<Self, EnrichmentError> {
        if config.api_key.is_empty() {
            return Err(EnrichmentError::NotConfigured(
                "OMDb API key is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let base_url = config
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }
}

#[async_trait]
impl MetadataProvider for OmdbClient {
    async fn fetch_by_title_and_year(
        &self,
        title: &str,
        year: i32,
    ) -> Result<ExternalFilmData, EnrichmentError> {
        debug!("OMDb lookup: title='{}', year={}", title, year);

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("t", title),
                ("y", &year.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == 401 {
            return Err(EnrichmentError::NotConfigured(
                "Invalid OMDb API key".to_string(),
            ));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(EnrichmentError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: OmdbResponse = response.json().await.map_err(|e| {
            EnrichmentError::ParseError(format!("Failed to parse OMDb response: {}", e))
        })?;

        body.into_film_data()
            .ok_or_else(|| EnrichmentError::NotFound(format!("{} ({})", title, year)))
    }
}

// ============================================================================
// OMDb API Response Types (private)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Title", default)]
    title: Option<String>,
    #[serde(rename = "Year", default)]
    year: Option<String>,
    #[serde(rename = "Genre", default)]
    genre: Option<String>,
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: Option<String>,
    #[serde(rename = "Metascore", default)]
    metascore: Option<String>,
    #[serde(rename = "Plot", default)]
    plot: Option<String>,
    #[serde(rename = "Director", default)]
    director: Option<String>,
    #[serde(rename = "Actors", default)]
    actors: Option<String>,
    #[serde(rename = "imdbID", default)]
    imdb_id: Option<String>,
}

impl OmdbResponse {
    /// `None` when the response carries no title (OMDb's "not found").
    fn into_film_data(self) -> Option<ExternalFilmData> {
        let title = self.title.filter(|t| !t.trim().is_empty())?;

        Some(ExternalFilmData {
            title,
            year: self.year.unwrap_or_default(),
            genre: self.genre.unwrap_or_default(),
            poster: self.poster.unwrap_or_default(),
            imdb_rating: self.imdb_rating.unwrap_or_default(),
            metascore: self.metascore.unwrap_or_default(),
            plot: self.plot.unwrap_or_default(),
            director: self.director.unwrap_or_default(),
            actors: self.actors.unwrap_or_default(),
            imdb_id: self.imdb_id.unwrap_or_default(),
        })
    }
}
