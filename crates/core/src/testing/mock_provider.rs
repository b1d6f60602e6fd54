//! Mock metadata provider for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::enrichment::{EnrichmentError, ExternalFilmData, FilmQuery, MetadataProvider};

/// Mock implementation of the MetadataProvider trait.
///
/// Provides controllable behavior for testing:
/// - Return configured films by title (case-insensitive) and year
/// - Track queries for assertions
/// - Simulate a single failure or a provider that is down
#[derive(Debug, Default)]
pub struct MockMetadataProvider {
    /// Films by (lowercase title, year).
    films: Arc<RwLock<HashMap<(String, i32), ExternalFilmData>>>,
    /// Recorded queries.
    queries: Arc<RwLock<Vec<FilmQuery>>>,
    /// If set, the next lookup will fail with this error.
    next_error: Arc<RwLock<Option<EnrichmentError>>>,
    /// When true every lookup fails as if the service were down.
    unreachable: Arc<RwLock<bool>>,
}

impl MockMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a film. Its year string must parse as an integer to be matched.
    pub async fn add_film(&self, data: ExternalFilmData) {
        let year = data.year.trim().parse().unwrap_or_default();
        self.films
            .write()
            .await
            .insert((data.title.to_lowercase(), year), data);
    }

    /// Add a film under an explicit lookup key.
    pub async fn add_film_for(&self, title: &str, year: i32, data: ExternalFilmData) {
        self.films
            .write()
            .await
            .insert((title.to_lowercase(), year), data);
    }

    /// Clear all films.
    pub async fn clear_films(&self) {
        self.films.write().await.clear();
    }

    /// Get all recorded queries.
    pub async fn recorded_queries(&self) -> Vec<FilmQuery> {
        self.queries.read().await.clone()
    }

    /// Get the number of lookups performed.
    pub async fn query_count(&self) -> usize {
        self.queries.read().await.len()
    }

    /// Configure the next lookup to fail with the given error.
    pub async fn set_next_error(&self, error: EnrichmentError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every lookup fail until reset.
    pub async fn set_unreachable(&self, unreachable: bool) {
        *self.unreachable.write().await = unreachable;
    }
}

#[async_trait]
impl MetadataProvider for MockMetadataProvider {
    async fn fetch_by_title_and_year(
        &self,
        title: &str,
        year: i32,
    ) -> Result<ExternalFilmData, EnrichmentError> {
        self.queries.write().await.push(FilmQuery::new(title, year));

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        if *self.unreachable.read().await {
            return Err(EnrichmentError::ApiError {
                status: 503,
                message: "Service unavailable".to_string(),
            });
        }

        self.films
            .read()
            .await
            .get(&(title.to_lowercase(), year))
            .cloned()
            .ok_or_else(|| EnrichmentError::NotFound(format!("{} ({})", title, year)))
    }
}
