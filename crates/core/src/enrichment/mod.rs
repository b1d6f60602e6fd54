//! Metadata enrichment: provider lookups, conversion to films and poster
//! storage.
//!
//! The catalog depends only on the [`MetadataProvider`] and [`PosterStore`]
//! traits; [`OmdbClient`] and [`PosterDownloader`] are the HTTP-backed
//! implementations.

pub mod convert;
mod enricher;
mod omdb;
mod poster;
mod types;

pub use convert::ConversionError;
pub use enricher::Enricher;
pub use omdb::{OmdbClient, OmdbConfig};
pub use poster::{PosterDownloader, PosterError};
pub use types::*;

use std::path::PathBuf;

use async_trait::async_trait;
use futures::future::join_all;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur when talking to the metadata provider.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The provider has no film for this title/year.
    #[error("Film not found: {0}")]
    NotFound(String),

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse response.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Client not configured (missing API key, etc.).
    #[error("Client not configured: {0}")]
    NotConfigured(String),

    /// Provider data could not be turned into a film.
    #[error("Unusable film data: {0}")]
    Conversion(#[from] ConversionError),
}

impl EnrichmentError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, EnrichmentError::NotFound(_))
    }
}

/// Lookup of film metadata by title and year.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch a single film.
    async fn fetch_by_title_and_year(
        &self,
        title: &str,
        year: i32,
    ) -> Result<ExternalFilmData, EnrichmentError>;

    /// Fetch several films concurrently.
    ///
    /// The output is aligned with `queries`; a title that could not be
    /// fetched is `None` and does not abort the batch. Fails only when
    /// every lookup failed for a reason other than not-found, which means
    /// the provider is unreachable or unusable.
    async fn fetch_many(
        &self,
        queries: &[FilmQuery],
    ) -> Result<Vec<Option<ExternalFilmData>>, EnrichmentError> {
        let results = join_all(
            queries
                .iter()
                .map(|q| self.fetch_by_title_and_year(&q.title, q.year)),
        )
        .await;

        collect_batch(queries, results)
    }
}

/// Fold per-title results into a batch result.
pub(crate) fn collect_batch(
    queries: &[FilmQuery],
    results: Vec<Result<ExternalFilmData, EnrichmentError>>,
) -> Result<Vec<Option<ExternalFilmData>>, EnrichmentError> {
    let mut first_failure = None;
    let mut failures = 0usize;
    let mut out = Vec::with_capacity(results.len());

    for (query, result) in queries.iter().zip(results) {
        match result {
            Ok(data) => out.push(Some(data)),
            Err(e) if e.is_not_found() => {
                debug!("No provider match for '{}' ({})", query.title, query.year);
                out.push(None);
            }
            Err(e) => {
                warn!(
                    "Lookup failed for '{}' ({}): {}",
                    query.title, query.year, e
                );
                failures += 1;
                first_failure.get_or_insert(e);
                out.push(None);
            }
        }
    }

    match first_failure {
        Some(e) if failures == out.len() => Err(e),
        _ => Ok(out),
    }
}

/// Local storage for downloaded poster images.
#[async_trait]
pub trait PosterStore: Send + Sync {
    /// Download the image at `url` and return the local file path.
    async fn store(&self, url: &str) -> Result<PathBuf, PosterError>;
}
