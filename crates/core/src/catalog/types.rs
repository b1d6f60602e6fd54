//! Types for the film catalog.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::enrichment::EnrichmentError;
use crate::film::{FilmError, FilmId};

/// Default number of films returned by a recommendation query.
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 10;

/// Films must be rated strictly above this to be recommended.
pub const RECOMMENDATION_MIN_RATING: u8 = 5;

/// Where a record came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Authored by the user; never touched by refresh.
    Custom,
    /// Built from provider data; replaced on refresh.
    External,
}

/// Outcome of a refresh pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshReport {
    /// Records re-fetched and re-inserted under new ids.
    pub refreshed: usize,
    /// Records removed because the provider had nothing usable for them.
    pub dropped: usize,
}

impl RefreshReport {
    pub fn is_noop(&self) -> bool {
        self.refreshed == 0 && self.dropped == 0
    }
}

/// Errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A field value violates its invariant.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] FilmError),

    /// No film with this id.
    #[error("Film not found: {0}")]
    NotFound(FilmId),

    /// The metadata provider could not be reached or returned unusable data.
    #[error("External service error: {0}")]
    ExternalService(#[from] EnrichmentError),
}
