//! Film catalog - the authoritative owner of film records and their ids.
//!
//! Ids come from a monotonically increasing counter and are never reused
//! within a process. Each record is either custom (user-authored) or
//! external (provider-sourced); only external records are replaced by a
//! refresh.

mod interest;
mod memory;
mod types;

pub use interest::GenreInterest;
pub use memory::InMemoryCatalog;
pub use types::*;

use async_trait::async_trait;

use crate::film::{Film, FilmId, Genre};

/// Trait for film catalog storage.
///
/// Implementations serialize all operations against each other, including
/// the remove-and-reinsert sequence of [`FilmCatalog::refresh`].
#[async_trait]
pub trait FilmCatalog: Send + Sync {
    /// Snapshot of all films, ascending by id.
    async fn all(&self) -> Vec<Film>;

    /// Number of films.
    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Insert a film under the next id and return that id.
    ///
    /// The film's own `id` is ignored.
    async fn add(&self, film: Film, provenance: Provenance) -> Result<FilmId, CatalogError>;

    /// Insert a user-authored film.
    async fn add_custom(&self, film: Film) -> Result<FilmId, CatalogError> {
        self.add(film, Provenance::Custom).await
    }

    /// Look up `title`/`year` with the metadata provider and insert the
    /// result as an external film.
    async fn add_from_provider(&self, title: &str, year: i32) -> Result<FilmId, CatalogError>;

    /// Get a film by id.
    async fn get(&self, id: FilmId) -> Result<Film, CatalogError>;

    /// Check if a film exists.
    async fn exists(&self, id: FilmId) -> bool;

    /// Provenance of a stored film.
    async fn provenance(&self, id: FilmId) -> Result<Provenance, CatalogError>;

    /// Replace the film stored at `film.id`. Provenance is unchanged.
    async fn edit(&self, film: Film) -> Result<(), CatalogError>;

    /// Remove a film and its provenance; returns the removed film.
    async fn delete(&self, id: FilmId) -> Result<Film, CatalogError>;

    /// Up to `limit` films whose genre is in `genres` and whose rating is
    /// above [`RECOMMENDATION_MIN_RATING`], ascending by id.
    async fn recommend(&self, genres: &[Genre], limit: usize) -> Vec<Film>;

    /// Re-fetch every external film from the provider and re-insert it
    /// under a new id. Films the provider no longer resolves are dropped.
    async fn refresh(&self) -> Result<RefreshReport, CatalogError>;
}
