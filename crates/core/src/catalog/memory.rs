//! In-memory catalog implementation.

use std::collections::{BTreeMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::types::{CatalogError, Provenance, RefreshReport, RECOMMENDATION_MIN_RATING};
use super::FilmCatalog;
use crate::enrichment::{EnrichmentError, Enricher};
use crate::film::{Film, FilmId, Genre};

/// Records plus provenance, always mutated together under one lock.
#[derive(Debug, Default)]
struct CatalogState {
    films: BTreeMap<FilmId, Film>,
    custom: HashSet<FilmId>,
    next_id: FilmId,
}

impl CatalogState {
    fn insert(&mut self, mut film: Film, provenance: Provenance) -> FilmId {
        let id = self.next_id;
        self.next_id += 1;
        film.id = id;
        self.films.insert(id, film);
        if provenance == Provenance::Custom {
            self.custom.insert(id);
        }
        id
    }

    fn remove(&mut self, id: FilmId) -> Option<Film> {
        self.custom.remove(&id);
        self.films.remove(&id)
    }

    fn external_ids(&self) -> Vec<FilmId> {
        self.films
            .keys()
            .filter(|id| !self.custom.contains(id))
            .copied()
            .collect()
    }
}

/// Process-local catalog guarded by a single async mutex.
///
/// Refresh holds the lock for its whole duration, including the provider
/// round-trips, so no other operation can observe a record between its
/// removal and re-insertion.
pub struct InMemoryCatalog {
    state: Mutex<CatalogState>,
    enricher: Option<Enricher>,
}

impl Default for InMemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryCatalog {
    /// Create an empty catalog without a metadata provider.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CatalogState::default()),
            enricher: None,
        }
    }

    /// Create an empty catalog backed by a metadata provider.
    pub fn with_enricher(enricher: Enricher) -> Self {
        Self {
            state: Mutex::new(CatalogState::default()),
            enricher: Some(enricher),
        }
    }

    fn enricher(&self) -> Result<&Enricher, CatalogError> {
        self.enricher.as_ref().ok_or_else(|| {
            CatalogError::ExternalService(EnrichmentError::NotConfigured(
                "no metadata provider configured".to_string(),
            ))
        })
    }
}

#[async_trait]
impl FilmCatalog for InMemoryCatalog {
    async fn all(&self) -> Vec<Film> {
        self.state.lock().await.films.values().cloned().collect()
    }

    async fn len(&self) -> usize {
        self.state.lock().await.films.len()
    }

    async fn add(&self, film: Film, provenance: Provenance) -> Result<FilmId, CatalogError> {
        film.validate()?;
        let id = self.state.lock().await.insert(film, provenance);
        debug!("Added film {} ({:?})", id, provenance);
        Ok(id)
    }

    async fn add_from_provider(&self, title: &str, year: i32) -> Result<FilmId, CatalogError> {
        let film = self.enricher()?.lookup(title, year).await?;
        self.add(film, Provenance::External).await
    }

    async fn get(&self, id: FilmId) -> Result<Film, CatalogError> {
        self.state
            .lock()
            .await
            .films
            .get(&id)
            .cloned()
            .ok_or(CatalogError::NotFound(id))
    }

    async fn exists(&self, id: FilmId) -> bool {
        self.state.lock().await.films.contains_key(&id)
    }

    async fn provenance(&self, id: FilmId) -> Result<Provenance, CatalogError> {
        let state = self.state.lock().await;
        if !state.films.contains_key(&id) {
            return Err(CatalogError::NotFound(id));
        }
        Ok(if state.custom.contains(&id) {
            Provenance::Custom
        } else {
            Provenance::External
        })
    }

    async fn edit(&self, film: Film) -> Result<(), CatalogError> {
        film.validate()?;
        let mut state = self.state.lock().await;
        match state.films.get_mut(&film.id) {
            Some(slot) => {
                *slot = film;
                Ok(())
            }
            None => Err(CatalogError::NotFound(film.id)),
        }
    }

    async fn delete(&self, id: FilmId) -> Result<Film, CatalogError> {
        let removed = self
            .state
            .lock()
            .await
            .remove(id)
            .ok_or(CatalogError::NotFound(id))?;
        debug!("Deleted film {}", id);
        Ok(removed)
    }

    async fn recommend(&self, genres: &[Genre], limit: usize) -> Vec<Film> {
        self.state
            .lock()
            .await
            .films
            .values()
            .filter(|f| genres.contains(&f.genre) && f.rating().value() > RECOMMENDATION_MIN_RATING)
            .take(limit)
            .cloned()
            .collect()
    }

    async fn refresh(&self) -> Result<RefreshReport, CatalogError> {
        let mut state = self.state.lock().await;

        let ids = state.external_ids();
        if ids.is_empty() {
            debug!("Refresh skipped: no external films");
            return Ok(RefreshReport::default());
        }

        let stale: Vec<Film> = ids
            .iter()
            .filter_map(|id| state.films.get(id).cloned())
            .collect();

        // On a batch-level failure the catalog is left untouched.
        let fresh = self.enricher()?.refetch(&stale).await?;

        for id in &ids {
            state.remove(*id);
        }

        let mut report = RefreshReport::default();
        for (old, new) in stale.iter().zip(fresh) {
            match new {
                Some(film) => {
                    let id = state.insert(film, Provenance::External);
                    debug!("Refreshed '{}': {} -> {}", old.name(), old.id, id);
                    report.refreshed += 1;
                }
                None => {
                    warn!(
                        "Dropped '{}' ({}) from catalog: provider returned no usable data",
                        old.name(),
                        old.release_year()
                    );
                    report.dropped += 1;
                }
            }
        }

        info!(
            "Catalog refresh complete: {} refreshed, {} dropped",
            report.refreshed, report.dropped
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures;

    #[tokio::test]
    async fn test_ids_are_sequential_from_zero() {
        let catalog = InMemoryCatalog::new();
        let a = catalog.add_custom(fixtures::film("A", 2000, 7)).await.unwrap();
        let b = catalog.add_custom(fixtures::film("B", 2001, 7)).await.unwrap();
        assert_eq!((a, b), (0, 1));
        assert_eq!(catalog.get(b).await.unwrap().id, 1);
    }

    #[tokio::test]
    async fn test_add_ignores_caller_id() {
        let catalog = InMemoryCatalog::new();
        let mut film = fixtures::film("A", 2000, 7);
        film.id = 42;
        let id = catalog.add_custom(film).await.unwrap();
        assert_eq!(id, 0);
        assert!(!catalog.exists(42).await);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let catalog = InMemoryCatalog::new();
        let a = catalog.add_custom(fixtures::film("A", 2000, 7)).await.unwrap();
        catalog.delete(a).await.unwrap();
        let b = catalog.add_custom(fixtures::film("B", 2000, 7)).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_get_missing() {
        let catalog = InMemoryCatalog::new();
        assert!(matches!(
            catalog.get(3).await,
            Err(CatalogError::NotFound(3))
        ));
        assert!(!catalog.exists(3).await);
    }

    #[tokio::test]
    async fn test_edit_replaces_and_keeps_provenance() {
        let catalog = InMemoryCatalog::new();
        let id = catalog.add_custom(fixtures::film("A", 2000, 7)).await.unwrap();

        let mut film = catalog.get(id).await.unwrap();
        film.set_rating(3).unwrap();
        catalog.edit(film).await.unwrap();

        assert_eq!(catalog.get(id).await.unwrap().rating().value(), 3);
        assert_eq!(catalog.provenance(id).await.unwrap(), Provenance::Custom);
    }

    #[tokio::test]
    async fn test_edit_missing() {
        let catalog = InMemoryCatalog::new();
        let mut film = fixtures::film("A", 2000, 7);
        film.id = 9;
        assert!(matches!(
            catalog.edit(film).await,
            Err(CatalogError::NotFound(9))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing() {
        let catalog = InMemoryCatalog::new();
        assert!(matches!(
            catalog.delete(0).await,
            Err(CatalogError::NotFound(0))
        ));
    }

    #[tokio::test]
    async fn test_recommend_limit_zero() {
        let catalog = InMemoryCatalog::new();
        catalog.add_custom(fixtures::film("A", 2000, 9)).await.unwrap();
        assert!(catalog.recommend(&[Genre::Drama], 0).await.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_without_external_films_is_noop() {
        let catalog = InMemoryCatalog::new();
        catalog.add_custom(fixtures::film("A", 2000, 7)).await.unwrap();
        let report = catalog.refresh().await.unwrap();
        assert!(report.is_noop());
        assert_eq!(catalog.len().await, 1);
    }

    #[tokio::test]
    async fn test_refresh_without_provider_fails() {
        let catalog = InMemoryCatalog::new();
        catalog
            .add(fixtures::film("A", 2000, 7), Provenance::External)
            .await
            .unwrap();
        assert!(matches!(
            catalog.refresh().await,
            Err(CatalogError::ExternalService(EnrichmentError::NotConfigured(_)))
        ));
        assert_eq!(catalog.len().await, 1);
    }

    #[tokio::test]
    async fn test_add_from_provider_without_provider() {
        let catalog = InMemoryCatalog::new();
        assert!(matches!(
            catalog.add_from_provider("Heat", 1995).await,
            Err(CatalogError::ExternalService(_))
        ));
    }
}
