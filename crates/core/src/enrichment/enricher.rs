//! Provider lookup + conversion + poster attachment.

use std::sync::Arc;

use tracing::{debug, warn};

use super::convert::{poster_url, to_film};
use super::types::{ExternalFilmData, FilmQuery};
use super::{EnrichmentError, MetadataProvider, PosterStore};
use crate::film::Film;

/// Turns provider lookups into ready-to-insert films.
#[derive(Clone)]
pub struct Enricher {
    provider: Arc<dyn MetadataProvider>,
    posters: Option<Arc<dyn PosterStore>>,
}

impl Enricher {
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            provider,
            posters: None,
        }
    }

    /// Download posters for converted films.
    pub fn with_posters(mut self, posters: Arc<dyn PosterStore>) -> Self {
        self.posters = Some(posters);
        self
    }

    /// Look up one film and convert it, downloading its poster.
    pub async fn lookup(&self, title: &str, year: i32) -> Result<Film, EnrichmentError> {
        let data = self.provider.fetch_by_title_and_year(title, year).await?;
        let mut film = to_film(&data)?;
        self.attach_poster(&mut film, &data, None).await;
        Ok(film)
    }

    /// Re-fetch a batch of existing films.
    ///
    /// The output is aligned with `films`. An entry is `None` when the
    /// provider had no match or the data could not be converted. Films that
    /// already have a poster keep it; no new download happens for them.
    pub async fn refetch(&self, films: &[Film]) -> Result<Vec<Option<Film>>, EnrichmentError> {
        let queries: Vec<FilmQuery> = films.iter().map(FilmQuery::from).collect();
        let results = self.provider.fetch_many(&queries).await?;

        let mut out = Vec::with_capacity(films.len());
        for (old, data) in films.iter().zip(results) {
            let Some(data) = data else {
                out.push(None);
                continue;
            };
            match to_film(&data) {
                Ok(mut film) => {
                    self.attach_poster(&mut film, &data, old.poster_path.as_deref())
                        .await;
                    out.push(Some(film));
                }
                Err(e) => {
                    debug!("Cannot convert '{}' ({}): {}", old.name(), old.release_year(), e);
                    out.push(None);
                }
            }
        }
        Ok(out)
    }

    async fn attach_poster(&self, film: &mut Film, data: &ExternalFilmData, existing: Option<&str>) {
        if let Some(path) = existing.filter(|p| !p.is_empty()) {
            film.poster_path = Some(path.to_string());
            return;
        }
        let (Some(posters), Some(url)) = (&self.posters, poster_url(data)) else {
            return;
        };
        match posters.store(&url).await {
            Ok(path) => {
                debug!("Stored poster for '{}' at {}", film.name(), path.display());
                film.poster_path = Some(path.to_string_lossy().into_owned());
            }
            Err(e) => warn!("Poster for '{}' not stored: {}", film.name(), e),
        }
    }
}
