//! Types exchanged with the metadata provider.

use serde::{Deserialize, Serialize};

use crate::film::Film;

/// Film metadata as returned by the provider, before conversion.
///
/// Values are kept as the provider's strings; parsing into a [`Film`]
/// happens in [`super::convert`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ExternalFilmData {
    pub title: String,
    pub year: String,
    /// Comma-joined genre list, e.g. `"Action, Sci-Fi"`.
    pub genre: String,
    /// Poster image URL.
    pub poster: String,
    pub imdb_rating: String,
    pub metascore: String,
    pub plot: String,
    pub director: String,
    /// Comma-joined actor names.
    pub actors: String,
    /// Provider id used to build the trailer link.
    pub imdb_id: String,
}

/// A lookup key for the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilmQuery {
    pub title: String,
    pub year: i32,
}

impl FilmQuery {
    pub fn new(title: impl Into<String>, year: i32) -> Self {
        Self {
            title: title.into(),
            year,
        }
    }
}

impl From<&Film> for FilmQuery {
    fn from(film: &Film) -> Self {
        Self::new(film.name(), film.release_year())
    }
}
