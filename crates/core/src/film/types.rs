//! The film record.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::{FilmError, Genre, Rating};

/// Catalog-assigned film identifier.
pub type FilmId = u32;

/// Earliest accepted release year.
pub const MIN_RELEASE_YEAR: i32 = 1800;

/// The current calendar year (UTC), upper bound for release years.
pub fn current_year() -> i32 {
    Utc::now().year()
}

fn validate_year(year: i64) -> Result<i32, FilmError> {
    let max = current_year();
    if (i64::from(MIN_RELEASE_YEAR)..=i64::from(max)).contains(&year) {
        Ok(year as i32)
    } else {
        Err(FilmError::InvalidYear { year, max })
    }
}

fn validate_name(name: String) -> Result<String, FilmError> {
    if name.trim().is_empty() {
        Err(FilmError::BlankName)
    } else {
        Ok(name)
    }
}

/// A film in the catalog.
///
/// `name`, `release_year` and `rating` are private so that every assignment
/// goes through validation. `id` is overwritten by the catalog on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "FilmRecord")]
pub struct Film {
    pub id: FilmId,
    name: String,
    pub genre: Genre,
    release_year: i32,
    rating: Rating,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub director: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot: Option<String>,
    /// Display order is insertion order.
    pub actors: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metacritic_rating: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailer_url: Option<String>,
}

impl Film {
    /// Create a user-authored film with the required fields validated.
    ///
    /// The rating must be on the 1..=10 scale; [`Rating::UNRATED`] is
    /// rejected.
    pub fn new(
        name: impl Into<String>,
        genre: Genre,
        release_year: i64,
        rating: Rating,
    ) -> Result<Self, FilmError> {
        if !rating.is_rated() {
            return Err(FilmError::InvalidRating {
                rating: i64::from(rating.value()),
            });
        }
        Self::build(name.into(), genre, release_year, rating)
    }

    /// Create a film from external metadata, which may carry no score.
    pub fn from_external(
        name: impl Into<String>,
        genre: Genre,
        release_year: i64,
        rating: Rating,
    ) -> Result<Self, FilmError> {
        Self::build(name.into(), genre, release_year, rating)
    }

    fn build(
        name: String,
        genre: Genre,
        release_year: i64,
        rating: Rating,
    ) -> Result<Self, FilmError> {
        Ok(Self {
            id: 0,
            name: validate_name(name)?,
            genre,
            release_year: validate_year(release_year)?,
            rating,
            director: None,
            plot: None,
            actors: Vec::new(),
            poster_path: None,
            imdb_rating: None,
            metacritic_rating: None,
            trailer_url: None,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn release_year(&self) -> i32 {
        self.release_year
    }

    pub fn rating(&self) -> Rating {
        self.rating
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), FilmError> {
        self.name = validate_name(name.into())?;
        Ok(())
    }

    pub fn set_release_year(&mut self, year: i64) -> Result<(), FilmError> {
        self.release_year = validate_year(year)?;
        Ok(())
    }

    pub fn set_rating(&mut self, rating: i64) -> Result<(), FilmError> {
        self.rating = Rating::new(rating)?;
        Ok(())
    }

    pub fn with_director(mut self, director: impl Into<String>) -> Self {
        self.director = Some(director.into());
        self
    }

    pub fn with_plot(mut self, plot: impl Into<String>) -> Self {
        self.plot = Some(plot.into());
        self
    }

    pub fn with_actors<I, S>(mut self, actors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actors = actors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_poster_path(mut self, path: impl Into<String>) -> Self {
        self.poster_path = Some(path.into());
        self
    }

    /// Re-check the field invariants.
    ///
    /// The release year bound moves with the clock, so a record built in one
    /// process is re-validated when it crosses into the catalog.
    pub fn validate(&self) -> Result<(), FilmError> {
        if self.name.trim().is_empty() {
            return Err(FilmError::BlankName);
        }
        validate_year(i64::from(self.release_year))?;
        Ok(())
    }
}

/// Wire shape of a film, validated into [`Film`] on deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilmRecord {
    #[serde(default)]
    id: FilmId,
    #[serde(alias = "title")]
    name: String,
    genre: Genre,
    release_year: i64,
    rating: Rating,
    #[serde(default)]
    director: Option<String>,
    #[serde(default)]
    plot: Option<String>,
    #[serde(default)]
    actors: Vec<String>,
    #[serde(default, alias = "poster")]
    poster_path: Option<String>,
    #[serde(default)]
    imdb_rating: Option<String>,
    #[serde(default)]
    metacritic_rating: Option<String>,
    #[serde(default)]
    trailer_url: Option<String>,
}

impl TryFrom<FilmRecord> for Film {
    type Error = FilmError;

    fn try_from(r: FilmRecord) -> Result<Self, Self::Error> {
        // Saved catalogs may hold unrated films from earlier lookups.
        let mut film = Film::build(r.name, r.genre, r.release_year, r.rating)?;
        film.id = r.id;
        film.director = r.director;
        film.plot = r.plot;
        film.actors = r.actors;
        film.poster_path = r.poster_path;
        film.imdb_rating = r.imdb_rating;
        film.metacritic_rating = r.metacritic_rating;
        film.trailer_url = r.trailer_url;
        Ok(film)
    }
}
