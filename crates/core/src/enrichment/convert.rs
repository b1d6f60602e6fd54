//! Conversion of provider data into catalog films.
//!
//! Year and genre are strict: an unparseable year or an unknown first genre
//! fails the whole record. The rating is lenient: it is clamped to 10 and
//! falls back to [`Rating::UNRATED`] when absent or unparseable.

use thiserror::Error;

use super::types::ExternalFilmData;
use crate::film::{Film, FilmError, Genre, Rating};

/// Provider placeholder for missing values.
const NOT_AVAILABLE: &str = "N/A";

/// Reasons provider data cannot become a film.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("Release year is missing")]
    MissingYear,

    #[error("Release year is not a number: {0}")]
    InvalidYear(String),

    #[error("Genre is missing")]
    MissingGenre,

    #[error(transparent)]
    Film(#[from] FilmError),
}

/// Build a film from provider data. The poster is left unset.
pub fn to_film(data: &ExternalFilmData) -> Result<Film, ConversionError> {
    let year = parse_release_year(&data.year)?;
    let genre = parse_genre(&data.genre)?;
    let rating = parse_rating(&data.imdb_rating);

    let mut film = Film::from_external(data.title.trim(), genre, year, rating)?;
    film.plot = available(&data.plot);
    film.director = available(&data.director);
    film.actors = parse_actors(&data.actors);
    film.imdb_rating = available(&data.imdb_rating);
    film.metacritic_rating = available(&data.metascore);
    film.trailer_url = trailer_url(&data.imdb_id);

    Ok(film)
}

pub fn parse_release_year(year: &str) -> Result<i64, ConversionError> {
    let year = year.trim();
    if year.is_empty() {
        return Err(ConversionError::MissingYear);
    }
    year.parse()
        .map_err(|_| ConversionError::InvalidYear(year.to_string()))
}

/// First comma-separated token, matched case-insensitively.
pub fn parse_genre(genres: &str) -> Result<Genre, ConversionError> {
    let first = genres.split(',').next().unwrap_or_default().trim();
    if first.is_empty() {
        return Err(ConversionError::MissingGenre);
    }
    Ok(first.parse()?)
}

pub fn parse_rating(rating: &str) -> Rating {
    rating
        .trim()
        .parse::<f64>()
        .map(Rating::from_score)
        .unwrap_or(Rating::UNRATED)
}

pub fn parse_actors(actors: &str) -> Vec<String> {
    if available(actors).is_none() {
        return Vec::new();
    }
    actors
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn trailer_url(imdb_id: &str) -> Option<String> {
    available(imdb_id).map(|id| format!("https://www.imdb.com/title/{}/videogallery", id))
}

/// Poster URL if the provider returned one.
pub fn poster_url(data: &ExternalFilmData) -> Option<String> {
    available(&data.poster)
}

fn available(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() || value == NOT_AVAILABLE {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> ExternalFilmData {
        ExternalFilmData {
            title: "The Matrix".to_string(),
            year: "1999".to_string(),
            genre: "Action, Sci-Fi".to_string(),
            poster: "https://img.example/matrix.jpg".to_string(),
            imdb_rating: "8.7".to_string(),
            metascore: "73".to_string(),
            plot: "A hacker wakes up.".to_string(),
            director: "Lana Wachowski, Lilly Wachowski".to_string(),
            actors: "Keanu Reeves,  Laurence Fishburne ,Carrie-Anne Moss".to_string(),
            imdb_id: "tt0133093".to_string(),
        }
    }

    #[test]
    fn test_to_film() {
        let film = to_film(&matrix()).unwrap();
        assert_eq!(film.name(), "The Matrix");
        assert_eq!(film.release_year(), 1999);
        assert_eq!(film.genre, Genre::Action);
        assert_eq!(film.rating().value(), 9);
        assert_eq!(
            film.actors,
            vec!["Keanu Reeves", "Laurence Fishburne", "Carrie-Anne Moss"]
        );
        assert_eq!(film.imdb_rating.as_deref(), Some("8.7"));
        assert_eq!(film.metacritic_rating.as_deref(), Some("73"));
        assert_eq!(
            film.trailer_url.as_deref(),
            Some("https://www.imdb.com/title/tt0133093/videogallery")
        );
        assert!(film.poster_path.is_none());
    }

    #[test]
    fn test_unparseable_year_fails() {
        let mut data = matrix();
        data.year = "1999–2003".to_string();
        assert!(matches!(
            to_film(&data),
            Err(ConversionError::InvalidYear(_))
        ));

        data.year = String::new();
        assert_eq!(to_film(&data).unwrap_err(), ConversionError::MissingYear);
    }

    #[test]
    fn test_year_out_of_range_fails() {
        let mut data = matrix();
        data.year = "1700".to_string();
        assert!(matches!(
            to_film(&data),
            Err(ConversionError::Film(FilmError::InvalidYear { .. }))
        ));
    }

    #[test]
    fn test_genre_uses_first_token() {
        assert_eq!(parse_genre("drama, Romance").unwrap(), Genre::Drama);
        assert_eq!(parse_genre("Sci-Fi").unwrap(), Genre::SciFi);
        assert_eq!(parse_genre(" ").unwrap_err(), ConversionError::MissingGenre);
        assert!(matches!(
            parse_genre("Western, Drama"),
            Err(ConversionError::Film(FilmError::UnknownGenre(_)))
        ));
    }

    #[test]
    fn test_rating_fallbacks() {
        assert_eq!(parse_rating("N/A"), Rating::UNRATED);
        assert_eq!(parse_rating(""), Rating::UNRATED);
        assert_eq!(parse_rating("11.5").value(), 10);
        assert_eq!(parse_rating("6.4").value(), 6);
    }

    #[test]
    fn test_missing_rating_still_converts() {
        let mut data = matrix();
        data.imdb_rating = "N/A".to_string();
        let film = to_film(&data).unwrap();
        assert_eq!(film.rating(), Rating::UNRATED);
        assert!(film.imdb_rating.is_none());
    }

    #[test]
    fn test_not_available_fields() {
        let mut data = matrix();
        data.actors = "N/A".to_string();
        data.imdb_id = "N/A".to_string();
        data.poster = "N/A".to_string();
        let film = to_film(&data).unwrap();
        assert!(film.actors.is_empty());
        assert!(film.trailer_url.is_none());
        assert!(poster_url(&data).is_none());
    }
}
