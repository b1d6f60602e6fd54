//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the enrichment traits so
//! the catalog and its refresh logic can be exercised without network
//! access.
//!
//! # Example
//!
//! ```rust,ignore
//! use cinedex_core::testing::{fixtures, MockMetadataProvider};
//!
//! let provider = MockMetadataProvider::new();
//! provider.add_film(fixtures::external_film("Alien", 1979, "Horror", "8.5")).await;
//! ```

mod mock_poster_store;
mod mock_provider;

pub use mock_poster_store::MockPosterStore;
pub use mock_provider::MockMetadataProvider;

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::enrichment::ExternalFilmData;
    use crate::film::{Film, Genre, Rating};

    /// Provider data with reasonable defaults.
    pub fn external_film(title: &str, year: i32, genre: &str, imdb_rating: &str) -> ExternalFilmData {
        let slug = title.to_lowercase().replace(' ', "-");
        ExternalFilmData {
            title: title.to_string(),
            year: year.to_string(),
            genre: genre.to_string(),
            poster: format!("https://img.example/{}.jpg", slug),
            imdb_rating: imdb_rating.to_string(),
            metascore: "70".to_string(),
            plot: format!("A film about {}.", title.to_lowercase()),
            director: "Jane Doe".to_string(),
            actors: "Actor One, Actor Two".to_string(),
            imdb_id: format!("tt-{}", slug),
        }
    }

    /// A Drama film with the given rating.
    pub fn film(name: &str, year: i64, rating: i64) -> Film {
        film_with_genre(name, Genre::Drama, year, rating)
    }

    pub fn film_with_genre(name: &str, genre: Genre, year: i64, rating: i64) -> Film {
        let rating = Rating::new(rating).expect("fixture rating in range");
        Film::new(name, genre, year, rating).expect("fixture film is valid")
    }
}
