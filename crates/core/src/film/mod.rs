//! Film records and their field invariants.
//!
//! Every path that sets a release year, rating or name goes through the
//! checks in this module, so an out-of-range value is rejected at the
//! mutation site and never reaches the catalog.

mod genre;
mod rating;
mod types;

pub use genre::Genre;
pub use rating::Rating;
pub use types::{current_year, Film, FilmId, MIN_RELEASE_YEAR};

use thiserror::Error;

/// Field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilmError {
    /// Release year outside `1800..=current year`.
    #[error("Release year {year} must be between 1800 and {max}")]
    InvalidYear { year: i64, max: i32 },

    /// Rating outside `1..=10`.
    #[error("Rating {rating} must be between 1 and 10")]
    InvalidRating { rating: i64 },

    /// Name empty or whitespace only.
    #[error("Film name must not be blank")]
    BlankName,

    /// Genre label not in the closed enumeration.
    #[error("Unknown genre: {0}")]
    UnknownGenre(String),
}
