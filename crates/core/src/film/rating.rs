use std::fmt;

use serde::{Deserialize, Serialize};

use super::FilmError;

/// A film rating on the 1..=10 scale, or the explicit "unrated" sentinel.
///
/// User-facing constructors only accept 1..=10. [`Rating::UNRATED`] (stored
/// as `0`) is produced when external data carries no usable score; it is
/// accepted on load, rendered as "unrated" and never passes the
/// recommendation threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;
    pub const UNRATED: Rating = Rating(0);

    /// Validate a user-supplied rating.
    pub fn new(value: i64) -> Result<Self, FilmError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(FilmError::InvalidRating { rating: value })
        }
    }

    /// Map a provider score (e.g. IMDb `"8.8"`) onto the scale.
    ///
    /// Rounds half away from zero and clamps to 10. Non-finite or
    /// non-positive scores yield [`Rating::UNRATED`].
    pub fn from_score(score: f64) -> Self {
        if !score.is_finite() || score <= 0.0 {
            return Self::UNRATED;
        }
        let rounded = score.round().min(f64::from(Self::MAX));
        Self(rounded as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_rated(self) -> bool {
        self.0 >= Self::MIN
    }
}

impl TryFrom<u8> for Rating {
    type Error = FilmError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value == 0 {
            Ok(Self::UNRATED)
        } else {
            Self::new(i64::from(value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_rated() {
            write!(f, "{}", self.0)
        } else {
            f.write_str("unrated")
        }
    }
}
