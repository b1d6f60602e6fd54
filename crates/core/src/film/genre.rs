use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::FilmError;

/// Closed set of genres a film can belong to.
///
/// Serialized as its label (`"Drama"`, `"SciFi"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Genre {
    Fantasy,
    Comedy,
    Drama,
    Action,
    Thriller,
    Adventure,
    SciFi,
    Horror,
    Animation,
    Documentary,
    Family,
    Romance,
    Historical,
    Crime,
    Mystery,
    Short,
}

impl Genre {
    /// All genres in declaration order.
    pub const ALL: [Genre; 16] = [
        Genre::Fantasy,
        Genre::Comedy,
        Genre::Drama,
        Genre::Action,
        Genre::Thriller,
        Genre::Adventure,
        Genre::SciFi,
        Genre::Horror,
        Genre::Animation,
        Genre::Documentary,
        Genre::Family,
        Genre::Romance,
        Genre::Historical,
        Genre::Crime,
        Genre::Mystery,
        Genre::Short,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Genre::Fantasy => "Fantasy",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Action => "Action",
            Genre::Thriller => "Thriller",
            Genre::Adventure => "Adventure",
            Genre::SciFi => "SciFi",
            Genre::Horror => "Horror",
            Genre::Animation => "Animation",
            Genre::Documentary => "Documentary",
            Genre::Family => "Family",
            Genre::Romance => "Romance",
            Genre::Historical => "Historical",
            Genre::Crime => "Crime",
            Genre::Mystery => "Mystery",
            Genre::Short => "Short",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Genre {
    type Err = FilmError;

    /// Case-insensitive label match. Hyphens and spaces are ignored so that
    /// provider spellings like `"Sci-Fi"` resolve.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .collect();

        Genre::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| FilmError::UnknownGenre(s.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("drama".parse::<Genre>().unwrap(), Genre::Drama);
        assert_eq!("  COMEDY ".parse::<Genre>().unwrap(), Genre::Comedy);
    }

    #[test]
    fn test_parse_provider_spelling() {
        assert_eq!("Sci-Fi".parse::<Genre>().unwrap(), Genre::SciFi);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "Western".parse::<Genre>().unwrap_err();
        assert_eq!(err, FilmError::UnknownGenre("Western".to_string()));
    }

    #[test]
    fn test_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Genre::SciFi).unwrap(), "\"SciFi\"");
        let genre: Genre = serde_json::from_str("\"Horror\"").unwrap();
        assert_eq!(genre, Genre::Horror);
    }

    #[test]
    fn test_label_roundtrips_for_all() {
        for genre in Genre::ALL {
            assert_eq!(genre.label().parse::<Genre>().unwrap(), genre);
        }
    }
}
