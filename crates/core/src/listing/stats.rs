//! Distribution counts for charts and filter menus.

use std::collections::BTreeMap;

use crate::film::{Film, Genre, Rating};

/// Films per genre, in declaration order, omitting genres with no films.
pub fn genre_breakdown(films: &[Film]) -> Vec<(Genre, usize)> {
    let mut counts: BTreeMap<Genre, usize> = BTreeMap::new();
    for film in films {
        *counts.entry(film.genre).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// Films per rating, ascending, omitting ratings with no films.
pub fn rating_breakdown(films: &[Film]) -> Vec<(Rating, usize)> {
    let mut counts: BTreeMap<Rating, usize> = BTreeMap::new();
    for film in films {
        *counts.entry(film.rating()).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// Genres present in `films`.
pub fn available_genres(films: &[Film]) -> Vec<Genre> {
    genre_breakdown(films).into_iter().map(|(g, _)| g).collect()
}

/// Ratings present in `films`.
pub fn available_ratings(films: &[Film]) -> Vec<Rating> {
    rating_breakdown(films).into_iter().map(|(r, _)| r).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::film_with_genre;

    fn sample() -> Vec<Film> {
        vec![
            film_with_genre("A", Genre::Horror, 2000, 8),
            film_with_genre("B", Genre::Comedy, 2001, 3),
            film_with_genre("C", Genre::Horror, 2002, 8),
            film_with_genre("D", Genre::Fantasy, 2003, 10),
        ]
    }

    #[test]
    fn test_genre_breakdown_in_declaration_order() {
        assert_eq!(
            genre_breakdown(&sample()),
            vec![(Genre::Fantasy, 1), (Genre::Comedy, 1), (Genre::Horror, 2)]
        );
    }

    #[test]
    fn test_rating_breakdown_ascending() {
        let counts: Vec<(u8, usize)> = rating_breakdown(&sample())
            .into_iter()
            .map(|(r, c)| (r.value(), c))
            .collect();
        assert_eq!(counts, vec![(3, 1), (8, 2), (10, 1)]);
    }

    #[test]
    fn test_available_choices() {
        let films = sample();
        assert_eq!(available_genres(&films).len(), 3);
        assert_eq!(available_ratings(&films).len(), 3);
        assert!(available_genres(&[]).is_empty());
    }
}
