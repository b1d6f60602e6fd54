use std::fmt;

use super::ListingError;
use crate::film::{Film, Genre, Rating};

/// Narrowing step of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilmFilter {
    All,
    Genre(Genre),
    Rating(Rating),
}

/// Ordering step of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    None,
    RatingAscending,
    RatingDescending,
}

/// A named, pure transform over a film sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Filter(FilmFilter),
    Sort(SortOrder),
}

impl Operation {
    /// Short label shown in the chain listing.
    pub fn name(&self) -> String {
        match self {
            Operation::Filter(FilmFilter::All) => "Filter: all".to_string(),
            Operation::Filter(FilmFilter::Genre(g)) => format!("Filter: genre {}", g),
            Operation::Filter(FilmFilter::Rating(r)) => format!("Filter: rating {}", r),
            Operation::Sort(SortOrder::None) => "Sort: none".to_string(),
            Operation::Sort(SortOrder::RatingAscending) => "Sort: rating ascending".to_string(),
            Operation::Sort(SortOrder::RatingDescending) => "Sort: rating descending".to_string(),
        }
    }

    pub fn apply(&self, mut films: Vec<Film>) -> Vec<Film> {
        match self {
            Operation::Filter(FilmFilter::All) | Operation::Sort(SortOrder::None) => films,
            Operation::Filter(FilmFilter::Genre(genre)) => {
                films.retain(|f| f.genre == *genre);
                films
            }
            Operation::Filter(FilmFilter::Rating(rating)) => {
                films.retain(|f| f.rating() == *rating);
                films
            }
            // `sort_by_key` is stable, so equal ratings keep their input order.
            Operation::Sort(SortOrder::RatingAscending) => {
                films.sort_by_key(|f| f.rating());
                films
            }
            Operation::Sort(SortOrder::RatingDescending) => {
                films.sort_by_key(|f| std::cmp::Reverse(f.rating()));
                films
            }
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Operations applied in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationChain {
    operations: Vec<Operation>,
}

impl OperationChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    /// Remove the operation at `index`, returning it.
    pub fn remove(&mut self, index: usize) -> Result<Operation, ListingError> {
        if index >= self.operations.len() {
            return Err(ListingError::InvalidIndex {
                index,
                len: self.operations.len(),
            });
        }
        Ok(self.operations.remove(index))
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn clear(&mut self) {
        self.operations.clear();
    }

    pub fn apply(&self, films: Vec<Film>) -> Vec<Film> {
        self.operations
            .iter()
            .fold(films, |acc, operation| operation.apply(acc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::fixtures::film_with_genre;

    fn sample() -> Vec<Film> {
        vec![
            film_with_genre("A", Genre::Drama, 2000, 7),
            film_with_genre("B", Genre::Comedy, 2001, 4),
            film_with_genre("C", Genre::Drama, 2002, 9),
            film_with_genre("D", Genre::Drama, 2003, 7),
        ]
    }

    fn names(films: &[Film]) -> Vec<&str> {
        films.iter().map(|f| f.name()).collect()
    }

    #[test]
    fn test_passthrough_variants() {
        let films = sample();
        assert_eq!(Operation::Filter(FilmFilter::All).apply(films.clone()), films);
        assert_eq!(Operation::Sort(SortOrder::None).apply(films.clone()), films);
    }

    #[test]
    fn test_filter_by_genre_and_rating() {
        let drama = Operation::Filter(FilmFilter::Genre(Genre::Drama)).apply(sample());
        assert_eq!(names(&drama), vec!["A", "C", "D"]);

        let seven = Rating::new(7).unwrap();
        let rated = Operation::Filter(FilmFilter::Rating(seven)).apply(sample());
        assert_eq!(names(&rated), vec!["A", "D"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let asc = Operation::Sort(SortOrder::RatingAscending).apply(sample());
        assert_eq!(names(&asc), vec!["B", "A", "D", "C"]);

        let desc = Operation::Sort(SortOrder::RatingDescending).apply(sample());
        assert_eq!(names(&desc), vec!["C", "A", "D", "B"]);
    }

    #[test]
    fn test_chain_applies_in_order() {
        let mut chain = OperationChain::new();
        chain.add(Operation::Filter(FilmFilter::Genre(Genre::Drama)));
        chain.add(Operation::Sort(SortOrder::RatingDescending));

        assert_eq!(names(&chain.apply(sample())), vec!["C", "A", "D"]);
    }

    #[test]
    fn test_chain_remove() {
        let mut chain = OperationChain::new();
        chain.add(Operation::Sort(SortOrder::RatingAscending));
        chain.add(Operation::Filter(FilmFilter::All));

        assert_eq!(
            chain.remove(2),
            Err(ListingError::InvalidIndex { index: 2, len: 2 })
        );
        assert_eq!(chain.remove(0), Ok(Operation::Sort(SortOrder::RatingAscending)));
        assert_eq!(chain.operations(), &[Operation::Filter(FilmFilter::All)]);
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(
            Operation::Filter(FilmFilter::Genre(Genre::SciFi)).name(),
            "Filter: genre SciFi"
        );
        assert_eq!(
            Operation::Sort(SortOrder::RatingDescending).to_string(),
            "Sort: rating descending"
        );
    }
}
