//! Display-side transforms over catalog snapshots.
//!
//! Nothing here touches the catalog: every function takes the snapshot it
//! works on and returns a new one.

mod operation;
mod stats;

pub use operation::{FilmFilter, Operation, OperationChain, SortOrder};
pub use stats::{available_genres, available_ratings, genre_breakdown, rating_breakdown};

use thiserror::Error;

/// Errors for operation chain edits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListingError {
    #[error("Invalid input: no operation at index {index} (chain has {len})")]
    InvalidIndex { index: usize, len: usize },
}
