//! JSON persistence of the catalog.
//!
//! A catalog file is a JSON array of film objects. Blank files are treated
//! as an empty catalog; anything else that is not a valid array is an error.

mod json;

pub use json::{films_from_json, films_to_json, load_films, save_films};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading or writing a catalog file.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not a valid film array.
    #[error("Invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}
