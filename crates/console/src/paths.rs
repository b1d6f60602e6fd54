//! Validation of user-supplied catalog paths.

use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("Path is empty")]
    Empty,

    #[error("Path contains invalid characters")]
    InvalidCharacters,

    #[error("Cannot resolve path {0}")]
    Unresolvable(String),

    #[error("File does not exist: {0}")]
    NotFound(String),
}

/// Turn user input into an absolute path. The file need not exist.
pub fn resolve_path(input: &str) -> Result<PathBuf, PathError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(PathError::Empty);
    }
    if input.contains('\0') {
        return Err(PathError::InvalidCharacters);
    }
    std::path::absolute(Path::new(input)).map_err(|_| PathError::Unresolvable(input.to_string()))
}

/// Turn user input into an absolute path to an existing file.
pub fn validate_catalog_path(input: &str) -> Result<PathBuf, PathError> {
    let path = resolve_path(input)?;
    if !path.is_file() {
        return Err(PathError::NotFound(path.display().to_string()));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_rejects_blank_and_nul() {
        assert_eq!(validate_catalog_path("   "), Err(PathError::Empty));
        assert_eq!(
            validate_catalog_path("films\0.json"),
            Err(PathError::InvalidCharacters)
        );
    }

    #[test]
    fn test_rejects_missing_file_and_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("none.json");
        assert!(matches!(
            validate_catalog_path(missing.to_str().unwrap()),
            Err(PathError::NotFound(_))
        ));
        assert!(matches!(
            validate_catalog_path(dir.path().to_str().unwrap()),
            Err(PathError::NotFound(_))
        ));
    }

    #[test]
    fn test_resolve_relative_path() {
        let path = resolve_path("new-catalog.json").unwrap();
        assert!(path.is_absolute());
        assert!(path.ends_with("new-catalog.json"));
    }

    #[test]
    fn test_accepts_existing_file() {
        let file = NamedTempFile::new().unwrap();
        let input = format!("  {}  ", file.path().display());
        let path = validate_catalog_path(&input).unwrap();
        assert!(path.is_absolute());
        assert_eq!(path, file.path());
    }
}
