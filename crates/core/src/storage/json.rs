use std::path::Path;

use tokio::fs;
use tracing::debug;

use super::StorageError;
use crate::film::Film;

/// Parse a catalog document.
pub fn films_from_json(content: &str) -> Result<Vec<Film>, StorageError> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(content)?)
}

/// Render films as an indented JSON array.
pub fn films_to_json(films: &[Film]) -> Result<String, StorageError> {
    Ok(serde_json::to_string_pretty(films)?)
}

/// Read films from `path`.
pub async fn load_films(path: &Path) -> Result<Vec<Film>, StorageError> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| StorageError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
    let films = films_from_json(&content)?;
    debug!("Loaded {} films from {}", films.len(), path.display());
    Ok(films)
}

/// Write films to `path`, replacing its content.
pub async fn save_films(path: &Path, films: &[Film]) -> Result<(), StorageError> {
    let content = films_to_json(films)?;
    fs::write(path, content)
        .await
        .map_err(|e| StorageError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
    debug!("Saved {} films to {}", films.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::film::Genre;
    use crate::testing::fixtures;
    use tempfile::TempDir;

    #[test]
    fn test_blank_content_is_empty() {
        assert!(films_from_json("").unwrap().is_empty());
        assert!(films_from_json("  \n\t").unwrap().is_empty());
        assert!(films_from_json("[]").unwrap().is_empty());
    }

    #[test]
    fn test_malformed_content_fails() {
        assert!(matches!(
            films_from_json("[{\"name\": "),
            Err(StorageError::Json(_))
        ));
        assert!(films_from_json("{}").is_err());
    }

    #[test]
    fn test_invalid_field_value_fails() {
        let json = r#"[{"id": 0, "name": "X", "genre": "Drama", "releaseYear": 1700, "rating": 5}]"#;
        assert!(films_from_json(json).is_err());
    }

    #[test]
    fn test_accepts_title_alias_and_missing_optionals() {
        let json = r#"[{"title": "Alien", "genre": "Horror", "releaseYear": 1979, "rating": 9}]"#;
        let films = films_from_json(json).unwrap();
        assert_eq!(films[0].name(), "Alien");
        assert_eq!(films[0].genre, Genre::Horror);
        assert!(films[0].actors.is_empty());
        assert!(films[0].director.is_none());
    }

    #[test]
    fn test_output_is_indented_array() {
        let json = films_to_json(&[fixtures::film("X", 2000, 7)]).unwrap();
        assert!(json.starts_with("[\n"));
        assert!(json.contains("\"releaseYear\": 2000"));
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("films.json");

        let films = vec![
            fixtures::film("X", 2000, 7).with_director("Someone"),
            fixtures::film_with_genre("Y", Genre::Comedy, 1999, 4).with_actors(["A", "B"]),
        ];
        save_films(&path, &films).await.unwrap();

        assert_eq!(load_films(&path).await.unwrap(), films);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_films(&dir.path().join("nope.json")).await.unwrap_err();
        assert!(matches!(err, StorageError::Io { .. }));
    }
}
