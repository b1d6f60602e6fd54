//! Poster image downloads into a local directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use super::PosterStore;

/// Errors that can occur while storing a poster.
#[derive(Debug, Error)]
pub enum PosterError {
    /// The image server answered with a non-success status.
    #[error("Failed to download poster from {url}: HTTP {status}")]
    Download { url: String, status: u16 },

    /// HTTP request failed.
    #[error("Poster request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Writing the image or preparing the directory failed.
    #[error("Poster file error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Empty URL.
    #[error("Poster URL is empty")]
    EmptyUrl,
}

impl PosterError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        PosterError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Downloads posters into `dir` as `1.jpg`, `2.jpg`, ...
///
/// The next file name is one past the highest numbered `.jpg` already in
/// the directory, so gaps left by removed posters are never refilled.
/// Downloads through one downloader are serialized so two concurrent calls
/// never pick the same name, and an existing file is never overwritten.
pub struct PosterDownloader {
    client: Client,
    dir: PathBuf,
    lock: Mutex<()>,
}

impl PosterDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, PosterError> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self::with_client(client, dir))
    }

    pub fn with_client(client: Client, dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path the next poster will be written to.
    async fn next_path(&self) -> Result<PathBuf, PosterError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| PosterError::io(&self.dir, e))?;

        let highest = highest_poster_number(&self.dir).await?;
        Ok(self.dir.join(format!("{}.jpg", highest + 1)))
    }
}

async fn highest_poster_number(dir: &Path) -> Result<u64, PosterError> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| PosterError::io(dir, e))?;

    let mut highest = 0;
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| PosterError::io(dir, e))?
    {
        let path = entry.path();
        let is_jpg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("jpg"));
        let number = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .and_then(|stem| stem.parse::<u64>().ok());
        if let (true, Some(number)) = (is_jpg, number) {
            highest = highest.max(number);
        }
    }
    Ok(highest)
}

/// Write `bytes` to a file that must not exist yet.
async fn write_new(path: &Path, bytes: &[u8]) -> Result<(), PosterError> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|e| PosterError::io(path, e))?;
    file.write_all(bytes)
        .await
        .map_err(|e| PosterError::io(path, e))?;
    file.flush().await.map_err(|e| PosterError::io(path, e))
}

#[async_trait]
impl PosterStore for PosterDownloader {
    async fn store(&self, url: &str) -> Result<PathBuf, PosterError> {
        if url.trim().is_empty() {
            return Err(PosterError::EmptyUrl);
        }

        let _guard = self.lock.lock().await;
        let path = self.next_path().await?;

        debug!("Downloading poster {} -> {}", url, path.display());

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PosterError::Download {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        write_new(&path, &bytes).await?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_next_path_follows_highest_number() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("posters");
        let downloader = PosterDownloader::with_client(Client::new(), &dir);

        assert_eq!(downloader.next_path().await.unwrap(), dir.join("1.jpg"));

        std::fs::write(dir.join("1.jpg"), b"x").unwrap();
        std::fs::write(dir.join("2.JPG"), b"x").unwrap();
        std::fs::write(dir.join("notes.txt"), b"x").unwrap();

        assert_eq!(downloader.next_path().await.unwrap(), dir.join("3.jpg"));
    }

    #[tokio::test]
    async fn test_next_path_skips_gaps() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("posters");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("2.jpg"), b"kept").unwrap();
        std::fs::write(dir.join("cover.jpg"), b"x").unwrap();

        let downloader = PosterDownloader::with_client(Client::new(), &dir);
        let next = downloader.next_path().await.unwrap();

        assert_eq!(next, dir.join("3.jpg"));
        assert!(!next.exists());
    }

    #[tokio::test]
    async fn test_write_new_refuses_existing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("1.jpg");
        std::fs::write(&path, b"kept").unwrap();

        let result = write_new(&path, b"other").await;

        assert!(matches!(result, Err(PosterError::Io { .. })));
        assert_eq!(std::fs::read(&path).unwrap(), b"kept");
    }

    #[tokio::test]
    async fn test_empty_url_rejected() {
        let temp = TempDir::new().unwrap();
        let downloader = PosterDownloader::with_client(Client::new(), temp.path());
        let result = downloader.store("  ").await;
        assert!(matches!(result, Err(PosterError::EmptyUrl)));
    }
}
