//! Mock poster store for testing.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::enrichment::{PosterError, PosterStore};

/// Records requested URLs and hands out `posters/{n}.jpg` paths without
/// touching the network or the file system.
#[derive(Debug, Default, Clone)]
pub struct MockPosterStore {
    stored: Arc<RwLock<Vec<String>>>,
    failing: Arc<RwLock<bool>>,
}

impl MockPosterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs successfully stored so far.
    pub async fn stored_urls(&self) -> Vec<String> {
        self.stored.read().await.clone()
    }

    /// Make every download fail with [`PosterError::Download`].
    pub async fn set_failing(&self, failing: bool) {
        *self.failing.write().await = failing;
    }
}

#[async_trait]
impl PosterStore for MockPosterStore {
    async fn store(&self, url: &str) -> Result<PathBuf, PosterError> {
        if *self.failing.read().await {
            return Err(PosterError::Download {
                url: url.to_string(),
                status: 404,
            });
        }
        let mut stored = self.stored.write().await;
        stored.push(url.to_string());
        Ok(PathBuf::from(format!("posters/{}.jpg", stored.len())))
    }
}
