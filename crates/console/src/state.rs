use std::path::{Path, PathBuf};
use std::sync::Arc;

use cinedex_core::{Config, FilmCatalog, GenreInterest, OperationChain};

/// Everything one console session works on.
pub struct AppState {
    config: Config,
    catalog: Arc<dyn FilmCatalog>,
    catalog_path: PathBuf,
    pub interest: GenreInterest,
    pub operations: OperationChain,
}

impl AppState {
    pub fn new(config: Config, catalog: Arc<dyn FilmCatalog>, catalog_path: PathBuf) -> Self {
        Self {
            config,
            catalog,
            catalog_path,
            interest: GenreInterest::new(),
            operations: OperationChain::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn catalog(&self) -> &dyn FilmCatalog {
        self.catalog.as_ref()
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    pub fn set_catalog_path(&mut self, path: PathBuf) {
        self.catalog_path = path;
    }
}
