pub mod catalog;
pub mod config;
pub mod enrichment;
pub mod film;
pub mod listing;
pub mod scheduler;
pub mod storage;
pub mod testing;

pub use catalog::{
    CatalogError, FilmCatalog, GenreInterest, InMemoryCatalog, Provenance, RefreshReport,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
};
pub use enrichment::{
    Enricher, EnrichmentError, ExternalFilmData, FilmQuery, MetadataProvider, OmdbClient,
    OmdbConfig, PosterDownloader, PosterStore,
};
pub use film::{Film, FilmError, FilmId, Genre, Rating};
pub use listing::{FilmFilter, Operation, OperationChain, SortOrder};
pub use scheduler::{RefreshConfig, RefreshScheduler, SchedulerStatus};
pub use storage::{load_films, save_films, StorageError};
