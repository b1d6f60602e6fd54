//! Periodic background refresh of the catalog.
//!
//! The scheduler owns no catalog state of its own; every pass goes through
//! [`FilmCatalog::refresh`](crate::catalog::FilmCatalog::refresh) and thereby
//! through the same lock as foreground operations.

mod config;
mod runner;
mod types;

pub use config::RefreshConfig;
pub use runner::RefreshScheduler;
pub use types::SchedulerStatus;
