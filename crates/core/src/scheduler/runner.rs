//! Refresh scheduler implementation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{broadcast, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::catalog::FilmCatalog;

use super::config::RefreshConfig;
use super::types::SchedulerStatus;

/// Runs [`FilmCatalog::refresh`] on a fixed interval in a background task.
pub struct RefreshScheduler {
    config: RefreshConfig,
    interval: Duration,
    catalog: Arc<dyn FilmCatalog>,

    // Runtime state
    running: Arc<AtomicBool>,
    status: Arc<RwLock<SchedulerStatus>>,
    shutdown_tx: broadcast::Sender<()>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl RefreshScheduler {
    /// Create a new scheduler. Nothing runs until [`start`](Self::start).
    pub fn new(config: RefreshConfig, catalog: Arc<dyn FilmCatalog>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        let interval = Duration::from_secs(config.interval_secs);

        Self {
            config,
            interval,
            catalog,
            running: Arc::new(AtomicBool::new(false)),
            status: Arc::new(RwLock::new(SchedulerStatus::default())),
            shutdown_tx,
            handle: Mutex::new(None),
        }
    }

    /// Override the interval with a finer-grained duration.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Start the background loop.
    ///
    /// Does nothing when the scheduler is disabled or already running.
    pub async fn start(&self) {
        if !self.config.enabled {
            info!("Periodic refresh disabled");
            return;
        }
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Refresh scheduler already running");
            return;
        }

        info!(
            "Starting refresh scheduler (every {:?}, run_on_start={})",
            self.interval, self.config.run_on_start
        );
        self.status.write().await.running = true;

        let handle = self.spawn_refresh_loop();
        *self.handle.lock().await = Some(handle);
    }

    /// Stop the background loop and wait for it to exit.
    ///
    /// A pass already in progress runs to completion first.
    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            debug!("Refresh scheduler not running");
            return;
        }

        info!("Stopping refresh scheduler");
        let _ = self.shutdown_tx.send(());

        if let Some(handle) = self.handle.lock().await.take() {
            if let Err(e) = handle.await {
                error!("Refresh loop ended abnormally: {}", e);
            }
        }

        self.status.write().await.running = false;
        info!("Refresh scheduler stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub async fn status(&self) -> SchedulerStatus {
        self.status.read().await.clone()
    }

    fn spawn_refresh_loop(&self) -> JoinHandle<()> {
        let running = Arc::clone(&self.running);
        let catalog = Arc::clone(&self.catalog);
        let status = Arc::clone(&self.status);
        let interval = self.interval;
        let run_on_start = self.config.run_on_start;
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            info!("Refresh loop started");
            if run_on_start {
                run_pass(catalog.as_ref(), &status).await;
            }
            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        info!("Refresh loop received shutdown signal");
                        break;
                    }
                    _ = tokio::time::sleep(interval) => {
                        if !running.load(Ordering::Relaxed) {
                            break;
                        }
                        run_pass(catalog.as_ref(), &status).await;
                    }
                }
            }
            info!("Refresh loop stopped");
        })
    }
}

async fn run_pass(catalog: &dyn FilmCatalog, status: &RwLock<SchedulerStatus>) {
    let result = catalog.refresh().await;

    let mut status = status.write().await;
    status.passes += 1;
    status.last_run_at = Some(Utc::now());
    match result {
        Ok(report) => {
            if !report.is_noop() {
                info!(
                    "Scheduled refresh: {} refreshed, {} dropped",
                    report.refreshed, report.dropped
                );
            }
            status.last_report = Some(report);
            status.last_error = None;
        }
        Err(e) => {
            error!("Scheduled refresh failed: {}", e);
            status.last_error = Some(e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{InMemoryCatalog, Provenance};
    use crate::enrichment::Enricher;
    use crate::testing::{fixtures, MockMetadataProvider};

    async fn setup() -> (Arc<InMemoryCatalog>, Arc<MockMetadataProvider>) {
        let provider = Arc::new(MockMetadataProvider::new());
        provider
            .add_film(fixtures::external_film("Heat", 1995, "Crime", "8.3"))
            .await;
        let catalog = Arc::new(InMemoryCatalog::with_enricher(Enricher::new(provider.clone())));
        catalog
            .add(fixtures::film("Heat", 1995, 5), Provenance::External)
            .await
            .unwrap();
        (catalog, provider)
    }

    async fn wait_for_passes(scheduler: &RefreshScheduler, passes: u64) -> bool {
        for _ in 0..100 {
            if scheduler.status().await.passes >= passes {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    #[tokio::test]
    async fn test_run_on_start() {
        let (catalog, provider) = setup().await;
        let scheduler = RefreshScheduler::new(RefreshConfig::default(), catalog.clone());

        scheduler.start().await;
        assert!(scheduler.is_running());
        assert!(wait_for_passes(&scheduler, 1).await);
        scheduler.stop().await;

        let status = scheduler.status().await;
        assert!(!status.running);
        assert_eq!(status.last_report.unwrap().refreshed, 1);
        assert_eq!(provider.query_count().await, 1);
        assert_eq!(catalog.all().await[0].rating().value(), 8);
    }

    #[tokio::test]
    async fn test_interval_ticks() {
        let (catalog, _provider) = setup().await;
        let config = RefreshConfig {
            run_on_start: false,
            ..Default::default()
        };
        let scheduler =
            RefreshScheduler::new(config, catalog).with_interval(Duration::from_millis(20));

        scheduler.start().await;
        assert!(wait_for_passes(&scheduler, 2).await);
        scheduler.stop().await;
    }

    #[tokio::test]
    async fn test_no_pass_before_first_interval() {
        let (catalog, provider) = setup().await;
        let config = RefreshConfig {
            run_on_start: false,
            ..Default::default()
        };
        let scheduler = RefreshScheduler::new(config, catalog);

        scheduler.start().await;
        tokio::time::sleep(Duration::from_millis(50)).await;
        scheduler.stop().await;

        assert_eq!(scheduler.status().await.passes, 0);
        assert_eq!(provider.query_count().await, 0);
    }

    #[tokio::test]
    async fn test_failed_pass_is_recorded() {
        let (catalog, provider) = setup().await;
        provider.set_unreachable(true).await;
        let scheduler = RefreshScheduler::new(RefreshConfig::default(), catalog.clone());

        scheduler.start().await;
        assert!(wait_for_passes(&scheduler, 1).await);
        scheduler.stop().await;

        let status = scheduler.status().await;
        assert!(status.last_error.is_some());
        assert!(status.last_report.is_none());
        assert_eq!(catalog.len().await, 1);
    }

    #[tokio::test]
    async fn test_disabled_does_not_start() {
        let (catalog, _provider) = setup().await;
        let config = RefreshConfig {
            enabled: false,
            ..Default::default()
        };
        let scheduler = RefreshScheduler::new(config, catalog);

        scheduler.start().await;
        assert!(!scheduler.is_running());
        scheduler.stop().await;
    }

    #[tokio::test]
    async fn test_start_twice_and_stop_twice() {
        let (catalog, _provider) = setup().await;
        let scheduler = RefreshScheduler::new(RefreshConfig::default(), catalog);

        scheduler.start().await;
        scheduler.start().await;
        scheduler.stop().await;
        scheduler.stop().await;
        assert!(!scheduler.is_running());
    }
}
