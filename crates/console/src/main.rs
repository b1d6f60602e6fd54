mod builder;
mod menu;
mod paths;
mod prompt;
mod render;
mod state;

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use cinedex_core::config::{ConfigError, DEFAULT_CONFIG_PATH};
use cinedex_core::{
    load_config, load_films, save_films, validate_config, Config, Enricher, FilmCatalog,
    InMemoryCatalog, OmdbClient, PosterDownloader, RefreshScheduler, SanitizedConfig,
};

use menu::Session;
use paths::validate_catalog_path;
use prompt::Prompter;
use state::AppState;

/// How the menu session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    /// The user quit or closed the input.
    Finished,
    /// A shutdown signal arrived while the menu was running.
    Interrupted,
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(Outcome::Finished) => {}
        // A pending stdin read sits on the blocking pool and cannot be
        // cancelled, so dropping the runtime would wait for the next line.
        Ok(Outcome::Interrupted) => std::process::exit(0),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

async fn run() -> Result<Outcome> {
    // Determine config path
    let config_path = std::env::var("CINEDEX_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    // Load configuration; a missing file means defaults
    let (config, from_file) = match load_config(&config_path) {
        Ok(config) => (config, true),
        Err(ConfigError::FileNotFound(_)) => (Config::default(), false),
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to load config from {:?}", config_path))
        }
    };

    // Initialize logging on stderr so it stays out of the menu
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if from_file {
        info!("Configuration loaded from {:?}", config_path);
    } else {
        info!("No configuration at {:?}, using defaults", config_path);
    }

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;
    info!(
        "Effective configuration: {}",
        serde_json::to_string(&SanitizedConfig::from(&config)).unwrap_or_default()
    );

    // Create catalog, with enrichment if an API key is configured
    let catalog: Arc<dyn FilmCatalog> = match create_enricher(&config)? {
        Some(enricher) => {
            info!("OMDb enrichment enabled");
            Arc::new(InMemoryCatalog::with_enricher(enricher))
        }
        None => {
            warn!("No OMDb API key configured, add-by-title and refresh are unavailable");
            Arc::new(InMemoryCatalog::new())
        }
    };

    let mut io = Prompter::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout());

    // Load the catalog file
    let catalog_path = load_catalog(&config, catalog.as_ref(), &mut io).await?;

    // Start periodic refresh
    let scheduler = RefreshScheduler::new(config.refresh.clone(), Arc::clone(&catalog));
    scheduler.start().await;

    let mut session = Session::new(
        AppState::new(config, Arc::clone(&catalog), catalog_path.clone()),
        io,
    );

    let outcome = drive_session(
        &mut session,
        catalog.as_ref(),
        &catalog_path,
        shutdown_signal(),
    )
    .await;

    info!("Stopping refresh scheduler...");
    scheduler.stop().await;

    let outcome = outcome?;
    info!("Goodbye");
    Ok(outcome)
}

/// Run the menu until it finishes or `shutdown` resolves.
///
/// On shutdown the catalog is saved to `catalog_path` before returning.
async fn drive_session<R, W, S>(
    session: &mut Session<R, W>,
    catalog: &dyn FilmCatalog,
    catalog_path: &Path,
    shutdown: S,
) -> Result<Outcome>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
    S: Future<Output = ()>,
{
    tokio::select! {
        result = session.run() => {
            result.context("Console I/O failed")?;
            Ok(Outcome::Finished)
        }
        _ = shutdown => {
            info!("Interrupted, saving catalog");
            let films = catalog.all().await;
            if let Err(e) = save_films(catalog_path, &films).await {
                error!("Catalog not saved: {}", e);
            }
            Ok(Outcome::Interrupted)
        }
    }
}

fn create_enricher(config: &Config) -> Result<Option<Enricher>> {
    if !config.enrichment_enabled() {
        return Ok(None);
    }

    let client = OmdbClient::new(config.omdb.clone()).context("Failed to create OMDb client")?;
    let posters = PosterDownloader::new(&config.posters.dir)
        .context("Failed to create poster downloader")?;
    info!("Posters will be stored in {:?}", posters.dir());

    Ok(Some(
        Enricher::new(Arc::new(client)).with_posters(Arc::new(posters)),
    ))
}

/// Find and load the catalog file, asking the user until one loads.
///
/// Loaded films are inserted as custom records in file order.
async fn load_catalog<R, W>(
    config: &Config,
    catalog: &dyn FilmCatalog,
    io: &mut Prompter<R, W>,
) -> Result<PathBuf>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut candidate = match &config.catalog.path {
        Some(path) => match validate_catalog_path(&path.to_string_lossy()) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Configured catalog path unusable: {}", e);
                None
            }
        },
        None => None,
    };

    loop {
        let path = match candidate.take() {
            Some(path) => path,
            None => {
                let input = io
                    .ask("Path to the catalog JSON file:")
                    .await
                    .context("No catalog file given")?;
                match validate_catalog_path(&input) {
                    Ok(path) => path,
                    Err(e) => {
                        io.say(&e.to_string()).await?;
                        continue;
                    }
                }
            }
        };

        match import_films(catalog, &path).await {
            Ok(count) => {
                io.say(&format!("Loaded {} films from {}.", count, path.display()))
                    .await?;
                return Ok(path);
            }
            Err(e) => {
                io.say(&format!("{:#}. Try another file.", e)).await?;
            }
        }
    }
}

async fn import_films(catalog: &dyn FilmCatalog, path: &Path) -> Result<usize> {
    let films = load_films(path).await?;
    let count = films.len();
    for film in films {
        catalog
            .add_custom(film)
            .await
            .context("Catalog file holds an invalid film")?;
    }
    info!("Imported {} films from {:?}", count, path);
    Ok(count)
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use cinedex_core::testing::fixtures;
    use tempfile::TempDir;
    use tokio::io::duplex;

    #[tokio::test]
    async fn test_shutdown_saves_while_waiting_for_input() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("films.json");
        let catalog: Arc<dyn FilmCatalog> = Arc::new(InMemoryCatalog::new());
        catalog
            .add_custom(fixtures::film("Arrival", 2016, 9))
            .await
            .unwrap();

        // The writer half stays open, so the menu blocks on its first prompt.
        let (_keyboard, input) = duplex(64);
        let io = Prompter::new(BufReader::new(input), Vec::new());
        let state = AppState::new(Config::default(), Arc::clone(&catalog), path.clone());
        let mut session = Session::new(state, io);

        let outcome = drive_session(&mut session, catalog.as_ref(), &path, async {})
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Interrupted);
        let saved = load_films(&path).await.unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].name(), "Arrival");
    }

    #[tokio::test]
    async fn test_closed_input_finishes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("films.json");
        let catalog: Arc<dyn FilmCatalog> = Arc::new(InMemoryCatalog::new());

        let io = Prompter::new(BufReader::new(&b""[..]), Vec::new());
        let state = AppState::new(Config::default(), Arc::clone(&catalog), path.clone());
        let mut session = Session::new(state, io);

        let outcome = drive_session(
            &mut session,
            catalog.as_ref(),
            &path,
            std::future::pending::<()>(),
        )
        .await
        .unwrap();

        assert_eq!(outcome, Outcome::Finished);
        assert!(path.exists());
    }
}
