//! Startup orchestration.
//!
//! # Responsibilities
//! - Perform the first configuration load
//! - Start the config watcher and signal handlers
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: a bad config at startup is fatal
//! - Listener starts last (traffic only when a table is published)

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{ConfigError, ConfigManager, ConfigWatcher, FileSource};
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::routing::{ResolutionCache, Resolver};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("failed to load config: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the proxy with configuration from `config_path` until shutdown.
pub async fn run(config_path: PathBuf) -> Result<(), StartupError> {
    let cache = Arc::new(ResolutionCache::new());
    let manager = Arc::new(ConfigManager::new(
        Box::new(FileSource::new(&config_path)),
        cache,
    ));
    manager.load()?;

    let settings = manager.settings();
    tracing::info!(
        name = %settings.name,
        bind_address = %settings.bind_address(),
        "Starting proxy"
    );

    let shutdown = Shutdown::new();
    let watcher = ConfigWatcher::new(&config_path, manager.clone());
    let _signals = signals::spawn(shutdown.clone(), watcher.trigger());
    let running = watcher.run(shutdown.subscribe());

    let listener = TcpListener::bind(settings.bind_address()).await?;
    let server = HttpServer::new(&settings, Resolver::new(manager));
    server.run(listener, shutdown.subscribe()).await?;

    shutdown.trigger();
    if let Err(e) = running.task.await {
        tracing::error!(error = %e, "Config reload task failed");
    }
    Ok(())
}
