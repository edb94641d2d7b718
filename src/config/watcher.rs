//! Configuration file watcher for hot reload.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::manager::ConfigManager;
use crate::lifecycle::ShutdownSignal;

/// Quiet period used to fold a burst of file events into one reload.
const DEBOUNCE: Duration = Duration::from_millis(50);

/// Watches the configuration file and reloads the [`ConfigManager`] when it
/// changes.
///
/// The parent directory is watched rather than the file itself, so editors
/// that save by writing a new file and renaming it over the old one are
/// still noticed.
pub struct ConfigWatcher {
    path: PathBuf,
    manager: Arc<ConfigManager>,
    reload_tx: mpsc::UnboundedSender<()>,
    reload_rx: mpsc::UnboundedReceiver<()>,
}

/// A started watcher. Dropping it stops file notifications.
pub struct RunningWatcher {
    watcher: Option<RecommendedWatcher>,
    pub task: JoinHandle<()>,
}

impl RunningWatcher {
    /// False when file notifications could not be set up and only explicit
    /// triggers (SIGHUP) reach the reload task.
    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }
}

impl ConfigWatcher {
    pub fn new(path: &Path, manager: Arc<ConfigManager>) -> Self {
        let (reload_tx, reload_rx) = mpsc::unbounded_channel();
        Self {
            path: path.to_path_buf(),
            manager,
            reload_tx,
            reload_rx,
        }
    }

    /// Handle for requesting a reload from elsewhere (e.g. SIGHUP).
    pub fn trigger(&self) -> mpsc::UnboundedSender<()> {
        self.reload_tx.clone()
    }

    /// Start the file watcher and the reload task.
    ///
    /// A watcher that cannot be set up is logged and skipped; the reload
    /// task still runs for explicit triggers. Must be called from within a
    /// Tokio runtime.
    pub fn run(self, shutdown: ShutdownSignal) -> RunningWatcher {
        let watcher = match self.watch() {
            Ok(watcher) => {
                tracing::info!(path = ?self.path, "Config watcher started");
                Some(watcher)
            }
            Err(e) => {
                tracing::error!(
                    path = ?self.path,
                    error = %e,
                    "Failed to watch config file. Reload on SIGHUP only."
                );
                None
            }
        };

        let task = tokio::spawn(reload_loop(self.manager, self.reload_rx, shutdown));
        RunningWatcher { watcher, task }
    }

    fn watch(&self) -> Result<RecommendedWatcher, notify::Error> {
        let tx = self.reload_tx.clone();
        let file_name: Option<OsString> = self.path.file_name().map(|n| n.to_os_string());
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if is_config_event(&event, file_name.as_deref()) {
                        tracing::info!("Config file change detected, reloading...");
                        let _ = tx.send(());
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        Ok(watcher)
    }
}

/// Create or modify events that touch the config file itself. Other files in
/// the watched directory are ignored.
fn is_config_event(event: &Event, file_name: Option<&OsStr>) -> bool {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return false;
    }
    file_name.is_some_and(|name| event.paths.iter().any(|p| p.file_name() == Some(name)))
}

/// Calls [`ConfigManager::reload`] once per burst of notifications until
/// shutdown or until every sender is gone.
pub async fn reload_loop(
    manager: Arc<ConfigManager>,
    mut notifications: mpsc::UnboundedReceiver<()>,
    mut shutdown: ShutdownSignal,
) {
    loop {
        tokio::select! {
            received = notifications.recv() => {
                if received.is_none() {
                    break;
                }
                tokio::time::sleep(DEBOUNCE).await;
                while notifications.try_recv().is_ok() {}

                let manager = manager.clone();
                if let Err(e) = tokio::task::spawn_blocking(move || manager.reload()).await {
                    tracing::error!(error = %e, "Reload task panicked");
                }
            }
            _ = shutdown.recv() => break,
        }
    }
    tracing::debug!("Config reload task stopped");
}
