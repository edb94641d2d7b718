//! Ownership of the published routing table.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;

use crate::config::loader::{load_config, ConfigError, ConfigSource};
use crate::config::schema::ServerSettings;
use crate::routing::cache::ResolutionCache;
use crate::routing::table::RoutingTable;

/// Holds the current [`RoutingTable`] and is its only writer.
///
/// Readers get an `Arc` snapshot and never block. A load decodes the new
/// table first and only then swaps the pointer, so the write itself is a
/// single atomic store.
pub struct ConfigManager {
    source: Box<dyn ConfigSource>,
    table: ArcSwap<RoutingTable>,
    settings: ArcSwap<ServerSettings>,
    cache: Arc<ResolutionCache>,
    generation: AtomicU64,
    /// Serializes writers so generations are published in order.
    write_lock: Mutex<()>,
}

impl ConfigManager {
    /// Create a manager with an empty table. Call [`ConfigManager::load`]
    /// before serving traffic.
    pub fn new(source: Box<dyn ConfigSource>, cache: Arc<ResolutionCache>) -> Self {
        Self {
            source,
            table: ArcSwap::from_pointee(RoutingTable::default()),
            settings: ArcSwap::from_pointee(ServerSettings::default()),
            cache,
            generation: AtomicU64::new(0),
            write_lock: Mutex::new(()),
        }
    }

    /// Read the source and publish a new table.
    ///
    /// On error nothing is published and the previous table stays current.
    pub fn load(&self) -> Result<Arc<RoutingTable>, ConfigError> {
        let _writer = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let config = load_config(self.source.as_ref())?;

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let table = Arc::new(RoutingTable::new(generation, config.service));

        self.settings.store(Arc::new(config.server));
        self.table.store(table.clone());
        self.cache.invalidate_all(generation);

        tracing::info!(
            source = %self.source.describe(),
            generation,
            routes = table.route_count(),
            "Configuration loaded"
        );
        Ok(table)
    }

    /// Fail-soft variant of [`ConfigManager::load`] for the reload path.
    ///
    /// Returns true when a new table was published.
    pub fn reload(&self) -> bool {
        tracing::info!(source = %self.source.describe(), "Reloading configuration");
        match self.load() {
            Ok(_) => true,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    generation = self.current().generation(),
                    "Failed to reload config. Keeping current configuration."
                );
                false
            }
        }
    }

    /// The currently published table.
    pub fn current(&self) -> Arc<RoutingTable> {
        self.table.load_full()
    }

    /// Server settings from the last successful load.
    pub fn settings(&self) -> Arc<ServerSettings> {
        self.settings.load_full()
    }

    pub fn cache(&self) -> &Arc<ResolutionCache> {
        &self.cache
    }
}

impl std::fmt::Debug for ConfigManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigManager")
            .field("source", &self.source.describe())
            .field("generation", &self.current().generation())
            .finish()
    }
}
