//! Request resolution.
//!
//! # Responsibilities
//! - Look up the route key in the current routing table
//! - Reuse a cached pool or parse the descriptor and cache it
//! - Pick a server and build the forward target URL
//!
//! # Design Decisions
//! - One table snapshot per request; cache access is keyed by its generation
//! - Missing and malformed routes are both "not found"
//! - An empty pool is a server-side misconfiguration

use std::sync::Arc;

use axum::http::StatusCode;
use thiserror::Error;

use crate::config::manager::ConfigManager;
use crate::load_balancer;
use crate::routing::cache::ResolutionCache;
use crate::routing::descriptor::{parse_descriptor, ResolvedPool, SelectionPolicy};
use crate::routing::table::RouteKey;

/// Terminal failures of a proxied request.
#[derive(Debug, Error)]
pub enum RouteError {
    #[error("no route for {0}")]
    NotFound(RouteKey),

    #[error("invalid service configuration for {0}")]
    InvalidDescriptor(RouteKey),

    #[error("no servers configured for {0}")]
    PoolMisconfigured(RouteKey),

    #[error("{0}")]
    Forwarding(String),
}

impl RouteError {
    pub fn status(&self) -> StatusCode {
        match self {
            RouteError::NotFound(_) | RouteError::InvalidDescriptor(_) => StatusCode::NOT_FOUND,
            RouteError::PoolMisconfigured(_) | RouteError::Forwarding(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Where a request should be forwarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Chosen server base URL.
    pub server: String,
    /// `server + "/" + suffix`.
    pub target: String,
    pub policy: SelectionPolicy,
}

/// Turns route keys into forward targets.
#[derive(Debug, Clone)]
pub struct Resolver {
    config: Arc<ConfigManager>,
    cache: Arc<ResolutionCache>,
}

impl Resolver {
    pub fn new(config: Arc<ConfigManager>) -> Self {
        let cache = config.cache().clone();
        Self { config, cache }
    }

    /// Resolve `key` and append `suffix` to the chosen server.
    pub fn resolve(&self, key: &RouteKey, suffix: &str) -> Result<Resolution, RouteError> {
        let pool = self.pool(key)?;

        if !pool.is_usable() {
            tracing::error!(route = %key, "Route has no usable servers");
            return Err(RouteError::PoolMisconfigured(key.clone()));
        }

        let server = load_balancer::choose(&pool.policy, &pool.servers)
            .ok_or_else(|| RouteError::PoolMisconfigured(key.clone()))?;

        let target = format!("{}/{}", server, suffix);
        tracing::debug!(
            route = %key,
            policy = pool.policy.name(),
            server,
            "Route resolved"
        );

        Ok(Resolution {
            server: server.to_string(),
            target,
            policy: pool.policy.clone(),
        })
    }

    /// Cached or freshly parsed pool for `key`.
    fn pool(&self, key: &RouteKey) -> Result<Arc<ResolvedPool>, RouteError> {
        let table = self.config.current();
        let generation = table.generation();

        let raw = match table.lookup(key) {
            Some(raw) => raw,
            None => {
                tracing::debug!(route = %key, "No route configured");
                return Err(RouteError::NotFound(key.clone()));
            }
        };

        if !raw.is_table() {
            tracing::debug!(route = %key, kind = raw.type_str(), "Route descriptor is not a table");
            return Err(RouteError::InvalidDescriptor(key.clone()));
        }

        if let Some(pool) = self.cache.get(key, generation) {
            return Ok(pool);
        }

        let pool = parse_descriptor(raw)
            .map(Arc::new)
            .map_err(|_| RouteError::InvalidDescriptor(key.clone()))?;

        // Racing misses both parse the same snapshot, so either write is fine.
        self.cache.populate(key.clone(), pool.clone(), generation);
        Ok(pool)
    }
}
