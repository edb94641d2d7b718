//! Memoized descriptor resolutions.
//!
//! Entries are tagged with the routing table generation they were derived
//! from. The cache holds entries for exactly one generation at a time:
//! lookups for another generation miss, and populates for another
//! generation are dropped. A request that has read table N+1 therefore
//! never sees a pool parsed from table N, even if it runs between the
//! table swap and the invalidation that follows it.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::routing::descriptor::ResolvedPool;
use crate::routing::table::RouteKey;

#[derive(Debug, Default)]
struct Entries {
    generation: u64,
    pools: HashMap<RouteKey, Arc<ResolvedPool>>,
}

/// Thread-safe cache of parsed backend pools.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    inner: RwLock<Entries>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached pool for `key`, if it was derived from table `generation`.
    pub fn get(&self, key: &RouteKey, generation: u64) -> Option<Arc<ResolvedPool>> {
        let entries = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        if entries.generation != generation {
            return None;
        }
        entries.pools.get(key).cloned()
    }

    /// Insert or overwrite the pool for `key`.
    ///
    /// Returns false when the write was discarded because the cache has
    /// moved to a different generation.
    pub fn populate(&self, key: RouteKey, pool: Arc<ResolvedPool>, generation: u64) -> bool {
        let mut entries = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if entries.generation != generation {
            tracing::debug!(
                route = %key,
                generation,
                cache_generation = entries.generation,
                "Discarding resolution from superseded routing table"
            );
            return false;
        }
        entries.pools.insert(key, pool);
        true
    }

    /// Drop every entry and start accepting entries for `generation`.
    pub fn invalidate_all(&self, generation: u64) {
        let mut entries = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let dropped = entries.pools.len();
        entries.pools.clear();
        entries.generation = generation;
        tracing::debug!(generation, dropped, "Resolution cache invalidated");
    }

    pub fn generation(&self) -> u64 {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).generation
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
