//! Load balancing subsystem.
//!
//! # Data Flow
//! ```text
//! Resolved pool (policy, servers)
//!     → choose() maps the policy to a selector:
//!         - first.rs (always the first server)
//!         - random.rs (uniform pick; also used for unknown policies)
//!     → Return the chosen server base URL
//! ```
//!
//! # Design Decisions
//! - Selectors are stateless; nothing is shared between requests
//! - No health filtering: every configured server is a candidate
//! - Unknown policy names fall back to random instead of failing

pub mod first;
pub mod random;

use crate::routing::descriptor::SelectionPolicy;

pub use first::FirstSelector;
pub use random::RandomSelector;

/// A strategy for picking one server from a pool.
pub trait Selector: Send + Sync + std::fmt::Debug {
    /// Returns `None` only when `servers` is empty.
    fn select<'a>(&self, servers: &'a [String]) -> Option<&'a str>;
}

/// Pick a server from `servers` according to `policy`.
pub fn choose<'a>(policy: &SelectionPolicy, servers: &'a [String]) -> Option<&'a str> {
    match policy {
        SelectionPolicy::First => FirstSelector.select(servers),
        SelectionPolicy::Random | SelectionPolicy::Other(_) => RandomSelector.select(servers),
    }
}
