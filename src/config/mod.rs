//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → manager.rs (build RoutingTable, atomic swap, invalidate cache)
//!     → Resolver reads the current snapshot per request
//!
//! On change notification:
//!     watcher.rs detects change
//!     → manager.rs reload (fail-soft)
//!     → new generation published
//! ```
//!
//! # Design Decisions
//! - Tables are immutable once loaded; changes require full reload
//! - All server settings have defaults to allow minimal configs
//! - A failed reload keeps the previous table

pub mod loader;
pub mod manager;
pub mod schema;
pub mod watcher;

pub use loader::{ConfigError, ConfigSource, FileSource};
pub use manager::ConfigManager;
pub use schema::{ProxyConfig, RouteMap, ServerSettings};
pub use watcher::ConfigWatcher;
