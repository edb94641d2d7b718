//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path, version, service, suffix)
//!     → resolver.rs (take current table snapshot)
//!     → table.rs (three-level lookup → raw descriptor)
//!     → cache.rs (hit: parsed pool for this generation)
//!     → descriptor.rs (miss: parse descriptor, populate cache)
//!     → load_balancer (pick server)
//!     → Return: forward target or RouteError
//! ```
//!
//! # Design Decisions
//! - Tables are immutable snapshots, replaced whole on reload
//! - Descriptors stay raw in the table and are parsed lazily
//! - Cache entries are tagged with the table generation they came from

pub mod cache;
pub mod descriptor;
pub mod resolver;
pub mod table;

pub use cache::ResolutionCache;
pub use descriptor::{parse_descriptor, ResolvedPool, SelectionPolicy};
pub use resolver::{Resolution, Resolver, RouteError};
pub use table::{RouteKey, RoutingTable};
