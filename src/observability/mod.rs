//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (config loaded, reload, route resolved, forward target)
//!     → logging.rs subscriber formats them as text lines on stdout
//! ```
//!
//! # Design Decisions
//! - Structured fields on every event (route, generation, target)
//! - Log level configurable via RUST_LOG

pub mod logging;
