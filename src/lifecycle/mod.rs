//! Process lifecycle.
//!
//! # Data Flow
//! ```text
//! startup.rs:
//!     first config load (fatal on error)
//!     → config watcher + reload task
//!     → signal task
//!     → bind listener, serve
//!
//! shutdown.rs:
//!     trigger → server drains, reload task exits
//!
//! signals.rs:
//!     SIGINT / SIGTERM → shutdown trigger
//!     SIGHUP → reload request on the watcher channel
//! ```
//!
//! # Design Decisions
//! - Only the first config load can stop the process; later failures are
//!   logged and the previous table keeps serving

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::{Shutdown, ShutdownSignal};
