//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, route pattern /{path}/{version}/{service}/...)
//!     → request.rs (extract forwarded suffix)
//!     → [routing resolves target]
//!     → forward.rs (proxy to backend)
//!     → response.rs (map route errors to status codes)
//!     → Send to client
//! ```

pub mod forward;
pub mod request;
pub mod response;
pub mod server;

pub use forward::{ForwardError, HttpForwarder};
pub use server::HttpServer;
