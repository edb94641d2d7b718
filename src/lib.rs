//! Multi-tenant reverse proxy routing.
//!
//! Requests of the form `/{path}/{version}/{service}/{suffix}` are resolved
//! against a hot-reloadable routing table to a backend pool, one server is
//! picked by the pool's selection policy, and the request is forwarded to
//! `server/suffix`.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod load_balancer;
pub mod observability;
pub mod routing;

pub use config::{ConfigManager, ProxyConfig};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{Resolver, ResolutionCache};
