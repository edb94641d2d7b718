//! Configuration schema definitions.
//!
//! The document has two parts: top-level server settings and the `service`
//! table holding the routing data. Routing descriptors stay as raw
//! [`toml::Value`]s here; they are interpreted lazily by the resolver.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Raw routing data: `path -> version -> service -> descriptor`.
pub type RouteMap = HashMap<String, HashMap<String, HashMap<String, toml::Value>>>;

/// Root configuration document.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ProxyConfig {
    /// Listener and request handling settings.
    #[serde(flatten)]
    pub server: ServerSettings,

    /// Backend pool descriptors keyed by tenant path, version and service.
    #[serde(default)]
    pub service: RouteMap,
}

/// Settings that are not part of the routing table.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerSettings {
    /// Instance name, used in log output.
    pub name: String,

    /// Interface to bind.
    pub host: String,

    /// Port to bind.
    pub port: u16,

    /// Enable per-request access logging.
    pub log: bool,

    /// Request timeout (total time for request/response) in seconds.
    pub request_timeout_secs: u64,
}

impl ServerSettings {
    /// Address the listener binds to, e.g. `0.0.0.0:8080`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            name: "tenant-router".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8080,
            log: false,
            request_timeout_secs: 30,
        }
    }
}
