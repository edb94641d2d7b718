//! Backend pool descriptor parsing.
//!
//! Descriptors are decoded permissively: unknown keys are ignored, a missing
//! or non-string `method` falls back to random selection, and `servers`
//! entries that are not non-empty strings are skipped. The only hard failure
//! is a descriptor that is not a table at all.

use thiserror::Error;

/// How a server is picked from a pool.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionPolicy {
    /// Always the first configured server.
    First,
    /// Uniformly random.
    #[default]
    Random,
    /// Unrecognized method name. Selects like [`SelectionPolicy::Random`].
    Other(String),
}

impl SelectionPolicy {
    pub fn from_method(method: &str) -> Self {
        match method {
            "first" => SelectionPolicy::First,
            "random" => SelectionPolicy::Random,
            other => SelectionPolicy::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SelectionPolicy::First => "first",
            SelectionPolicy::Random => "random",
            SelectionPolicy::Other(name) => name,
        }
    }
}

/// The typed form of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedPool {
    pub policy: SelectionPolicy,
    pub servers: Vec<String>,
}

impl ResolvedPool {
    /// A pool with no servers is configured but cannot serve traffic.
    pub fn is_usable(&self) -> bool {
        !self.servers.is_empty()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    /// The configured value is not a key/value table.
    #[error("descriptor is a {0}, expected a table")]
    NotATable(&'static str),
}

/// Interpret a raw descriptor value.
pub fn parse_descriptor(raw: &toml::Value) -> Result<ResolvedPool, DescriptorError> {
    let table = raw
        .as_table()
        .ok_or_else(|| DescriptorError::NotATable(raw.type_str()))?;

    let policy = table
        .get("method")
        .and_then(toml::Value::as_str)
        .map(SelectionPolicy::from_method)
        .unwrap_or_default();

    let servers = match table.get("servers") {
        Some(toml::Value::Array(entries)) => entries
            .iter()
            .filter_map(toml::Value::as_str)
            .filter(|server| !server.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    };

    Ok(ResolvedPool { policy, servers })
}
