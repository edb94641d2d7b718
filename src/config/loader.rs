//! Configuration loading.

use std::fs;
use std::path::PathBuf;

use thiserror::Error;

use crate::config::schema::ProxyConfig;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The source could not be read.
    #[error("IO error reading {source_name}: {error}")]
    Io {
        source_name: String,
        #[source]
        error: std::io::Error,
    },

    /// The document is not valid TOML or does not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Somewhere a configuration document can be read from.
pub trait ConfigSource: Send + Sync {
    /// Read the full document.
    fn read(&self) -> Result<String, ConfigError>;

    /// Human readable description for log output.
    fn describe(&self) -> String;
}

/// A TOML file on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConfigSource for FileSource {
    fn read(&self) -> Result<String, ConfigError> {
        fs::read_to_string(&self.path).map_err(|error| ConfigError::Io {
            source_name: self.describe(),
            error,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Decode a configuration document.
pub fn parse_config(content: &str) -> Result<ProxyConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Read and decode configuration from a source.
pub fn load_config(source: &dyn ConfigSource) -> Result<ProxyConfig, ConfigError> {
    let content = source.read()?;
    parse_config(&content)
}
