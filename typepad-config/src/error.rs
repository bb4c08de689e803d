//! Typed error variants for the typepad-config crate.
//!
//! Callers that work with `anyhow` get these through its blanket `From`
//! impl; library consumers can match on the specific failure instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading or saving configuration and state files.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing a file.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File that could not be read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The config file contained invalid YAML.
    #[error("YAML parse error in config: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// The state file was not a JSON object of strings.
    #[error("state file parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field value failed semantic validation.
    #[error("Config validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}
