//! Application configuration loaded from `~/.config/typepad/config.yaml`.
//!
//! Every field has a serde default so a partial (or absent) file is valid.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;

// ── Serde default helpers ──────────────────────────────────────────────

fn default_catalog() -> String {
    "fonts.json".to_string()
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

fn default_max_catalog_bytes() -> usize {
    1_048_576
}

/// Log level for debug logging to file.
///
/// The `--log-level` CLI flag and `RUST_LOG` take precedence over this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// No logging (log file not created)
    #[default]
    Off,
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    Info,
    /// Debug messages
    Debug,
    /// Most verbose
    Trace,
}

impl LogLevel {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(ConfigError::Validation(format!(
                "unknown log level '{other}' (expected off, error, warn, info, debug or trace)"
            ))),
        }
    }
}

/// Editor configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Where the font catalog document is loaded from: an `http(s)://` URL
    /// or a local file path.
    #[serde(default = "default_catalog")]
    pub catalog: String,

    /// Override for the state file location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_path: Option<PathBuf>,

    /// Debug log verbosity.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Timeout for the catalog HTTP fetch, in seconds (default: 10)
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Maximum accepted catalog size in bytes (default: 1 MB)
    #[serde(default = "default_max_catalog_bytes")]
    pub max_catalog_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            state_path: None,
            log_level: LogLevel::default(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            max_catalog_bytes: default_max_catalog_bytes(),
        }
    }
}

impl Config {
    /// Load configuration from the default path, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml_ng::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific file.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }

        let yaml = serde_yaml_ng::to_string(self)?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml).map_err(|e| ConfigError::io(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| ConfigError::io(path, e))?;
        Ok(())
    }

    /// Reject values that cannot work at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.catalog.trim().is_empty() {
            return Err(ConfigError::Validation("catalog must not be empty".into()));
        }
        if self.max_catalog_bytes == 0 {
            return Err(ConfigError::Validation(
                "max_catalog_bytes must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Effective state file location.
    pub fn state_path(&self) -> PathBuf {
        self.state_path
            .clone()
            .unwrap_or_else(crate::store::default_state_path)
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        config_dir().join("config.yaml")
    }
}

/// Get the configuration directory path (using XDG convention)
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("typepad")
        } else {
            PathBuf::from(".")
        }
    }
    #[cfg(not(target_os = "windows"))]
    {
        // ~/.config/typepad on all Unix-likes, macOS included
        if let Some(home_dir) = dirs::home_dir() {
            home_dir.join(".config").join("typepad")
        } else {
            PathBuf::from(".")
        }
    }
}
