//! Persistent state and configuration for the typepad editor.
//!
//! This crate provides:
//!
//! - The key-value store capability the editor persists into (`KeyValueStore`)
//!   with an in-memory double and a durable JSON-file backend
//! - The persisted key names and the `PersistedState` snapshot read at mount
//! - The YAML application configuration and its log level setting

pub mod config;
pub mod error;
pub mod state;
pub mod store;

// Re-export main types for convenience
pub use config::{Config, LogLevel};
pub use error::ConfigError;
pub use state::{PersistedState, keys};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, default_state_path};
