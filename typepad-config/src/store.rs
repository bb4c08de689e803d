//! Key-value store capability for persisted editor state.
//!
//! The editor never touches a global store: every read and write goes
//! through a `KeyValueStore` handed to it at construction, so tests can
//! substitute `MemoryStore` for the durable `JsonFileStore`.
//!
//! State files live in `~/.config/typepad/state.json` by default.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::PathBuf;

use crate::error::ConfigError;

/// Synchronous string key-value store.
///
/// Writes are infallible from the caller's point of view. Durable
/// backends log persistence failures instead of returning them.
pub trait KeyValueStore: Send {
    /// Value stored under `key`, or `None` when the key was never written.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, overwriting any previous value.
    fn set(&mut self, key: &str, value: &str);

    /// Overwrite `key` with the empty string. The key stays present.
    fn clear(&mut self, key: &str) {
        self.set(key, "");
    }

    /// All keys currently present, sorted.
    fn keys(&self) -> Vec<String>;
}

/// In-memory store, used as a test double and for ephemeral sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `(key, value)` pairs.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }
}

/// Durable store backed by a single JSON object file.
///
/// Every mutation is written through immediately using an atomic
/// temp-file-and-rename so a crash never leaves a truncated file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`.
    ///
    /// A missing or blank file yields an empty store; the file is created on
    /// the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        log::info!("State path: {:?}", path);

        if !path.exists() {
            log::info!("No state file at {:?}, starting empty", path);
            return Ok(Self {
                path,
                entries: BTreeMap::new(),
            });
        }

        let contents = fs::read_to_string(&path).map_err(|e| ConfigError::io(&path, e))?;
        let entries = if contents.trim().is_empty() {
            BTreeMap::new()
        } else {
            serde_json::from_str(&contents)?
        };
        log::debug!("Loaded {} state entries from {:?}", entries.len(), path);

        Ok(Self { path, entries })
    }

    fn persist(&self) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }

        let json = serde_json::to_string_pretty(&self.entries)?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json).map_err(|e| ConfigError::io(&temp_path, e))?;
        fs::rename(&temp_path, &self.path).map_err(|e| ConfigError::io(&self.path, e))?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist() {
            log::error!("Failed to persist state key '{}': {}", key, e);
        }
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

/// Default state file path (using XDG convention on Unix-likes).
pub fn default_state_path() -> PathBuf {
    crate::config::config_dir().join("state.json")
}
