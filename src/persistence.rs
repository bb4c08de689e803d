//! Write-through bridge between the editor session and its key-value store.

use typepad_config::{KeyValueStore, PersistedState, keys};

/// Mirrors family, variant and editor text into a [`KeyValueStore`].
pub struct PersistenceBridge {
    store: Box<dyn KeyValueStore>,
}

impl PersistenceBridge {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Snapshot of everything persisted so far.
    pub fn read(&self) -> PersistedState {
        PersistedState::read(self.store.as_ref())
    }

    pub fn write_family(&mut self, family: &str) {
        crate::debug_trace!("PERSIST", "{} = {:?}", keys::SELECTED_FONT, family);
        self.store.set(keys::SELECTED_FONT, family);
    }

    pub fn write_variant(&mut self, variant: &str) {
        crate::debug_trace!("PERSIST", "{} = {:?}", keys::SELECTED_VARIANT, variant);
        self.store.set(keys::SELECTED_VARIANT, variant);
    }

    pub fn write_content(&mut self, content: &str) {
        crate::debug_trace!("PERSIST", "{} ({} bytes)", keys::CONTENT, content.len());
        self.store.set(keys::CONTENT, content);
    }

    /// Re-write the held family and variant.
    ///
    /// Idempotent: selection changes already wrote these values.
    pub fn save(&mut self, family: &str, variant: &str) {
        self.write_family(family);
        self.write_variant(variant);
        log::info!("Saved selection '{}' / '{}'", family, variant);
    }

    /// Overwrite all three slots with the empty string.
    pub fn reset(&mut self) {
        for key in keys::ALL {
            self.store.clear(key);
        }
        log::info!("Persisted editor state reset");
    }

    /// Raw value of a key, for diagnostics.
    pub fn get(&self, key: &str) -> Option<String> {
        self.store.get(key)
    }
}

impl std::fmt::Debug for PersistenceBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceBridge")
            .field("keys", &self.store.keys())
            .finish()
    }
}
