//! Shared fixtures for typepad integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use typepad::{EditorSession, TextBuffer};
use typepad_config::{KeyValueStore, MemoryStore};
use typepad_fonts::FontCatalog;

/// Catalog document used across tests.
pub const CATALOG_JSON: &str = r#"{
    "Roboto": {"400": "https://x/r400.woff2", "700italic": "https://x/r.woff2"},
    "Oswald": {"400": "https://x/o400.woff2", "700": "https://x/o700.woff2"},
    "Script": {"400italic": "https://x/s400i.woff2", "700italic": "https://x/s700i.woff2"}
}"#;

pub fn catalog() -> FontCatalog {
    FontCatalog::from_json(CATALOG_JSON).expect("fixture catalog parses")
}

/// Store double whose contents stay inspectable after it is handed to a
/// session.
#[derive(Clone, Default)]
pub struct SharedStore(Arc<Mutex<MemoryStore>>);

impl SharedStore {
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self(Arc::new(Mutex::new(MemoryStore::with_entries(entries))))
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.0.lock().get(key)
    }
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.0.lock().get(key)
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.lock().set(key, value);
    }

    fn keys(&self) -> Vec<String> {
        self.0.lock().keys()
    }
}

/// Mount a session over clones of `store` and `buffer`.
pub fn mount(store: &SharedStore, buffer: &TextBuffer) -> EditorSession {
    EditorSession::mount(Box::new(store.clone()), Box::new(buffer.clone()))
}

/// Mount and deliver the fixture catalog.
pub fn mount_loaded(store: &SharedStore, buffer: &TextBuffer) -> EditorSession {
    let mut session = mount(store, buffer);
    session.apply_catalog(Ok(catalog()));
    session
}
