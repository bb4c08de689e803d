//! Persisted editor state: the three string slots and their key names.

use crate::store::KeyValueStore;

/// Key names used in the store.
///
/// These are wire-compatible with state written by earlier releases,
/// including the `selectedVarient` spelling.
pub mod keys {
    /// Selected font family name.
    pub const SELECTED_FONT: &str = "selectedFont";
    /// Selected variant name (e.g. `"400"`, `"700italic"`).
    pub const SELECTED_VARIANT: &str = "selectedVarient";
    /// Raw text of the editable region.
    pub const CONTENT: &str = "content";

    /// All keys owned by the editor, in write order.
    pub const ALL: [&str; 3] = [SELECTED_FONT, SELECTED_VARIANT, CONTENT];
}

/// Snapshot of the three persisted slots.
///
/// Absent keys read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersistedState {
    pub family: String,
    pub variant: String,
    pub content: String,
}

impl PersistedState {
    /// Read all three slots from a store.
    pub fn read(store: &dyn KeyValueStore) -> Self {
        let slot = |key: &str| store.get(key).unwrap_or_default();
        Self {
            family: slot(keys::SELECTED_FONT),
            variant: slot(keys::SELECTED_VARIANT),
            content: slot(keys::CONTENT),
        }
    }

    /// True when both family and variant were persisted, i.e. a selection
    /// can be restored.
    pub fn has_selection(&self) -> bool {
        !self.family.is_empty() && !self.variant.is_empty()
    }

    /// True when the persisted variant is an italic one.
    pub fn variant_is_italic(&self) -> bool {
        self.variant.ends_with("italic")
    }
}
