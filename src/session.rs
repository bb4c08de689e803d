//! Editor session: the single owner of catalog, selection and persistence.
//!
//! Lifecycle:
//! 1. [`EditorSession::mount`] restores the text and the italic toggle's
//!    visual state from the store and subscribes to region changes
//! 2. the catalog arrives through [`EditorSession::apply_catalog`] (directly
//!    or via [`EditorSession::poll_catalog`]); on success the persisted
//!    family/variant are restored, once
//! 3. user operations mutate the selection and write through
//! 4. [`EditorSession::teardown`] drops the subscription and any in-flight
//!    load; results arriving afterwards are discarded

use tokio::sync::mpsc;
use typepad_config::{KeyValueStore, PersistedState};
use typepad_fonts::{FamilyChange, FontCatalog, FontFace, Selection, ToggleOutcome, synthesize};

use crate::editor::{EditableRegion, Subscription};
use crate::loader::{LoadError, PendingCatalog};
use crate::persistence::PersistenceBridge;

/// Where the catalog load stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    Loading,
    Loaded,
    /// Load failed; the session runs with an empty catalog.
    Failed(String),
}

pub struct EditorSession {
    catalog: FontCatalog,
    catalog_state: CatalogState,
    selection: Selection,
    font_face: Option<FontFace>,
    content: String,
    bridge: PersistenceBridge,
    region: Box<dyn EditableRegion>,
    input_rx: Option<mpsc::UnboundedReceiver<String>>,
    subscription: Option<Subscription>,
    pending: Option<PendingCatalog>,
    restored: bool,
    mounted: bool,
}

impl EditorSession {
    /// Mount a session over `store` and `region`.
    pub fn mount(store: Box<dyn KeyValueStore>, mut region: Box<dyn EditableRegion>) -> Self {
        let bridge = PersistenceBridge::new(store);
        let persisted = bridge.read();

        region.set_text(&persisted.content);

        let mut selection = Selection::new();
        selection.set_italic_toggled(persisted.variant_is_italic());

        let (subscription, input_rx) = region.subscribe();

        log::info!(
            "Mounted editor session (persisted family '{}', variant '{}', {} bytes of text)",
            persisted.family,
            persisted.variant,
            persisted.content.len()
        );

        Self {
            catalog: FontCatalog::empty(),
            catalog_state: CatalogState::Loading,
            selection,
            font_face: None,
            content: persisted.content,
            bridge,
            region,
            input_rx: Some(input_rx),
            subscription: Some(subscription),
            pending: None,
            restored: false,
            mounted: true,
        }
    }

    /// Hand over an in-flight load to be picked up by [`Self::poll_catalog`].
    pub fn attach_loader(&mut self, pending: PendingCatalog) {
        self.pending = Some(pending);
    }

    /// Apply a finished load if one is ready. Returns whether it was applied.
    pub fn poll_catalog(&mut self) -> bool {
        let Some(result) = self.pending.as_mut().and_then(PendingCatalog::try_take) else {
            return false;
        };
        self.pending = None;
        self.apply_catalog(result);
        true
    }

    /// Install the outcome of the catalog load.
    ///
    /// Failure is logged and leaves the session usable with an empty
    /// catalog. There is no retry.
    pub fn apply_catalog(&mut self, result: Result<FontCatalog, LoadError>) {
        if !self.mounted {
            log::debug!("Discarding catalog result delivered after teardown");
            return;
        }
        if self.catalog_state == CatalogState::Loaded {
            log::debug!("Catalog already loaded, ignoring later result");
            return;
        }

        match result {
            Ok(catalog) => {
                log::info!("Font catalog ready with {} families", catalog.len());
                self.catalog = catalog;
                self.catalog_state = CatalogState::Loaded;
                self.restore_selection();
            }
            Err(e) => {
                log::error!("Failed to load font catalog: {}", e);
                crate::debug_error!("CATALOG", "Load failed: {}", e);
                self.catalog_state = CatalogState::Failed(e.to_string());
            }
        }
    }

    /// Restore the persisted family/variant against the loaded catalog.
    /// Runs at most once per session.
    fn restore_selection(&mut self) {
        if self.restored {
            return;
        }
        self.restored = true;

        let persisted = self.bridge.read();
        if persisted.family.is_empty() {
            return;
        }
        if self
            .selection
            .restore(&self.catalog, &persisted.family, &persisted.variant)
        {
            log::info!(
                "Restored selection '{}' / '{}'",
                persisted.family,
                persisted.variant
            );
            self.refresh_style();
        } else {
            log::warn!(
                "Persisted selection '{}' / '{}' not found in catalog",
                persisted.family,
                persisted.variant
            );
        }
    }

    /// User picked a family (empty string = placeholder option).
    pub fn select_family(&mut self, name: &str) -> FamilyChange {
        let change = self.selection.select_family(&self.catalog, name);
        if change == FamilyChange::Resolved {
            self.bridge.write_family(name);
            self.bridge.write_variant(self.selection.variant());
        }
        self.refresh_style();
        change
    }

    /// User picked a variant. Inert (returns `false`) without a family.
    pub fn select_variant(&mut self, name: &str) -> bool {
        if !self.selection.select_variant(name) {
            return false;
        }
        self.bridge.write_variant(name);
        self.refresh_style();
        true
    }

    /// User pressed the italic toggle.
    pub fn toggle_italic(&mut self) -> ToggleOutcome {
        let outcome = self.selection.toggle_italic();
        match &outcome {
            ToggleOutcome::Switched { variant } => {
                self.bridge.write_variant(variant);
                self.refresh_style();
            }
            ToggleOutcome::FlagOnly => {
                log::debug!(
                    "Italic toggle flipped without a matching variant in '{}'",
                    self.selection.family()
                );
            }
            ToggleOutcome::Inert => {}
        }
        outcome
    }

    /// Drain pending change events from the region into the store.
    /// Returns how many events were handled.
    pub fn pump_input(&mut self) -> usize {
        let mut texts = Vec::new();
        if let Some(rx) = self.input_rx.as_mut() {
            while let Ok(text) = rx.try_recv() {
                texts.push(text);
            }
        }
        for text in &texts {
            self.handle_input(text);
        }
        texts.len()
    }

    /// One raw-text change event.
    pub fn handle_input(&mut self, text: &str) {
        self.content = text.to_string();
        self.bridge.write_content(text);
    }

    /// Explicit save of the held family/variant.
    pub fn save(&mut self) {
        self.bridge
            .save(self.selection.family(), self.selection.variant());
    }

    /// Clear text, selection and toggle, and blank all persisted slots.
    pub fn reset(&mut self) {
        self.region.set_text("");
        self.content.clear();
        self.selection.reset();
        self.bridge.reset();
        self.refresh_style();
    }

    /// Release the change subscription and abandon any in-flight load.
    pub fn teardown(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.pending = None;
        self.input_rx = None;
        if let Some(subscription) = self.subscription.take() {
            subscription.release();
        }
        log::info!("Editor session torn down");
    }

    fn refresh_style(&mut self) {
        self.font_face = synthesize(
            &self.catalog,
            self.selection.family(),
            self.selection.variant(),
        );
        let family = self.selection.family();
        let css_family = (!family.is_empty()).then(|| css_font_family(family));
        self.region.set_font_family(css_family.as_deref());
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn catalog(&self) -> &FontCatalog {
        &self.catalog
    }

    pub fn catalog_state(&self) -> &CatalogState {
        &self.catalog_state
    }

    /// Options for the family selector, in catalog order.
    pub fn family_names(&self) -> Vec<String> {
        self.catalog.family_names()
    }

    /// Options for the variant selector.
    pub fn variant_names(&self) -> &[String] {
        self.selection.variants()
    }

    pub fn variant_selector_enabled(&self) -> bool {
        self.selection.has_family()
    }

    /// The italic control is shown muted when this is false.
    pub fn italic_control_active(&self) -> bool {
        self.selection.italic_control_active()
    }

    pub fn font_face(&self) -> Option<&FontFace> {
        self.font_face.as_ref()
    }

    pub fn css(&self) -> Option<String> {
        self.font_face.as_ref().map(FontFace::to_css)
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn persisted(&self) -> PersistedState {
        self.bridge.read()
    }

    pub fn region(&self) -> &dyn EditableRegion {
        self.region.as_ref()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }
}

/// CSS `font-family` value for the region: the selected family with a
/// generic fallback.
pub fn css_font_family(family: &str) -> String {
    format!("{family}, sans-serif")
}

impl Drop for EditorSession {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSession")
            .field("catalog_state", &self.catalog_state)
            .field("families", &self.catalog.len())
            .field("selection", &self.selection)
            .field("mounted", &self.mounted)
            .finish()
    }
}
