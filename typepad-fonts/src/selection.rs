//! Family/variant selection state machine.
//!
//! `Selection` holds the current family, the variant names available for
//! it, the current variant and the italic toggle. Transitions report what
//! changed; writing it through to storage is the caller's job.
//!
//! Italic toggle:
//!
//! ```text
//!          toggle (italic variant found -> adopt it)
//!    off ───────────────────────────────────────────▶ on
//!     ▲                                                │
//!     └────────────────────────────────────────────────┘
//!          toggle (upright variant found -> adopt it)
//! ```
//!
//! When no opposite-style variant exists the flag still flips and the
//! variant stays put, so the toggle can disagree with the active variant.

use crate::catalog::{FontCatalog, is_italic_variant};

/// Result of `Selection::select_family`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FamilyChange {
    /// The family is in the catalog; its first variant is now active.
    /// Both family and variant should be persisted.
    Resolved,
    /// Empty or unknown name: the variant list was cleared, nothing to persist.
    Unresolved,
}

/// Result of `Selection::toggle_italic`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The family has no italic variant; nothing changed.
    Inert,
    /// The flag flipped and `variant` became active; persist it.
    Switched { variant: String },
    /// The flag flipped but no variant of the requested style exists.
    FlagOnly,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    family: String,
    variant: String,
    variants: Vec<String>,
    italic_toggled: bool,
    italic_available: bool,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Variant names of the current family, in catalog order.
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    pub fn italic_toggled(&self) -> bool {
        self.italic_toggled
    }

    /// True iff the current variant list holds at least one italic name.
    ///
    /// The list may be staged without a selected family; see
    /// [`Selection::italic_control_active`].
    pub fn italic_available(&self) -> bool {
        self.italic_available
    }

    /// Whether the italic toggle accepts input.
    pub fn italic_control_active(&self) -> bool {
        self.italic_available && self.has_family()
    }

    /// Whether the variant selector accepts input.
    pub fn has_family(&self) -> bool {
        !self.family.is_empty()
    }

    /// Select a family by name.
    ///
    /// `family` is set to `name` unconditionally, even when the name is
    /// unknown; only the derived variant state is cleared in that case.
    /// Unlike the browser widget, the italic toggle is re-synced to the
    /// adopted first variant instead of being left as it was.
    pub fn select_family(&mut self, catalog: &FontCatalog, name: &str) -> FamilyChange {
        self.family = name.to_string();

        match catalog.family(name).filter(|_| !name.is_empty()) {
            Some(family) => {
                self.variants = family.variant_names();
                self.italic_available = family.has_italic();
                self.variant = self.variants.first().cloned().unwrap_or_default();
                self.italic_toggled = is_italic_variant(&self.variant);
                log::debug!(
                    "Selected family '{}' ({} variants, first '{}')",
                    name,
                    self.variants.len(),
                    self.variant
                );
                FamilyChange::Resolved
            }
            None => {
                if !name.is_empty() {
                    log::warn!("Family '{}' is not in the catalog", name);
                }
                self.clear_variants();
                FamilyChange::Unresolved
            }
        }
    }

    /// Select a variant of the current family.
    ///
    /// Returns `false` (and changes nothing) when no family is selected or
    /// the name is not one of the current family's variants.
    pub fn select_variant(&mut self, name: &str) -> bool {
        if !self.has_family() {
            return false;
        }
        if !self.variants.iter().any(|v| v == name) {
            log::warn!(
                "Variant '{}' is not offered by family '{}'",
                name,
                self.family
            );
            return false;
        }

        self.variant = name.to_string();
        self.italic_toggled = is_italic_variant(name);
        true
    }

    /// Flip the italic toggle, switching to the first variant of the
    /// requested style when one exists.
    pub fn toggle_italic(&mut self) -> ToggleOutcome {
        // A staged variant list without a family (partial restore) must not
        // produce a variant.
        if !self.italic_available || !self.has_family() {
            return ToggleOutcome::Inert;
        }

        self.italic_toggled = !self.italic_toggled;
        let want_italic = self.italic_toggled;
        let found = self
            .variants
            .iter()
            .find(|v| is_italic_variant(v) == want_italic)
            .cloned();

        match found {
            Some(variant) => {
                self.variant = variant.clone();
                ToggleOutcome::Switched { variant }
            }
            None => ToggleOutcome::FlagOnly,
        }
    }

    /// Restore a persisted family/variant against a freshly loaded catalog.
    ///
    /// When the family is known its variant list is staged; the pair is
    /// adopted only if the variant also belongs to that family. Returns
    /// whether the pair was adopted.
    pub fn restore(&mut self, catalog: &FontCatalog, family: &str, variant: &str) -> bool {
        let Some(entry) = catalog.family(family).filter(|_| !family.is_empty()) else {
            return false;
        };

        self.variants = entry.variant_names();
        self.italic_available = entry.has_italic();

        if variant.is_empty() || entry.variant(variant).is_none() {
            return false;
        }

        self.family = family.to_string();
        self.variant = variant.to_string();
        self.italic_toggled = is_italic_variant(variant);
        true
    }

    /// Set the toggle's visual state without touching the variant.
    pub fn set_italic_toggled(&mut self, on: bool) {
        self.italic_toggled = on;
    }

    /// Back to the empty selection.
    pub fn reset(&mut self) {
        self.family.clear();
        self.clear_variants();
    }

    fn clear_variants(&mut self) {
        self.variants.clear();
        self.variant.clear();
        self.italic_available = false;
        self.italic_toggled = false;
    }
}
