//! Web font catalog, family/variant selection and `@font-face` synthesis.
//!
//! This crate provides:
//! - `FontCatalog`: the family -> variant -> source URL document, kept in
//!   document order so selectors list families the way the catalog does
//! - `Selection`: the family/variant/italic-toggle state machine driven by
//!   user input
//! - `FontFace`: the `@font-face` declaration derived from a selection
//!
//! # Architecture
//!
//! Everything here is pure state. Persistence and fetching live in the
//! application crate; `Selection` transitions report what changed so the
//! caller can write it through.

pub mod catalog;
pub mod error;
pub mod face;
pub mod selection;

// Re-export main types for convenience
pub use catalog::{FontCatalog, FontFamily, FontVariant, is_italic_variant};
pub use error::CatalogError;
pub use face::{FontFace, FontStyle, synthesize};
pub use selection::{FamilyChange, Selection, ToggleOutcome};
