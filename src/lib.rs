//! typepad: a text pad that writes in a web font picked from a catalog.
//!
//! The font catalog, selection state machine and `@font-face` synthesis live
//! in `typepad-fonts`; the store and configuration in `typepad-config`. This
//! crate wires them into an [`session::EditorSession`] with:
//!
//! - `loader`: background catalog fetch (HTTP via ureq, or a local file)
//! - `persistence`: write-through of family, variant and text
//! - `editor`: the editable region capability and its change subscription
//! - `cli` / `shell`: the command-line front end

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod editor;
pub mod http;
pub mod loader;
pub mod persistence;
pub mod session;
pub mod shell;

pub use editor::{EditableRegion, Subscription, TextBuffer};
pub use loader::{CatalogLoader, CatalogSource, FetchOptions, LoadError, PendingCatalog};
pub use persistence::PersistenceBridge;
pub use session::{CatalogState, EditorSession, css_font_family};
