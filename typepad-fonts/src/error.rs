//! Typed errors for catalog document parsing.

use thiserror::Error;

/// Failure to interpret a font catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The document is not valid JSON.
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level value is not an object keyed by family name.
    #[error("catalog must be a JSON object keyed by family name")]
    NotAnObject,

    /// A family entry is not an object keyed by variant name.
    #[error("family '{family}' must map variant names to URLs")]
    FamilyNotAnObject {
        /// Offending family name.
        family: String,
    },

    /// A variant entry does not hold a URL string.
    #[error("variant '{variant}' of family '{family}' must be a URL string")]
    UrlNotAString {
        /// Family the variant belongs to.
        family: String,
        /// Offending variant name.
        variant: String,
    },
}
