//! Font catalog: family name -> variant name -> source URL.
//!
//! Loaded once and read-only afterwards. Family and variant order follow
//! the order of the source document.

use serde_json::Value;

use crate::error::CatalogError;

/// True when a variant name denotes an italic instance (`"700italic"`).
pub fn is_italic_variant(name: &str) -> bool {
    name.ends_with("italic")
}

/// One weight/style instance of a family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontVariant {
    /// Variant name, a CSS weight optionally suffixed with `italic`.
    pub name: String,
    /// Source URL of the font file.
    pub url: String,
}

impl FontVariant {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    pub fn is_italic(&self) -> bool {
        is_italic_variant(&self.name)
    }

    /// CSS `font-weight` for this variant.
    ///
    /// Italic variants report `normal`; other variant names double as the
    /// weight itself (`"400"`, `"700"`, `"regular"`).
    pub fn weight(&self) -> &str {
        if self.is_italic() { "normal" } else { &self.name }
    }
}

/// A family and its variants in catalog order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFamily {
    pub name: String,
    pub variants: Vec<FontVariant>,
}

impl FontFamily {
    pub fn variant(&self, name: &str) -> Option<&FontVariant> {
        self.variants.iter().find(|v| v.name == name)
    }

    /// True when at least one variant is italic.
    pub fn has_italic(&self) -> bool {
        self.variants.iter().any(FontVariant::is_italic)
    }

    pub fn variant_names(&self) -> Vec<String> {
        self.variants.iter().map(|v| v.name.clone()).collect()
    }
}

/// The complete family -> variant -> URL document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontCatalog {
    families: Vec<FontFamily>,
}

impl FontCatalog {
    /// Catalog with no families, used when loading fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse a catalog document.
    ///
    /// Shape is checked (objects of objects of strings); contents are not.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let document: Value = serde_json::from_str(json)?;
        let Value::Object(entries) = document else {
            return Err(CatalogError::NotAnObject);
        };

        let mut families = Vec::with_capacity(entries.len());
        for (family, variants) in entries {
            let Value::Object(variants) = variants else {
                return Err(CatalogError::FamilyNotAnObject { family });
            };

            let mut parsed = Vec::with_capacity(variants.len());
            for (variant, url) in variants {
                let Value::String(url) = url else {
                    return Err(CatalogError::UrlNotAString { family, variant });
                };
                parsed.push(FontVariant::new(variant, url));
            }

            if parsed.is_empty() {
                log::warn!("Catalog family '{}' has no variants", family);
            }
            families.push(FontFamily {
                name: family,
                variants: parsed,
            });
        }

        log::debug!("Parsed font catalog with {} families", families.len());
        Ok(Self { families })
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Family names in catalog order.
    pub fn family_names(&self) -> Vec<String> {
        self.families.iter().map(|f| f.name.clone()).collect()
    }

    pub fn families(&self) -> &[FontFamily] {
        &self.families
    }

    pub fn family(&self, name: &str) -> Option<&FontFamily> {
        self.families.iter().find(|f| f.name == name)
    }

    pub fn contains_family(&self, name: &str) -> bool {
        self.family(name).is_some()
    }

    /// Variants of `family` in catalog order.
    pub fn variants(&self, family: &str) -> Option<&[FontVariant]> {
        self.family(family).map(|f| f.variants.as_slice())
    }

    /// Source URL of a family/variant pairing.
    pub fn url(&self, family: &str, variant: &str) -> Option<&str> {
        self.family(family)?
            .variant(variant)
            .map(|v| v.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "Roboto": {"400": "https://x/r400.woff2", "700italic": "https://x/r700i.woff2"},
        "Lato": {"300": "/fonts/l300.woff2"},
        "Abel": {"400": "/fonts/abel.woff2"}
    }"#;

    #[test]
    fn test_preserves_document_order() {
        let catalog = FontCatalog::from_json(DOC).unwrap();
        assert_eq!(catalog.family_names(), vec!["Roboto", "Lato", "Abel"]);
        let names: Vec<&str> = catalog
            .variants("Roboto")
            .unwrap()
            .iter()
            .map(|v| v.name.as_str())
            .collect();
        assert_eq!(names, vec!["400", "700italic"]);
    }

    #[test]
    fn test_url_lookup() {
        let catalog = FontCatalog::from_json(DOC).unwrap();
        assert_eq!(
            catalog.url("Roboto", "700italic"),
            Some("https://x/r700i.woff2")
        );
        assert_eq!(catalog.url("Roboto", "900"), None);
        assert_eq!(catalog.url("Nope", "400"), None);
    }

    #[test]
    fn test_rejects_wrong_shapes() {
        assert!(matches!(
            FontCatalog::from_json("[]"),
            Err(CatalogError::NotAnObject)
        ));
        assert!(matches!(
            FontCatalog::from_json(r#"{"Roboto": ["400"]}"#),
            Err(CatalogError::FamilyNotAnObject { family }) if family == "Roboto"
        ));
        assert!(matches!(
            FontCatalog::from_json(r#"{"Roboto": {"400": 1}}"#),
            Err(CatalogError::UrlNotAString { variant, .. }) if variant == "400"
        ));
        assert!(matches!(
            FontCatalog::from_json("{"),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_empty_family_is_kept() {
        let catalog = FontCatalog::from_json(r#"{"Ghost": {}}"#).unwrap();
        assert!(catalog.contains_family("Ghost"));
        assert_eq!(catalog.variants("Ghost").map(<[FontVariant]>::len), Some(0));
    }

    #[test]
    fn test_variant_weight() {
        assert_eq!(FontVariant::new("700italic", "u").weight(), "normal");
        assert_eq!(FontVariant::new("700", "u").weight(), "700");
        assert!(FontVariant::new("italic", "u").is_italic());
    }
}
