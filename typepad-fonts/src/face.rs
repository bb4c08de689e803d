//! `@font-face` synthesis from the current selection.

use std::fmt;

use crate::catalog::{FontCatalog, is_italic_variant};

/// CSS `font-style` of a synthesized face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Normal,
    Italic,
}

impl FontStyle {
    pub fn as_css(&self) -> &'static str {
        match self {
            FontStyle::Normal => "normal",
            FontStyle::Italic => "italic",
        }
    }
}

/// A font-face declaration binding a family name to one source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFace {
    pub family: String,
    pub src: String,
    /// `normal` for italic variants, otherwise the variant name.
    pub weight: String,
    pub style: FontStyle,
}

impl FontFace {
    /// Render as a CSS rule.
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for FontFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "@font-face {{")?;
        writeln!(f, "  font-family: \"{}\";", css_escape(&self.family))?;
        writeln!(f, "  src: url(\"{}\") format(\"woff2\");", css_escape(&self.src))?;
        writeln!(f, "  font-weight: {};", self.weight)?;
        writeln!(f, "  font-style: {};", self.style.as_css())?;
        write!(f, "}}")
    }
}

fn css_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Derive the font-face for `family`/`variant`.
///
/// Returns `None` unless family and variant are both set and the catalog
/// has a URL for the pairing.
pub fn synthesize(catalog: &FontCatalog, family: &str, variant: &str) -> Option<FontFace> {
    if family.is_empty() || variant.is_empty() || catalog.is_empty() {
        return None;
    }
    let src = catalog.url(family, variant)?;
    let italic = is_italic_variant(variant);

    Some(FontFace {
        family: family.to_string(),
        src: src.to_string(),
        weight: if italic { "normal" } else { variant }.to_string(),
        style: if italic {
            FontStyle::Italic
        } else {
            FontStyle::Normal
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> FontCatalog {
        FontCatalog::from_json(
            r#"{"Roboto": {"400": "https://x/r400.woff2", "700italic": "https://x/r.woff2"}}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_italic_variant_face() {
        let face = synthesize(&catalog(), "Roboto", "700italic").unwrap();
        assert_eq!(face.weight, "normal");
        assert_eq!(face.style, FontStyle::Italic);
        assert_eq!(face.src, "https://x/r.woff2");
        assert_eq!(face.family, "Roboto");
    }

    #[test]
    fn test_upright_variant_face() {
        let face = synthesize(&catalog(), "Roboto", "400").unwrap();
        assert_eq!(face.weight, "400");
        assert_eq!(face.style, FontStyle::Normal);
    }

    #[test]
    fn test_guard_requires_everything() {
        let catalog = catalog();
        assert!(synthesize(&catalog, "", "400").is_none());
        assert!(synthesize(&catalog, "Roboto", "").is_none());
        assert!(synthesize(&FontCatalog::empty(), "Roboto", "400").is_none());
        assert!(synthesize(&catalog, "Roboto", "900").is_none());
    }

    #[test]
    fn test_css_rendering() {
        let css = synthesize(&catalog(), "Roboto", "700italic")
            .unwrap()
            .to_css();
        assert!(css.starts_with("@font-face {"));
        assert!(css.contains("font-family: \"Roboto\";"));
        assert!(css.contains("src: url(\"https://x/r.woff2\") format(\"woff2\");"));
        assert!(css.contains("font-weight: normal;"));
        assert!(css.contains("font-style: italic;"));
        assert!(css.ends_with('}'));
    }
}
