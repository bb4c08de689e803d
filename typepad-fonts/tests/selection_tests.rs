//! Integration tests for the selection state machine.

use typepad_fonts::{FamilyChange, FontCatalog, Selection, ToggleOutcome};

const CATALOG: &str = r#"{
    "Roboto": {"400": "https://x/r400.woff2", "700italic": "https://x/r700i.woff2"},
    "Oswald": {"400": "https://x/o400.woff2", "700": "https://x/o700.woff2"},
    "Lora": {"italic": "https://x/li.woff2", "500": "https://x/l500.woff2", "500italic": "https://x/l500i.woff2"}
}"#;

fn catalog() -> FontCatalog {
    FontCatalog::from_json(CATALOG).expect("fixture catalog parses")
}

#[test]
fn test_select_family_picks_first_variant() {
    let catalog = catalog();
    for name in catalog.family_names() {
        let mut selection = Selection::new();
        assert_eq!(
            selection.select_family(&catalog, &name),
            FamilyChange::Resolved
        );
        let first = &catalog.variants(&name).unwrap()[0].name;
        assert_eq!(selection.variant(), first, "family {name}");
        assert_eq!(selection.family(), name);
    }
}

#[test]
fn test_select_empty_family_clears_variants() {
    let catalog = catalog();
    let mut selection = Selection::new();
    selection.select_family(&catalog, "Roboto");

    assert_eq!(
        selection.select_family(&catalog, ""),
        FamilyChange::Unresolved
    );
    assert!(selection.variants().is_empty());
    assert!(!selection.italic_available());
    assert_eq!(selection.variant(), "");
    assert!(!selection.has_family());
}

#[test]
fn test_select_unknown_family_keeps_name() {
    let catalog = catalog();
    let mut selection = Selection::new();
    selection.select_family(&catalog, "Roboto");

    assert_eq!(
        selection.select_family(&catalog, "Comic Neue"),
        FamilyChange::Unresolved
    );
    // The name sticks even though it resolved to nothing.
    assert_eq!(selection.family(), "Comic Neue");
    assert!(selection.variants().is_empty());
    assert_eq!(selection.variant(), "");
}

#[test]
fn test_italic_availability_follows_family() {
    let catalog = catalog();
    let mut selection = Selection::new();

    selection.select_family(&catalog, "Roboto");
    assert!(selection.italic_available());

    selection.select_family(&catalog, "Oswald");
    assert!(!selection.italic_available());

    selection.select_family(&catalog, "Lora");
    assert!(selection.italic_available());
}

#[test]
fn test_toggle_inert_without_italic() {
    let mut selection = Selection::new();
    assert_eq!(selection.toggle_italic(), ToggleOutcome::Inert);
    assert_eq!(selection, Selection::new());
}

#[test]
fn test_toggle_round_trip() {
    let catalog = catalog();
    let mut selection = Selection::new();
    selection.select_family(&catalog, "Roboto");
    assert_eq!(selection.variant(), "400");
    assert!(!selection.italic_toggled());

    assert_eq!(
        selection.toggle_italic(),
        ToggleOutcome::Switched {
            variant: "700italic".to_string()
        }
    );
    assert_eq!(selection.variant(), "700italic");
    assert!(selection.italic_toggled());

    assert_eq!(
        selection.toggle_italic(),
        ToggleOutcome::Switched {
            variant: "400".to_string()
        }
    );
    assert_eq!(selection.variant(), "400");
    assert!(!selection.italic_toggled());
}

#[test]
fn test_toggle_desync_when_no_opposite_style() {
    let catalog = FontCatalog::from_json(
        r#"{"Script": {"400italic": "https://x/s4i.woff2", "700italic": "https://x/s7i.woff2"}}"#,
    )
    .unwrap();
    let mut selection = Selection::new();
    selection.select_family(&catalog, "Script");
    assert_eq!(selection.variant(), "400italic");
    assert!(selection.italic_toggled());

    // No upright variant: the flag flips, the variant does not.
    assert_eq!(selection.toggle_italic(), ToggleOutcome::FlagOnly);
    assert!(!selection.italic_toggled());
    assert_eq!(selection.variant(), "400italic");
}

#[test]
fn test_toggle_on_oswald_is_inert() {
    let catalog = catalog();
    let mut selection = Selection::new();
    selection.select_family(&catalog, "Oswald");
    let before = selection.clone();
    assert_eq!(selection.toggle_italic(), ToggleOutcome::Inert);
    assert_eq!(selection, before);
}

#[test]
fn test_select_variant_requires_family() {
    let mut selection = Selection::new();
    assert!(!selection.select_variant("400"));
    assert_eq!(selection.variant(), "");
}

#[test]
fn test_select_variant_sets_toggle() {
    let catalog = catalog();
    let mut selection = Selection::new();
    selection.select_family(&catalog, "Lora");
    assert_eq!(selection.variant(), "italic");
    assert!(selection.italic_toggled());

    assert!(selection.select_variant("500"));
    assert!(!selection.italic_toggled());

    assert!(selection.select_variant("500italic"));
    assert!(selection.italic_toggled());
    assert_eq!(selection.variant(), "500italic");
}

#[test]
fn test_select_variant_rejects_foreign_name() {
    let catalog = catalog();
    let mut selection = Selection::new();
    selection.select_family(&catalog, "Oswald");
    assert!(!selection.select_variant("700italic"));
    assert_eq!(selection.variant(), "400");
}

#[test]
fn test_restore_adopts_valid_pair() {
    let catalog = catalog();
    let mut selection = Selection::new();
    assert!(selection.restore(&catalog, "Roboto", "700italic"));
    assert_eq!(selection.family(), "Roboto");
    assert_eq!(selection.variant(), "700italic");
    assert!(selection.italic_toggled());
    assert!(selection.italic_available());
}

#[test]
fn test_restore_stages_variants_for_known_family_only() {
    let catalog = catalog();
    let mut selection = Selection::new();

    assert!(!selection.restore(&catalog, "Roboto", ""));
    assert_eq!(selection.family(), "");
    assert_eq!(selection.variants(), ["400", "700italic"]);
    assert!(selection.italic_available());

    // Staged list without a family: the toggle stays inert.
    assert!(!selection.italic_control_active());
    assert_eq!(selection.toggle_italic(), ToggleOutcome::Inert);
    assert_eq!(selection.variant(), "");
    assert!(!selection.italic_toggled());

    let mut selection = Selection::new();
    assert!(!selection.restore(&catalog, "Gone", "400"));
    assert_eq!(selection, Selection::new());

    let mut selection = Selection::new();
    assert!(!selection.restore(&catalog, "Oswald", "900"));
    assert_eq!(selection.family(), "");
}

#[test]
fn test_reset_clears_everything() {
    let catalog = catalog();
    let mut selection = Selection::new();
    selection.select_family(&catalog, "Roboto");
    selection.toggle_italic();
    selection.reset();
    assert_eq!(selection, Selection::new());
}
