//! End-to-end tests of the interactive shell over an in-memory session.

mod common;

use common::{SharedStore, mount_loaded};
use typepad::TextBuffer;
use typepad::shell::run_shell;
use typepad_config::keys;

fn run(store: &SharedStore, script: &str) -> String {
    let buffer = TextBuffer::new();
    let mut session = mount_loaded(store, &buffer);
    let mut out = Vec::new();
    run_shell(&mut session, &buffer, script.as_bytes(), &mut out).expect("shell runs");
    String::from_utf8(out).expect("utf-8 output")
}

#[test]
fn test_shell_select_and_css() {
    let store = SharedStore::default();
    let out = run(&store, "family Roboto\nitalic\ncss\nquit\n");

    assert!(out.contains("3 font families available."));
    assert!(out.contains("Roboto 400"));
    assert!(out.contains("700italic"));
    assert!(out.contains("font-style: italic;"));
    assert_eq!(
        store.value(keys::SELECTED_VARIANT).as_deref(),
        Some("700italic")
    );
}

#[test]
fn test_shell_text_and_reset() {
    let store = SharedStore::default();
    let out = run(&store, "text Hello there\nshow\nreset\nshow\n");

    assert!(out.contains("Hello there"));
    assert!(out.contains("Reset."));
    assert_eq!(store.value(keys::CONTENT).as_deref(), Some(""));
}

#[test]
fn test_shell_reports_inert_controls() {
    let store = SharedStore::default();
    let out = run(&store, "variants\nvariant 400\nfamily Oswald\nitalic\nbogus\n");

    assert!(out.contains("(select a family first)"));
    assert!(out.contains("Variant '400' is not available."));
    assert!(out.contains("(no italic variant)"));
    assert!(out.contains("unknown command 'bogus'"));
}

#[test]
fn test_shell_status() {
    let store = SharedStore::default();
    let out = run(&store, "family Script\nstatus\n");

    assert!(out.contains("catalog: 3 families"));
    assert!(out.contains("family:  Script"));
    assert!(out.contains("variant: 400italic"));
    assert!(out.contains("italic:  on"));
}
