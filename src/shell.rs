//! Line-oriented interactive shell over an [`EditorSession`].
//!
//! Each line is one user action on the editor's controls. Catalog results
//! and text change events are drained between commands.

use std::io::{BufRead, Write};

use anyhow::Result;
use typepad_fonts::{FamilyChange, ToggleOutcome};

use crate::editor::{EditableRegion, TextBuffer};
use crate::session::{CatalogState, EditorSession};

const HELP: &str = "\
Commands:
  families          list font families
  variants          list variants of the selected family
  family [NAME]     select a family (no name = none)
  variant NAME      select a variant
  italic            toggle italic
  text TEXT         replace the editor text
  show              print the editor text
  css               print the @font-face rule
  status            show the current selection
  save              save the selection
  reset             clear selection and text
  help              this message
  quit              leave the shell";

/// One parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Families,
    Variants,
    Family(String),
    Variant(String),
    Italic,
    Text(String),
    Show,
    Css,
    Status,
    Save,
    Reset,
    Help,
    Quit,
    Empty,
}

impl ShellCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        let (word, rest) = match trimmed.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (trimmed.trim_end(), ""),
        };

        let command = match word.to_ascii_lowercase().as_str() {
            "" => ShellCommand::Empty,
            "families" => ShellCommand::Families,
            "variants" => ShellCommand::Variants,
            "family" => ShellCommand::Family(rest.to_string()),
            "variant" if rest.is_empty() => return Err("usage: variant NAME".to_string()),
            "variant" => ShellCommand::Variant(rest.to_string()),
            "italic" => ShellCommand::Italic,
            // Text keeps its inner spacing; only the separator is dropped.
            "text" => ShellCommand::Text(
                trimmed
                    .get(word.len()..)
                    .map(|s| s.strip_prefix(' ').unwrap_or(s))
                    .unwrap_or_default()
                    .to_string(),
            ),
            "show" => ShellCommand::Show,
            "css" => ShellCommand::Css,
            "status" => ShellCommand::Status,
            "save" => ShellCommand::Save,
            "reset" => ShellCommand::Reset,
            "help" | "?" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => return Err(format!("unknown command '{other}', try 'help'")),
        };
        Ok(command)
    }
}

/// Run the shell until `quit` or end of input.
pub fn run_shell<R: BufRead, W: Write>(
    session: &mut EditorSession,
    buffer: &TextBuffer,
    input: R,
    mut out: W,
) -> Result<()> {
    let mut announced = false;

    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        if session.poll_catalog() {
            announced = false;
        }
        if !announced && !session.is_loading() {
            announce_catalog(session, &mut out)?;
            announced = true;
        }

        match ShellCommand::parse(&line) {
            Ok(ShellCommand::Quit) => break,
            Ok(command) => execute(session, buffer, command, &mut out)?,
            Err(message) => writeln!(out, "{message}")?,
        }

        write!(out, "> ")?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}

fn announce_catalog(session: &EditorSession, out: &mut impl Write) -> Result<()> {
    match session.catalog_state() {
        CatalogState::Loaded => {
            writeln!(out, "{} font families available.", session.catalog().len())?;
            if session.selection().has_family() {
                writeln!(
                    out,
                    "Restored {} {}.",
                    session.selection().family(),
                    session.selection().variant()
                )?;
            }
        }
        CatalogState::Failed(_) => writeln!(out, "No font families available.")?,
        CatalogState::Loading => {}
    }
    Ok(())
}

fn execute(
    session: &mut EditorSession,
    buffer: &TextBuffer,
    command: ShellCommand,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        ShellCommand::Families => {
            let selected = session.selection().family().to_string();
            for name in session.family_names() {
                let marker = if name == selected { "*" } else { " " };
                writeln!(out, "{marker} {name}")?;
            }
        }
        ShellCommand::Variants => {
            if !session.variant_selector_enabled() {
                writeln!(out, "(select a family first)")?;
                return Ok(());
            }
            let current = session.selection().variant().to_string();
            for name in session.variant_names() {
                let marker = if *name == current { "*" } else { " " };
                writeln!(out, "{marker} {name}")?;
            }
        }
        ShellCommand::Family(name) => match session.select_family(&name) {
            FamilyChange::Resolved => {
                writeln!(out, "{} {}", name, session.selection().variant())?
            }
            FamilyChange::Unresolved if name.is_empty() => writeln!(out, "No family selected.")?,
            FamilyChange::Unresolved => writeln!(out, "'{name}' has no variants.")?,
        },
        ShellCommand::Variant(name) => {
            if !session.select_variant(&name) {
                writeln!(out, "Variant '{name}' is not available.")?;
            }
        }
        ShellCommand::Italic => match session.toggle_italic() {
            ToggleOutcome::Inert => writeln!(out, "(no italic variant)")?,
            ToggleOutcome::Switched { variant } => writeln!(out, "{variant}")?,
            ToggleOutcome::FlagOnly => writeln!(
                out,
                "Italic {}.",
                if session.selection().italic_toggled() {
                    "on"
                } else {
                    "off"
                }
            )?,
        },
        ShellCommand::Text(text) => {
            buffer.input(&text);
            session.pump_input();
        }
        ShellCommand::Show => writeln!(out, "{}", session.region().text())?,
        ShellCommand::Css => match session.css() {
            Some(css) => writeln!(out, "{css}")?,
            None => writeln!(out, "/* no font selected */")?,
        },
        ShellCommand::Status => write_status(session, out)?,
        ShellCommand::Save => {
            session.save();
            writeln!(out, "Saved.")?;
        }
        ShellCommand::Reset => {
            session.reset();
            writeln!(out, "Reset.")?;
        }
        ShellCommand::Help => writeln!(out, "{HELP}")?,
        ShellCommand::Empty | ShellCommand::Quit => {}
    }
    Ok(())
}

fn write_status(session: &EditorSession, out: &mut impl Write) -> Result<()> {
    let selection = session.selection();
    let catalog = match session.catalog_state() {
        CatalogState::Loading => "loading".to_string(),
        CatalogState::Loaded => format!("{} families", session.catalog().len()),
        CatalogState::Failed(_) => "unavailable".to_string(),
    };
    let or_none = |s: &str| if s.is_empty() { "-".to_string() } else { s.to_string() };

    writeln!(out, "catalog: {catalog}")?;
    writeln!(out, "family:  {}", or_none(selection.family()))?;
    writeln!(out, "variant: {}", or_none(selection.variant()))?;
    writeln!(
        out,
        "italic:  {}{}",
        if selection.italic_toggled() { "on" } else { "off" },
        if selection.italic_control_active() {
            ""
        } else {
            " (unavailable)"
        }
    )?;
    writeln!(out, "text:    {} chars", session.content().chars().count())?;
    Ok(())
}
