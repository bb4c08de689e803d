//! Command-line interface for typepad.
//!
//! Parses arguments, resolves configuration and dispatches subcommands.
//! With no subcommand the interactive shell starts.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::runtime::Runtime;
use typepad_config::{Config, JsonFileStore, LogLevel};

use crate::editor::TextBuffer;
use crate::loader::{CatalogLoader, CatalogSource, FetchOptions};
use crate::session::{CatalogState, EditorSession};

/// typepad - pick a web font and write with it
#[derive(Parser)]
#[command(name = "typepad")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Font catalog location: an http(s) URL or a file path
    #[arg(long, value_name = "SOURCE")]
    pub catalog: Option<String>,

    /// State file holding the selection and text
    #[arg(long, value_name = "PATH")]
    pub state: Option<PathBuf>,

    /// Config file (default: ~/.config/typepad/config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Debug log level: off, error, warn, info, debug, trace
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commands {
    /// List the catalog's families and their variants
    Families,
    /// Print the @font-face rule for the saved selection
    Css,
    /// Clear the saved selection and text
    Reset,
    /// Interactive editing shell (default)
    Shell,
}

/// Settings resolved from CLI flags layered over the config file.
#[derive(Debug, Clone)]
pub struct RuntimeOptions {
    pub source: CatalogSource,
    pub state_path: PathBuf,
    pub fetch: FetchOptions,
}

impl RuntimeOptions {
    pub fn resolve(cli: &Cli, config: &Config) -> Self {
        let catalog = cli.catalog.as_deref().unwrap_or(&config.catalog);
        Self {
            source: CatalogSource::parse(catalog),
            state_path: cli.state.clone().unwrap_or_else(|| config.state_path()),
            fetch: FetchOptions::from_config(config),
        }
    }
}

/// Load the config file named on the command line, or the default one.
/// Config file this invocation reads: `--config` or the default location.
pub fn config_path(cli: &Cli) -> PathBuf {
    cli.config.clone().unwrap_or_else(Config::config_path)
}

pub fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {:?}", path))?,
        None => Config::load().context("Failed to load config")?,
    };
    Ok(config)
}

/// Run the selected subcommand.
pub fn run(cli: &Cli, config: &Config, runtime: &Arc<Runtime>) -> Result<()> {
    let options = RuntimeOptions::resolve(cli, config);
    log::info!(
        "Catalog source: {}, state file: {:?}",
        options.source,
        options.state_path
    );

    let store = JsonFileStore::open(&options.state_path)
        .with_context(|| format!("Failed to open state file {:?}", options.state_path))?;
    let buffer = TextBuffer::new();
    let mut session = EditorSession::mount(Box::new(store), Box::new(buffer.clone()));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Reset => {
            session.reset();
            writeln!(out, "Cleared saved font selection and text.")?;
        }
        Commands::Families => {
            load_blocking(&mut session, &options, runtime);
            print_families(&session, &mut out)?;
        }
        Commands::Css => {
            load_blocking(&mut session, &options, runtime);
            match session.css() {
                Some(css) => writeln!(out, "{css}")?,
                None => writeln!(out, "/* no font selected */")?,
            }
        }
        Commands::Shell => {
            let pending =
                CatalogLoader::start(options.source.clone(), options.fetch, runtime);
            session.attach_loader(pending);
            writeln!(out, "Loading font catalog from {} ...", options.source)?;

            let stdin = io::stdin();
            crate::shell::run_shell(&mut session, &buffer, stdin.lock(), &mut out)?;
        }
    }

    session.teardown();
    Ok(())
}

fn load_blocking(session: &mut EditorSession, options: &RuntimeOptions, runtime: &Arc<Runtime>) {
    let pending = CatalogLoader::start(options.source.clone(), options.fetch, runtime);
    let result = runtime.block_on(pending.wait());
    session.apply_catalog(result);
}

fn print_families(session: &EditorSession, out: &mut impl Write) -> Result<()> {
    if let CatalogState::Failed(_) = session.catalog_state() {
        writeln!(out, "(catalog unavailable, see debug log)")?;
        return Ok(());
    }
    for family in session.catalog().families() {
        let variants: Vec<&str> = family.variants.iter().map(|v| v.name.as_str()).collect();
        writeln!(out, "{}: {}", family.name, variants.join(", "))?;
    }
    Ok(())
}
