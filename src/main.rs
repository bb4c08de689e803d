use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tokio::runtime::Runtime;
use typepad::cli::{self, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli::load_config(&cli)?;

    // CLI --log-level flag takes highest precedence, then RUST_LOG, then config.
    typepad::debug::init_log_bridge(typepad::debug::resolve_level(
        cli.log_level,
        config.log_level,
    ));

    log::info!("Starting typepad {}", typepad::VERSION);
    // Config was read before the logger existed; report where it came from.
    log::info!("Config file: {:?}", cli::config_path(&cli));

    // Runtime for the background catalog fetch
    let runtime = Arc::new(Runtime::new()?);

    let result = cli::run(&cli, &config, &runtime);

    // A catalog fetch may still be blocked on the network; don't wait forever.
    if let Ok(rt) = Arc::try_unwrap(runtime) {
        rt.shutdown_timeout(Duration::from_secs(2));
    }

    if let Err(ref e) = result {
        eprintln!("typepad: error: {e:#}");
    }
    result
}
