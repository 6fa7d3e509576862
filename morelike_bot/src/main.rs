// CLI entry point for the morelike bot.
//
// Resolves configuration (see `config.rs`), loads the dictionary and
// hyphenation patterns, then either serves TCP until the process is killed
// or, with `--stdio`, answers requests from stdin until it closes.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use morelike_bot::{BotConfig, Cli, MorelikeHandler, run_stdio, start_bot};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    init_tracing();

    let config = BotConfig::resolve(Cli::parse()).context("failed to resolve configuration")?;
    let engine = config
        .build_engine()
        .context("failed to load phonetic data")?;
    tracing::info!(
        substitutes = engine.vocabulary().len(),
        ignored = engine.ignored().len(),
        "engine loaded"
    );
    let mut handler = MorelikeHandler::new(engine, config.rng());

    if config.stdio {
        let stdin = io::stdin();
        let stdout = io::stdout();
        return run_stdio(&mut stdin.lock(), &mut stdout.lock(), &mut handler)
            .context("stdio loop failed");
    }

    let (_handle, addr) = start_bot(&config, handler).with_context(|| {
        format!(
            "failed to bind {}:{}",
            config.broker_host, config.broker_port
        )
    })?;
    tracing::info!(%addr, "morelike bot listening");

    // Serve until the process is killed.
    loop {
        std::thread::park();
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .compact()
        .init();
}
