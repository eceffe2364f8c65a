//! logseq-export - export Joplin notes as Logseq pages

pub mod cli;
pub mod domain;
pub mod export;
pub mod host;
pub mod infra;
pub mod logging;

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{handle_completions, handle_export},
};

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose, cli.log_level.as_deref(), cli.log_json)
        .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;

    match &cli.command {
        Command::Completions(args) => handle_completions(args),
        Command::Export(args) => {
            let config = match &cli.config {
                Some(path) => Config::load_from(path)?,
                None => Config::load()?,
            };
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("failed to start async runtime")?;
            runtime.block_on(handle_export(args, &config))
        }
    }
}
