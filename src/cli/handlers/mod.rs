//! Command handlers for the CLI.

mod export;

use anyhow::Result;
use clap::CommandFactory;

use crate::cli::{Cli, CompletionsArgs, output::OutputFormat};
use crate::host::Notifier;

pub use export::{handle_export, resolve_options};

/// Shows exporter messages on the console.
///
/// In JSON mode stdout carries only the result document, so messages go
/// to stderr.
pub(crate) struct ConsoleNotifier {
    format: OutputFormat,
}

impl ConsoleNotifier {
    pub(crate) fn new(format: OutputFormat) -> Self {
        Self { format }
    }
}

impl Notifier for ConsoleNotifier {
    fn show_message(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("{message}"),
            OutputFormat::Json => eprintln!("{message}"),
        }
    }
}

/// Handle the `completions` command.
pub fn handle_completions(args: &CompletionsArgs) -> Result<()> {
    clap_complete::generate(
        args.shell,
        &mut Cli::command(),
        "logseq-export",
        &mut std::io::stdout(),
    );
    Ok(())
}
