//! CLI command definitions and handlers

pub mod config;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::ExportFormat;
use output::OutputFormat;

/// logseq-export - export Joplin notes as Logseq pages
#[derive(Parser, Debug)]
#[command(name = "logseq-export", version, about, long_about = None)]
pub struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Log filter level or directive (e.g. debug, logseq_export=trace)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Export all notes into a Logseq graph directory
    Export(ExportArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `export` command
#[derive(Parser, Debug)]
pub struct ExportArgs {
    /// Export format (overrides config)
    #[arg(short = 'F', long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Export root directory (overrides config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Copy attachments into assets/
    #[arg(long, overrides_with = "no_resources")]
    pub resources: bool,

    /// Leave attachment references untouched
    #[arg(long = "no-resources", overrides_with = "resources")]
    pub no_resources: bool,

    /// One block per paragraph
    #[arg(long, overrides_with = "no_split")]
    pub split: bool,

    /// One block per note
    #[arg(long = "no-split", overrides_with = "split")]
    pub no_split: bool,

    /// Read notes from a snapshot directory instead of the REST service
    #[arg(long, conflicts_with = "url")]
    pub snapshot: Option<PathBuf>,

    /// REST service URL (overrides config)
    #[arg(long)]
    pub url: Option<String>,

    /// REST service token (overrides config)
    #[arg(long, env = "JOPLIN_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short = 'f', long = "output-format", value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,
}

impl ExportArgs {
    /// `Some` when either `--resources` or `--no-resources` was given.
    pub fn resources_flag(&self) -> Option<bool> {
        flag_pair(self.resources, self.no_resources)
    }

    /// `Some` when either `--split` or `--no-split` was given.
    pub fn split_flag(&self) -> Option<bool> {
        flag_pair(self.split, self.no_split)
    }
}

fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> ExportArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Export(args) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn flags_are_unset_by_default() {
        let args = parse(&["logseq-export", "export"]);
        assert_eq!(args.format, None);
        assert_eq!(args.resources_flag(), None);
        assert_eq!(args.split_flag(), None);
    }

    #[test]
    fn last_of_a_flag_pair_wins() {
        let args = parse(&[
            "logseq-export",
            "export",
            "--no-split",
            "--split",
            "--resources",
            "--no-resources",
        ]);
        assert_eq!(args.split_flag(), Some(true));
        assert_eq!(args.resources_flag(), Some(false));
    }

    #[test]
    fn parses_format_and_output() {
        let args = parse(&["logseq-export", "export", "-F", "edn", "-o", "/tmp/graph"]);
        assert_eq!(args.format, Some(ExportFormat::Edn));
        assert_eq!(args.output, Some(PathBuf::from("/tmp/graph")));
    }

    #[test]
    fn snapshot_conflicts_with_url() {
        let result = Cli::try_parse_from([
            "logseq-export",
            "export",
            "--snapshot",
            "/tmp/snap",
            "--url",
            "http://localhost:1",
        ]);
        assert!(result.is_err());
    }
}
