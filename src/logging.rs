//! Tracing subscriber setup for the CLI.
//!
//! Logs go to stderr so stdout stays reserved for command output.

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding a filter directive, e.g. `logseq_export=debug`.
pub const LOG_ENV: &str = "LOGSEQ_EXPORT_LOG";

/// Installs the global subscriber.
///
/// An explicit `log_level` wins over `verbose`. Either is overridden by
/// `RUST_LOG` or `LOGSEQ_EXPORT_LOG` when set.
pub fn init_tracing(
    verbose: u8,
    log_level: Option<&str>,
    log_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let level = default_level(verbose, log_level);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV))
        .unwrap_or_else(|_| EnvFilter::new(directive(level)));

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()?;
    }

    Ok(())
}

/// Level picked from the `-v` count unless one was given explicitly.
fn default_level(verbose: u8, log_level: Option<&str>) -> &str {
    match (verbose, log_level) {
        (_, Some(level)) => level,
        (0, None) => "warn",
        (1, None) => "debug",
        (_, None) => "trace",
    }
}

/// A bare level applies to this crate only; full directives pass through.
fn directive(level: &str) -> String {
    if level.contains('=') {
        level.to_string()
    } else {
        format!("logseq_export={level}")
    }
}
