//! Handler for the `export` command.

use anyhow::{Context, Result};

use crate::cli::{ExportArgs, config::Config, output::{Output, OutputFormat}};
use crate::domain::ExportOptions;
use crate::export::{ExportReport, Exporter};
use crate::host::{DataApi, JoplinClient, MemoryHost};

use super::ConsoleNotifier;

/// Resolve export options from CLI arguments and config.
///
/// # Errors
///
/// Fails when neither `--output` nor the config names an export root.
pub fn resolve_options(args: &ExportArgs, config: &Config) -> Result<ExportOptions> {
    let path = config.export_path(args.output.as_ref()).with_context(|| {
        format!(
            "no export directory: pass --output or set `path` in {}",
            Config::config_path().display()
        )
    })?;

    Ok(ExportOptions {
        format: config.format(args.format),
        path,
        include_resources: config.include_resources(args.resources_flag()),
        split_by_paragraph: config.split_by_paragraph(args.split_flag()),
    })
}

/// Handle the `export` command.
pub async fn handle_export(args: &ExportArgs, config: &Config) -> Result<()> {
    let options = resolve_options(args, config)?;

    match &args.snapshot {
        Some(dir) => {
            let host = MemoryHost::from_dir(dir)
                .with_context(|| format!("failed to load snapshot {}", dir.display()))?;
            run_export(&host, &options, args.output_format).await
        }
        None => {
            let token = config.joplin_token(args.token.as_deref()).context(
                "no REST token: pass --token, set JOPLIN_TOKEN or add `token` under [joplin] in the config file",
            )?;
            let client = JoplinClient::new(config.joplin_url(args.url.as_deref()), token);
            tracing::debug!(url = client.base_url(), "using REST host");
            run_export(&client, &options, args.output_format).await
        }
    }
}

async fn run_export<A: DataApi>(
    api: &A,
    options: &ExportOptions,
    format: OutputFormat,
) -> Result<()> {
    let report = Exporter::new(api, ConsoleNotifier::new(format))
        .export(options)
        .await?;
    print_result(format, &report)
}

/// Print the result in the requested format.
///
/// Human mode has already shown the completion message.
fn print_result(format: OutputFormat, report: &ExportReport) -> Result<()> {
    if format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&Output::new(report))?);
    }
    Ok(())
}
