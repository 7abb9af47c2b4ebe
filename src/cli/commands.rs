//! Command handlers for the Crunchyroll exporter CLI
//!
//! This module connects parsed arguments to the export pipeline. Every
//! check that needs no network (token, column names) runs before the HTTP
//! client is built.

use std::path::Path;

use tracing::{debug, info};

use crate::app::{
    run_export, CatalogCache, Column, CrunchyrollClient, ExportKind, ExportReport, ExportRequest,
};
use crate::auth::resolve_token;
use crate::cli::{Cli, ExportArgs, ExportSpinner, GlobalArgs};
use crate::config::AppConfig;
use crate::errors::Result;

/// Execute the parsed command
///
/// `env_token` is the value of `CRUNCHYROLL_TOKEN`, passed in rather than
/// read here so callers decide where the environment comes from.
pub async fn dispatch(cli: &Cli, config: &AppConfig, env_token: Option<&str>) -> Result<()> {
    let Some((kind, args)) = cli.command.export() else {
        info!("Executing show-columns command");
        print!("{}", render_columns());
        return Ok(());
    };

    info!("Executing {} export", kind);
    handle_export(kind, args, &cli.global, config, env_token)
        .await
        .map(|_| ())
}

/// Handle one of the export commands
///
/// # Errors
///
/// Fails with `ConfigError` when no token is available and with
/// `ValidationError` for unknown columns, in both cases before any request
/// is sent.
pub async fn handle_export(
    kind: ExportKind,
    args: &ExportArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    env_token: Option<&str>,
) -> Result<ExportReport> {
    let (token, source) = resolve_token(global.token.as_deref(), env_token)?;
    info!("Authenticating with token from {}", source);

    let requested = args.column_names();
    let columns = kind.select_columns(requested.as_deref())?;
    debug!("Validated {} columns for {}", columns.len(), kind);

    let catalog = if kind.columns().contains(&Column::AnimeTitle) {
        let path = global
            .catalog
            .as_deref()
            .unwrap_or(config.catalog.path.as_path());
        CatalogCache::load(path)
    } else {
        CatalogCache::empty()
    };

    let client = CrunchyrollClient::new(&token, &config.client)?;
    let request = ExportRequest {
        kind,
        output: &args.output,
        columns: requested.as_deref(),
    };

    let spinner = ExportSpinner::start(kind, global.quiet);
    let report = match run_export(&client, &catalog, &request).await {
        Ok(report) => report,
        Err(e) => {
            spinner.abandon();
            return Err(e);
        }
    };
    spinner.finish(summary_line(&report, &args.output));
    debug!("{} requests sent", client.requests_sent());

    Ok(report)
}

fn summary_line(report: &ExportReport, output: &Path) -> String {
    format!(
        "✅ Exported {} {} rows to {}",
        report.rows_written,
        report.kind,
        output.display()
    )
}

/// Numbered column listing for every export kind
pub fn render_columns() -> String {
    let mut out = String::new();
    for kind in ExportKind::ALL {
        out.push_str(&format!("{} columns:\n", kind));
        for (i, column) in kind.columns().iter().enumerate() {
            out.push_str(&format!("  {:>2}. {}\n", i + 1, column));
        }
        out.push('\n');
    }
    out.push_str("Select columns with --columns \"Title,Series ID\"; ");
    out.push_str("selecting Series ID adds Anime Title.\n");
    out
}
