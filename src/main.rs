//! Crunchyroll exporter CLI application
//!
//! Command-line interface for exporting a Crunchyroll account's watchlist,
//! watch history and crunchylists to CSV files.

use std::error::Error as _;
use std::process;

use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use crunchyroll_exporter::auth::token_from_env;
use crunchyroll_exporter::cli::{dispatch, Cli};
use crunchyroll_exporter::config::AppConfig;
use crunchyroll_exporter::errors::{AppError, Result};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize program
    let result = run().await;

    // Handle any errors that occurred
    if let Err(e) = result {
        report_error(&e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    // Parse command line arguments
    let cli = Cli::parse_args();

    let config = AppConfig::load(cli.global.config.as_deref()).await?;

    // Initialize logging based on verbosity
    init_logging(&cli, &config);

    info!("Crunchyroll exporter v{} starting", env!("CARGO_PKG_VERSION"));

    let env_token = token_from_env();
    dispatch(&cli, &config, env_token.as_deref()).await
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli, config: &AppConfig) {
    let log_level = cli.log_level(&config.logging.level);

    let mut filter = EnvFilter::from_default_env();
    let mut rejected = None;
    match format!("crunchyroll_exporter={}", log_level).parse() {
        Ok(directive) => filter = filter.add_directive(directive),
        Err(_) => rejected = Some(log_level.to_string()),
    }

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .init();

    if let Some(level) = rejected {
        warn!("Ignoring invalid log level '{}'", level);
    }
    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}

/// Print the error and its causes to stderr
fn report_error(e: &AppError) {
    eprintln!("Error: {}", e);
    let mut source = e.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}
