//! Command-line argument parsing for the Crunchyroll exporter
//!
//! This module defines the CLI structure using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::{parse_column_list, ExportKind};

/// Crunchyroll exporter - save your watchlist, history and crunchylists as CSV
#[derive(Parser, Debug)]
#[command(
    name = "crunchyroll_exporter",
    version,
    about = "Export Crunchyroll watchlist, history and crunchylists to CSV",
    long_about = "Exports your Crunchyroll watchlist, watch history and crunchylists to CSV files with selectable columns.
Authenticate with the bearer token from a logged-in browser session, passed with --token or the CRUNCHYROLL_TOKEN environment variable."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Crunchyroll authorization token ("Bearer ..."); overrides CRUNCHYROLL_TOKEN
    #[arg(long, global = true, value_name = "TOKEN")]
    pub token: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Catalog CSV used to fill the "Anime Title" column
    #[arg(long, global = true, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Export watchlist to CSV
    ExportWatchlist(ExportArgs),

    /// Export watch history to CSV
    ExportHistory(ExportArgs),

    /// Export crunchylists to CSV
    ExportCrunchylists(ExportArgs),

    /// Export the complete anime catalog (used as the title cache)
    GetAnimeList(ExportArgs),

    /// Show all available columns for each export
    ShowColumns,
}

/// Arguments shared by the export commands
#[derive(Args, Debug, Clone)]
pub struct ExportArgs {
    /// Output CSV file path
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Comma-separated list of columns to export (default: all)
    #[arg(long, value_name = "A,B,C")]
    pub columns: Option<String>,
}

impl ExportArgs {
    /// Requested column names, in the order given
    ///
    /// An empty `--columns` value selects every column, like omitting it.
    pub fn column_names(&self) -> Option<Vec<String>> {
        self.columns
            .as_deref()
            .map(parse_column_list)
            .filter(|names| !names.is_empty())
    }
}

impl Commands {
    /// Export kind and arguments, `None` for commands that export nothing
    pub fn export(&self) -> Option<(ExportKind, &ExportArgs)> {
        match self {
            Commands::ExportWatchlist(args) => Some((ExportKind::Watchlist, args)),
            Commands::ExportHistory(args) => Some((ExportKind::History, args)),
            Commands::ExportCrunchylists(args) => Some((ExportKind::Crunchylists, args)),
            Commands::GetAnimeList(args) => Some((ExportKind::Catalog, args)),
            Commands::ShowColumns => None,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging directive based on global arguments
    ///
    /// Flags win over the configured default level.
    pub fn log_level<'a>(&self, configured: &'a str) -> &'a str {
        if self.global.quiet {
            "error"
        } else if self.global.very_verbose {
            "debug"
        } else if self.global.verbose {
            "info"
        } else {
            configured
        }
    }
}
