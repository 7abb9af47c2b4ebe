//! Command-line interface components
//!
//! This module contains CLI-specific code for the Crunchyroll exporter,
//! including argument parsing, command dispatch and progress display.

pub mod args;
pub mod commands;
pub mod progress;

pub use args::{Cli, Commands, ExportArgs, GlobalArgs};
pub use commands::{dispatch, handle_export, render_columns};
pub use progress::ExportSpinner;
