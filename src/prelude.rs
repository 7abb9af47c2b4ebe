//! Prelude module for the Crunchyroll exporter library
//!
//! Re-exports the items needed for a typical export with a single
//! `use crunchyroll_exporter::prelude::*;` statement.
//!
//! # Usage
//!
//! ```rust,no_run
//! use crunchyroll_exporter::prelude::*;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<()> {
//!     let (token, _source) = resolve_token(None, token_from_env().as_deref())?;
//!     let client = CrunchyrollClient::new(&token, &ClientConfig::default())?;
//!     let catalog = CatalogCache::load(Path::new("anime_code.csv"));
//!
//!     let columns = vec!["Title".to_string(), "Series ID".to_string()];
//!     let request = ExportRequest {
//!         kind: ExportKind::History,
//!         output: Path::new("history.csv"),
//!         columns: Some(&columns),
//!     };
//!     run_export(&client, &catalog, &request).await?;
//!     Ok(())
//! }
//! ```

// Core result types
pub use crate::errors::{AppError, Result};

// Export pipeline
pub use crate::app::{
    run_export, CatalogCache, ClientConfig, Column, CrunchyrollClient, ExportKind, ExportReport,
    ExportRequest,
};

// Authentication
pub use crate::auth::{resolve_token, token_from_env, BearerToken};

// Configuration
pub use crate::config::AppConfig;

// Commonly used constants
pub use crate::constants::{API_BASE_URL, ENV_TOKEN};

// Standard library re-exports that are commonly needed
pub use std::path::{Path, PathBuf};

pub use tokio;
