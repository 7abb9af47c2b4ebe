//! Core application logic for the Crunchyroll exporter
//!
//! This module contains the API client, response extraction, typed records,
//! the catalog cache, column projection and CSV output.
//!
//! # Examples
//!
//! ```rust,no_run
//! use std::path::Path;
//! use crunchyroll_exporter::app::{
//!     run_export, CatalogCache, ClientConfig, CrunchyrollClient, ExportKind, ExportRequest,
//! };
//! use crunchyroll_exporter::auth::BearerToken;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let token = BearerToken::parse("Bearer eyJ...")?;
//! let client = CrunchyrollClient::new(&token, &ClientConfig::default())?;
//! let catalog = CatalogCache::load(Path::new("anime_code.csv"));
//!
//! let request = ExportRequest {
//!     kind: ExportKind::Watchlist,
//!     output: Path::new("watchlist.csv"),
//!     columns: None,
//! };
//! let report = run_export(&client, &catalog, &request).await?;
//! println!("{} rows written", report.rows_written);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod client;
pub mod columns;
pub mod csv_writer;
pub mod export;
pub mod extract;
pub mod models;
pub mod projector;

// Re-export main public API
pub use catalog::CatalogCache;
pub use client::{ClientConfig, CrunchyrollClient};
pub use columns::{parse_column_list, Column, ExportKind};
pub use export::{run_export, ExportReport, ExportRequest};
pub use extract::{extract_cursor, extract_items, Page};
pub use models::{CatalogItem, ContentRecord, ContentType, CustomList};
pub use projector::{project, ColumnSource, Projection};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_structure() {
        let config = ClientConfig::default();
        assert!(config.max_retries > 0);
        assert_eq!(ExportKind::ALL.len(), 4);
    }
}
