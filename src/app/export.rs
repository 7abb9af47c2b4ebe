//! Export pipeline: fetch, project, write
//!
//! Columns are validated before the first request so a typo never costs a
//! round of API calls.

use std::path::Path;

use tracing::info;

use crate::app::catalog::CatalogCache;
use crate::app::client::CrunchyrollClient;
use crate::app::columns::{Column, ExportKind};
use crate::app::csv_writer;
use crate::app::projector::{project_columns, ColumnSource};
use crate::errors::Result;

/// Summary of a finished export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub kind: ExportKind,
    pub rows_written: usize,
    pub columns: Vec<Column>,
}

/// Everything one export run needs
#[derive(Debug)]
pub struct ExportRequest<'a> {
    pub kind: ExportKind,
    pub output: &'a Path,
    pub columns: Option<&'a [String]>,
}

/// Run one export end to end
///
/// The catalog is only consulted for kinds whose rows can be enriched.
///
/// # Errors
///
/// Propagates validation, request, parse and output errors unchanged. On
/// any error the destination file is left untouched.
pub async fn run_export(
    client: &CrunchyrollClient,
    catalog: &CatalogCache,
    request: &ExportRequest<'_>,
) -> Result<ExportReport> {
    let columns = request.kind.select_columns(request.columns)?;
    info!(
        "Exporting {} with columns: {}",
        request.kind,
        columns
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let rows_written = match request.kind {
        ExportKind::Watchlist => {
            let account_id = client.account_id().await?;
            let records = client.watchlist(&account_id).await?;
            write_projection(&records, &columns, catalog, request.output)?
        }
        ExportKind::History => {
            let account_id = client.account_id().await?;
            let records = client.watch_history(&account_id).await?;
            write_projection(&records, &columns, catalog, request.output)?
        }
        ExportKind::Crunchylists => {
            let account_id = client.account_id().await?;
            let records = client.crunchylist_records(&account_id).await?;
            write_projection(&records, &columns, catalog, request.output)?
        }
        ExportKind::Catalog => {
            let items = client.browse_catalog().await?;
            write_projection(&items, &columns, &CatalogCache::empty(), request.output)?
        }
    };

    info!(
        "{} exported to {} ({} rows)",
        request.kind,
        request.output.display(),
        rows_written
    );

    Ok(ExportReport {
        kind: request.kind,
        rows_written,
        columns,
    })
}

fn write_projection<R: ColumnSource>(
    records: &[R],
    columns: &[Column],
    catalog: &CatalogCache,
    output: &Path,
) -> Result<usize> {
    let projection = project_columns(records, columns, catalog);
    csv_writer::write(output, &projection.header, &projection.rows)
}
