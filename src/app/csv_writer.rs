//! CSV output with UTF-8 byte-order mark and atomic replacement
//!
//! Rows are written to a temporary file beside the destination which is
//! renamed into place only after every row has been flushed. A failed export
//! therefore never leaves a truncated file at the destination path.

use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::constants::files;
use crate::errors::{AppError, Result};

/// Write `header` then `rows` to `path`
///
/// Fields containing delimiters, quotes or newlines are quoted. Returns the
/// number of data rows written.
///
/// # Errors
///
/// Returns `AppError::Output` when the destination directory does not exist
/// or is not writable, and `AppError::Csv` on serialization failure.
pub fn write<S: AsRef<str>>(path: &Path, header: &[S], rows: &[Vec<String>]) -> Result<usize> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(parent).map_err(|e| AppError::output(path, e))?;
    debug!(
        "Writing {} rows via temporary file {}",
        rows.len(),
        temp.path().display()
    );

    let mut buffered = BufWriter::new(temp);
    buffered
        .write_all(files::UTF8_BOM)
        .map_err(|e| AppError::output(path, e))?;

    let mut writer = csv::Writer::from_writer(buffered);
    writer.write_record(header.iter().map(|h| h.as_ref()))?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush().map_err(|e| AppError::output(path, e))?;

    // Dropping the temp file on any early return removes it
    let buffered = writer.into_inner().map_err(|e| {
        AppError::output(path, std::io::Error::new(e.error().kind(), e.error().to_string()))
    })?;
    let temp = buffered
        .into_inner()
        .map_err(|e| AppError::output(path, e.into_error()))?;
    apply_output_permissions(&temp, path).map_err(|e| AppError::output(path, e))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| AppError::output(path, e))?;
    temp.persist(path)
        .map_err(|e| AppError::output(path, e.error))?;

    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(rows.len())
}

/// Temp files are created owner-only; give the export the destination's
/// existing mode, or a regular file mode for a new file
#[cfg(unix)]
fn apply_output_permissions(temp: &NamedTempFile, path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let permissions = match std::fs::metadata(path) {
        Ok(existing) => existing.permissions(),
        Err(_) => std::fs::Permissions::from_mode(files::OUTPUT_FILE_MODE),
    };
    temp.as_file().set_permissions(permissions)
}

#[cfg(not(unix))]
fn apply_output_permissions(_temp: &NamedTempFile, _path: &Path) -> std::io::Result<()> {
    Ok(())
}
