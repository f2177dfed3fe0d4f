//! CSV serialization and one-shot file save for normalized reviews.
//!
//! Output format: a verbatim header row, then one row per record with every
//! field quoted and embedded quotes doubled. Embedded newlines stay inside
//! the quoted field, which keeps the output valid RFC 4180. An empty row
//! set produces no output at all.

use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tracing::{debug, info};

use super::normalize::ReviewRow;

/// Column headers for the export, in output order.
pub const CSV_HEADERS: [&str; 4] = ["Recommended", "Rating", "Title", "Review Text"];

/// Errors that can occur while producing the CSV export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization failed.
    #[error("failed to serialize CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the export file failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// Serializes normalized reviews to CSV text.
///
/// Returns `Ok(None)` for an empty row set (the export is a no-op, not an
/// error). The header row is written unquoted; record fields are always
/// quoted so commas, quotes, and newlines inside review text survive.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] if serialization fails.
pub fn reviews_to_csv(rows: &[ReviewRow]) -> Result<Option<String>, ExportError> {
    if rows.is_empty() {
        return Ok(None);
    }

    let mut buf = Vec::new();
    buf.extend_from_slice(CSV_HEADERS.join(",").as_bytes());
    buf.push(b'\n');

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(&mut buf);
    for row in rows {
        writer.write_record([
            row.recommended.to_string(),
            row.rating_display(),
            row.title.clone(),
            row.review_text.clone(),
        ])?;
    }
    writer.flush().map_err(csv::Error::from)?;
    drop(writer);

    debug!(rows = rows.len(), bytes = buf.len(), "CSV serialized");
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Filename for an export generated on the given date.
#[must_use]
pub fn export_filename(date: chrono::NaiveDate) -> String {
    format!("reviews_product_{}.csv", date.format("%Y-%m-%d"))
}

/// Filename for an export generated today (UTC).
#[must_use]
pub fn default_export_filename() -> String {
    export_filename(Utc::now().date_naive())
}

/// Writes the CSV export into `output_dir` with a date-stamped filename.
///
/// Returns the path of the written file, or `Ok(None)` when the row set is
/// empty and nothing was written.
///
/// # Errors
///
/// Returns [`ExportError`] if serialization or the file write fails.
pub fn write_csv_export(
    rows: &[ReviewRow],
    output_dir: &Path,
) -> Result<Option<PathBuf>, ExportError> {
    let Some(text) = reviews_to_csv(rows)? else {
        debug!("no reviews to export, skipping file write");
        return Ok(None);
    };

    let path = output_dir.join(default_export_filename());
    std::fs::write(&path, text).map_err(|source| ExportError::Io {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), rows = rows.len(), "CSV export written");
    Ok(Some(path))
}
