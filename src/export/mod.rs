//! Record normalization and CSV export.
//!
//! The raw records accumulated by the pagination engine pass through the
//! [`extract_review_rows`] normalizer into the fixed four-column tabular
//! shape, then optionally through the CSV exporter for the one-shot file
//! save.

mod csv;
mod normalize;

pub use self::csv::{
    CSV_HEADERS, ExportError, default_export_filename, export_filename, reviews_to_csv,
    write_csv_export,
};
pub use normalize::{
    DEFAULT_REVIEW_TEXT, DEFAULT_TITLE, Recommended, ReviewRow, extract_review_rows,
};
