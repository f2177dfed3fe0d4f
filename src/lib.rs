//! Review Export Core Library
//!
//! This library fetches paginated product reviews from the Bazaarvoice
//! reviews API and exports them as CSV.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`parser`] - Product URL validation and product-identifier extraction
//! - [`fetch`] - HTTP retry client and offset-pagination engine
//! - [`export`] - Record normalization and CSV serialization
//!
//! The high-level entry point is [`run_review_export`], which runs a full
//! pagination pass for one product and returns the normalized result.

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod export;
pub mod fetch;
pub mod parser;

mod user_agent;

// Re-export commonly used types
pub use export::{
    DEFAULT_REVIEW_TEXT, DEFAULT_TITLE, ExportError, Recommended, ReviewRow, extract_review_rows,
    reviews_to_csv, write_csv_export,
};
pub use fetch::{
    ApiConfig, DEFAULT_API_URL, DEFAULT_MAX_RETRIES, ExportAborted, ExportEngine, FetchError,
    PAGE_SIZE, PaginationState, ProgressCallback, ProgressEvent, RawReview, RetryPolicy,
    ReviewBatch, ReviewsClient, ReviewsPage,
};
pub use parser::{ParseError, PidStrategy, product_id_from_url};

/// Result of a completed review export run.
///
/// Carries the normalized reviews together with the pagination bookkeeping
/// the caller typically reports (pages fetched, server-reported total).
#[derive(Debug, Clone)]
pub struct ExportOutcome {
    /// Normalized reviews, in upstream order.
    pub reviews: Vec<ReviewRow>,
    /// Number of non-empty pages fetched.
    pub pages_fetched: u32,
    /// Last truthy total the server reported (0 when never reported).
    pub total_results: u64,
}

/// Runs a full review export for one product identifier.
///
/// Walks the paginated reviews API via `engine`, normalizes the accumulated
/// records, and returns them with the run's pagination counters. The
/// optional `progress` callback receives retry and page-fetched
/// notifications; it is advisory only.
///
/// # Errors
///
/// Returns [`ExportAborted`] when a page fetch fails terminally. Records
/// accumulated before the failure are retained on the error value.
pub async fn run_review_export(
    engine: &ExportEngine,
    product_id: &str,
    progress: Option<&ProgressCallback>,
) -> Result<ExportOutcome, ExportAborted> {
    let batch = engine.run(product_id, progress).await?;
    Ok(ExportOutcome {
        reviews: extract_review_rows(&batch.reviews),
        pages_fetched: batch.state.pages_fetched,
        total_results: batch.state.total_results,
    })
}
