//! Review fetching: HTTP retry client and offset-pagination engine.
//!
//! This module provides the resilient half of the export pipeline:
//!
//! - [`ReviewsClient`] issues single page requests with bounded retries and
//!   exponential backoff plus jitter, distinguishing retryable server and
//!   network errors from terminal client errors
//! - [`ExportEngine`] walks the offset-paginated reviews API until the
//!   provider signals exhaustion, accumulating raw records
//!
//! # Example
//!
//! ```no_run
//! use review_export::fetch::{ApiConfig, ExportEngine, RetryPolicy, ReviewsClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ReviewsClient::new(ApiConfig::default(), RetryPolicy::default());
//! let engine = ExportEngine::new(client);
//! let batch = engine.run("P481234", None).await?;
//! println!("collected {} reviews", batch.reviews.len());
//! # Ok(())
//! # }
//! ```

mod client;
mod constants;
mod engine;
mod error;
mod progress;
mod retry;
mod types;

pub use client::{ApiConfig, ReviewsClient};
pub use constants::{DEFAULT_API_URL, PAGE_DELAY, PAGE_SIZE};
pub use engine::{ExportAborted, ExportEngine, PaginationState, ReviewBatch};
pub use error::FetchError;
pub use progress::{ProgressCallback, ProgressEvent};
pub use retry::{DEFAULT_MAX_RETRIES, RetryPolicy, StatusClass, classify_status};
pub use types::{RawReview, ReviewsPage};
