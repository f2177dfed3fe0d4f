//! Progress reporting for export runs.
//!
//! Events are purely observational: the engine behaves identically whether
//! or not a callback is installed, and the callback cannot influence
//! control flow.

use std::time::Duration;

use super::engine::PaginationState;

/// Callback type for progress notifications.
pub type ProgressCallback = dyn Fn(&ProgressEvent) + Send + Sync;

/// A progress notification emitted during an export run.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A request attempt failed with a retryable error; the client is about
    /// to sleep and retry. Emitted before the backoff sleep.
    Retrying {
        /// The attempt that just failed (1-indexed).
        attempt: u32,
        /// Total attempts the policy permits.
        total_attempts: u32,
        /// How long the client will sleep before the next attempt.
        delay: Duration,
    },

    /// A non-empty page was fetched and accumulated.
    PageFetched {
        /// Pagination counters after this page.
        state: PaginationState,
        /// Total records accumulated so far.
        collected: usize,
    },
}
