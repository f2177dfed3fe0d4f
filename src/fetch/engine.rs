//! Offset-pagination engine for review collection.
//!
//! The engine repeatedly invokes the retry client with increasing offsets,
//! accumulating raw records until the provider signals exhaustion: either a
//! page with zero results, or the accumulated count reaching the
//! server-reported total. A fixed delay is inserted between pages to reduce
//! request pressure on the upstream service.
//!
//! The engine is stateless between invocations; all run state lives in the
//! returned [`ReviewBatch`] (or on the [`ExportAborted`] error).

use std::time::Duration;

use thiserror::Error;
use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use super::client::ReviewsClient;
use super::constants::{PAGE_DELAY, PAGE_SIZE};
use super::error::FetchError;
use super::progress::{ProgressCallback, ProgressEvent};
use super::types::RawReview;

/// Pagination counters for one export run.
///
/// Mutated once per successful page fetch; `pages_fetched` and
/// `current_offset` are monotonically non-decreasing. `total_results` holds
/// the most recent truthy value the server reported (see the module docs on
/// overwrite semantics).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationState {
    /// Most recent truthy server-reported total (0 until reported).
    pub total_results: u64,
    /// Offset of the page most recently requested.
    pub current_offset: u64,
    /// Page size in effect for the run.
    pub current_limit: u64,
    /// Number of non-empty pages fetched so far.
    pub pages_fetched: u32,
}

impl PaginationState {
    fn new(limit: u64) -> Self {
        Self {
            total_results: 0,
            current_offset: 0,
            current_limit: limit,
            pages_fetched: 0,
        }
    }
}

/// Raw result of a completed pagination run.
#[derive(Debug, Clone)]
pub struct ReviewBatch {
    /// Accumulated raw records, in upstream order.
    pub reviews: Vec<RawReview>,
    /// Final pagination counters.
    pub state: PaginationState,
}

/// A pagination run that failed partway through.
///
/// Records accumulated before the failing page are retained as a
/// best-effort byproduct, but the run is considered failed.
#[derive(Debug, Error)]
#[error("review export aborted after {pages_fetched} page(s): {source}")]
pub struct ExportAborted {
    /// Non-empty pages fetched before the failure.
    pub pages_fetched: u32,
    /// Records accumulated before the failure.
    pub partial: Vec<RawReview>,
    /// The fetch error that aborted the run.
    #[source]
    pub source: FetchError,
}

/// Pagination engine for collecting all reviews of one product.
///
/// Runs a single sequential fetch loop; there is no parallel fetching and
/// no cancellation mid-run. Overlapping runs are the caller's concern.
#[derive(Debug, Clone)]
pub struct ExportEngine {
    client: ReviewsClient,
    page_size: u64,
    page_delay: Duration,
}

impl ExportEngine {
    /// Creates an engine with the standard page size (100) and inter-page
    /// delay (100 ms).
    #[must_use]
    pub fn new(client: ReviewsClient) -> Self {
        Self {
            client,
            page_size: PAGE_SIZE,
            page_delay: PAGE_DELAY,
        }
    }

    /// Overrides the pagination parameters. Intended for tests; the page
    /// size is clamped to at least 1 so the offset always advances.
    #[must_use]
    pub fn with_pagination(mut self, page_size: u64, page_delay: Duration) -> Self {
        self.page_size = page_size.max(1);
        self.page_delay = page_delay;
        self
    }

    /// Returns the page size in effect.
    #[must_use]
    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Collects all reviews for one product identifier.
    ///
    /// Fetches pages starting at offset 0, advancing by the page size after
    /// each non-empty page, until a page comes back empty or the
    /// accumulated count reaches the most recent server-reported total.
    /// The server-reported total is overwritten by each page that carries a
    /// truthy value; a provider that never reports one yields exactly one
    /// fetched page.
    ///
    /// # Errors
    ///
    /// Returns [`ExportAborted`] when a page fetch fails terminally,
    /// carrying whatever was accumulated before the failure.
    #[instrument(skip(self, progress), fields(product_id = %product_id))]
    pub async fn run(
        &self,
        product_id: &str,
        progress: Option<&ProgressCallback>,
    ) -> Result<ReviewBatch, ExportAborted> {
        let mut reviews: Vec<RawReview> = Vec::new();
        let mut state = PaginationState::new(self.page_size);

        info!(product_id = %product_id, "starting review collection");

        loop {
            let page = match self
                .client
                .fetch_page(product_id, state.current_offset, state.current_limit, progress)
                .await
            {
                Ok(page) => page,
                Err(source) => {
                    warn!(
                        product_id = %product_id,
                        pages_fetched = state.pages_fetched,
                        collected = reviews.len(),
                        error = %source,
                        "aborting review collection"
                    );
                    return Err(ExportAborted {
                        pages_fetched: state.pages_fetched,
                        partial: reviews,
                        source,
                    });
                }
            };

            if page.is_empty() {
                debug!(offset = state.current_offset, "empty page, collection complete");
                break;
            }

            if let Some(total) = page.total_results.filter(|&total| total > 0) {
                state.total_results = total;
            }
            reviews.extend(page.results);
            state.pages_fetched += 1;

            debug!(
                page = state.pages_fetched,
                collected = reviews.len(),
                total = state.total_results,
                "page accumulated"
            );
            if let Some(callback) = progress {
                callback(&ProgressEvent::PageFetched {
                    state,
                    collected: reviews.len(),
                });
            }

            if reviews.len() as u64 >= state.total_results {
                break;
            }

            state.current_offset += state.current_limit;
            sleep(self.page_delay).await;
        }

        info!(
            product_id = %product_id,
            reviews = reviews.len(),
            pages = state.pages_fetched,
            total = state.total_results,
            "review collection complete"
        );

        Ok(ReviewBatch { reviews, state })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::fetch::client::ApiConfig;
    use crate::fetch::retry::RetryPolicy;

    use super::*;

    fn test_engine(server_uri: &str) -> ExportEngine {
        let config = ApiConfig::with_base_url(format!("{server_uri}/reviews.json"));
        let client = ReviewsClient::new(config, RetryPolicy::new(1, Duration::from_millis(5)));
        ExportEngine::new(client).with_pagination(100, Duration::from_millis(1))
    }

    /// Mounts one page response for a given offset.
    async fn mount_page(server: &MockServer, offset: u64, results: usize, total: Option<u64>) {
        let records: Vec<_> = (0..results).map(|_| json!({})).collect();
        let mut body = json!({ "Results": records });
        if let Some(total) = total {
            body["TotalResults"] = json!(total);
        }
        Mock::given(method("GET"))
            .and(path("/reviews.json"))
            .and(query_param("Offset", offset.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_collects_all_pages_until_total_reached() {
        let server = MockServer::start().await;
        mount_page(&server, 0, 100, Some(250)).await;
        mount_page(&server, 100, 100, Some(250)).await;
        mount_page(&server, 200, 50, Some(250)).await;

        let batch = test_engine(&server.uri()).run("P1", None).await.unwrap();

        assert_eq!(batch.reviews.len(), 250);
        assert_eq!(batch.state.pages_fetched, 3);
        assert_eq!(batch.state.total_results, 250);
        assert_eq!(batch.state.current_offset, 200);
        assert_eq!(batch.state.current_limit, 100);
    }

    #[tokio::test]
    async fn test_stops_on_empty_page_before_total_reached() {
        // Provider claims 5 results but only delivers 3 across two pages,
        // then an empty page. The run must finish with 3, not hang for 5.
        let server = MockServer::start().await;
        mount_page(&server, 0, 2, Some(5)).await;
        mount_page(&server, 100, 1, Some(5)).await;
        mount_page(&server, 200, 0, Some(5)).await;

        let batch = test_engine(&server.uri()).run("P1", None).await.unwrap();

        assert_eq!(batch.reviews.len(), 3);
        assert_eq!(batch.state.pages_fetched, 2);
        assert_eq!(batch.state.total_results, 5);
    }

    #[tokio::test]
    async fn test_empty_first_page_yields_empty_batch() {
        let server = MockServer::start().await;
        mount_page(&server, 0, 0, Some(0)).await;

        let batch = test_engine(&server.uri()).run("P1", None).await.unwrap();

        assert!(batch.reviews.is_empty());
        assert_eq!(batch.state.pages_fetched, 0);
        assert_eq!(batch.state.total_results, 0);
    }

    #[tokio::test]
    async fn test_total_overwritten_by_most_recent_truthy_value() {
        // Page 1 reports 300, page 2 revises down to 150: the revised total
        // wins and the run stops at 150 accumulated.
        let server = MockServer::start().await;
        mount_page(&server, 0, 100, Some(300)).await;
        mount_page(&server, 100, 50, Some(150)).await;

        let batch = test_engine(&server.uri()).run("P1", None).await.unwrap();

        assert_eq!(batch.reviews.len(), 150);
        assert_eq!(batch.state.total_results, 150);
        assert_eq!(batch.state.pages_fetched, 2);
    }

    #[tokio::test]
    async fn test_absent_total_preserves_previous_value() {
        // A page without TotalResults must not clobber the latched total.
        let server = MockServer::start().await;
        mount_page(&server, 0, 100, Some(150)).await;
        mount_page(&server, 100, 50, None).await;

        let batch = test_engine(&server.uri()).run("P1", None).await.unwrap();

        assert_eq!(batch.reviews.len(), 150);
        assert_eq!(batch.state.total_results, 150);
    }

    #[tokio::test]
    async fn test_never_reported_total_stops_after_first_page() {
        let server = MockServer::start().await;
        mount_page(&server, 0, 10, None).await;

        let batch = test_engine(&server.uri()).run("P1", None).await.unwrap();

        assert_eq!(batch.reviews.len(), 10);
        assert_eq!(batch.state.pages_fetched, 1);
        assert_eq!(batch.state.total_results, 0);
    }

    #[tokio::test]
    async fn test_client_error_aborts_with_partial_results() {
        let server = MockServer::start().await;
        mount_page(&server, 0, 100, Some(200)).await;
        Mock::given(method("GET"))
            .and(path("/reviews.json"))
            .and(query_param("Offset", "100"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let result = test_engine(&server.uri()).run("P1", None).await;

        match result {
            Err(aborted) => {
                assert_eq!(aborted.pages_fetched, 1);
                assert_eq!(aborted.partial.len(), 100);
                assert!(matches!(
                    aborted.source,
                    FetchError::ClientStatus { status: 404, .. }
                ));
            }
            Ok(batch) => panic!("Expected abort, got batch of {}", batch.reviews.len()),
        }
    }

    #[tokio::test]
    async fn test_progress_reports_each_page() {
        let server = MockServer::start().await;
        mount_page(&server, 0, 100, Some(150)).await;
        mount_page(&server, 100, 50, Some(150)).await;

        let seen: Arc<Mutex<Vec<(u32, usize)>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_cb = Arc::clone(&seen);
        let on_event = move |event: &ProgressEvent| {
            if let ProgressEvent::PageFetched { state, collected } = event {
                seen_cb.lock().unwrap().push((state.pages_fetched, *collected));
            }
        };

        test_engine(&server.uri())
            .run("P1", Some(&on_event))
            .await
            .unwrap();

        let seen = seen.lock().unwrap().clone();
        assert_eq!(seen, vec![(1, 100), (2, 150)]);
    }
}
