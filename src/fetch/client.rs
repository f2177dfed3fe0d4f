//! HTTP client for the reviews API with bounded retries.
//!
//! This module provides the `ReviewsClient` which issues single page
//! requests with exponential backoff on retryable failures. Status codes
//! 200-399 succeed, 4xx fail immediately without retry, and 5xx or
//! transport failures are retried up to the configured bound.

use tokio::time::sleep;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::user_agent;

use super::constants::{
    API_PASSKEY, API_VERSION, CONNECT_TIMEOUT_SECS, CONTENT_LOCALE, DEFAULT_API_URL, INCLUDE,
    LOCALE, READ_TIMEOUT_SECS, SORT_ORDER, STATS,
};
use super::error::FetchError;
use super::progress::{ProgressCallback, ProgressEvent};
use super::retry::{RetryPolicy, StatusClass, classify_status};
use super::types::ReviewsPage;

/// Configuration for the upstream reviews endpoint.
///
/// The defaults target the production Bazaarvoice endpoint with the
/// embedded static passkey; tests override `base_url` to point at a mock
/// server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Reviews endpoint URL.
    pub base_url: String,
    /// Static access token sent with every request.
    pub passkey: String,
    /// Content locale filter (e.g. `en*`).
    pub content_locale: String,
    /// Display locale (e.g. `en_US`).
    pub locale: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            passkey: API_PASSKEY.to_string(),
            content_locale: CONTENT_LOCALE.to_string(),
            locale: LOCALE.to_string(),
        }
    }
}

impl ApiConfig {
    /// Creates a config with a custom endpoint, keeping the other defaults.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// HTTP client for fetching review pages with retry support.
///
/// Designed to be created once per run and reused for every page, taking
/// advantage of connection pooling.
#[derive(Debug, Clone)]
pub struct ReviewsClient {
    http: reqwest::Client,
    config: ApiConfig,
    retry: RetryPolicy,
}

impl ReviewsClient {
    /// Creates a new client for the given endpoint and retry policy.
    ///
    /// Default HTTP configuration:
    /// - Connect timeout: 10 seconds
    /// - Read timeout: 30 seconds
    /// - Gzip decompression: enabled
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client builder fails to build with the static
    /// configuration. This should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new(config: ApiConfig, retry: RetryPolicy) -> Self {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(std::time::Duration::from_secs(READ_TIMEOUT_SECS))
            .gzip(true)
            .user_agent(user_agent::default_user_agent())
            .build()
            .expect("failed to build HTTP client with static configuration");
        Self {
            http,
            config,
            retry,
        }
    }

    /// Returns the configured retry policy.
    #[must_use]
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Fetches one page of reviews for a product.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the endpoint URL is invalid, the request
    /// fails terminally (4xx, exhausted retries), or the body cannot be
    /// decoded as a reviews page.
    #[instrument(skip(self, progress), fields(product_id = %product_id))]
    pub async fn fetch_page(
        &self,
        product_id: &str,
        offset: u64,
        limit: u64,
        progress: Option<&ProgressCallback>,
    ) -> Result<ReviewsPage, FetchError> {
        let url = self.page_url(product_id, offset, limit)?;
        let response = self.get_with_retry(&url, progress).await?;
        response
            .json::<ReviewsPage>()
            .await
            .map_err(|source| FetchError::body(url.as_str(), source))
    }

    /// Builds the request URL for one page.
    fn page_url(&self, product_id: &str, offset: u64, limit: u64) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|_| FetchError::invalid_url(&self.config.base_url))?;
        url.query_pairs_mut()
            .append_pair("Filter", &format!("contentlocale:{}", self.config.content_locale))
            .append_pair("Filter", &format!("ProductId:{product_id}"))
            .append_pair("Sort", SORT_ORDER)
            .append_pair("Limit", &limit.to_string())
            .append_pair("Offset", &offset.to_string())
            .append_pair("Include", INCLUDE)
            .append_pair("Stats", STATS)
            .append_pair("passkey", &self.config.passkey)
            .append_pair("apiversion", API_VERSION)
            .append_pair("Locale", &self.config.locale);
        Ok(url)
    }

    /// Issues a GET request with bounded retries and exponential backoff.
    ///
    /// The optional `progress` callback is notified before each backoff
    /// sleep; it is advisory only.
    ///
    /// # Errors
    ///
    /// Returns the terminal error directly for non-retryable failures, or
    /// [`FetchError::RetriesExhausted`] wrapping the last retryable error
    /// once all attempts are consumed.
    pub async fn get_with_retry(
        &self,
        url: &Url,
        progress: Option<&ProgressCallback>,
    ) -> Result<reqwest::Response, FetchError> {
        let total_attempts = self.retry.total_attempts();
        let mut attempt = 0;

        loop {
            let error = match self.try_get(url).await {
                Ok(response) => return Ok(response),
                Err(error) => error,
            };

            if !error.is_retryable() {
                debug!(url = %url, error = %error, "terminal error, not retrying");
                return Err(error);
            }

            if attempt >= self.retry.max_retries() {
                warn!(url = %url, attempts = total_attempts, "retries exhausted");
                return Err(FetchError::retries_exhausted(total_attempts, error));
            }

            let delay = self.retry.delay_for_attempt(attempt);
            debug!(
                url = %url,
                attempt = attempt + 1,
                total_attempts,
                delay_ms = delay.as_millis() as u64,
                error = %error,
                "request failed, will retry"
            );
            if let Some(callback) = progress {
                callback(&ProgressEvent::Retrying {
                    attempt: attempt + 1,
                    total_attempts,
                    delay,
                });
            }

            sleep(delay).await;
            attempt += 1;
        }
    }

    /// Issues a single GET attempt and classifies the outcome.
    async fn try_get(&self, url: &Url) -> Result<reqwest::Response, FetchError> {
        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::timeout(url.as_str())
            } else {
                FetchError::network(url.as_str(), e)
            }
        })?;

        let status = response.status();
        match classify_status(status.as_u16()) {
            StatusClass::Success => Ok(response),
            StatusClass::ClientError => Err(FetchError::client_status(
                url.as_str(),
                status.as_u16(),
                status.canonical_reason().unwrap_or(""),
            )),
            StatusClass::ServerError => Err(FetchError::server_status(
                url.as_str(),
                status.as_u16(),
                status.canonical_reason().unwrap_or(""),
            )),
        }
    }
}
