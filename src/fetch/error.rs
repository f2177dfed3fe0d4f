//! Error types for the fetch module.
//!
//! This module defines structured errors for requests against the reviews
//! API, providing context-rich error messages for debugging and user
//! feedback. Retryability is a property of the error kind: server statuses
//! and transport failures are retryable, client statuses and malformed
//! bodies are terminal.

use thiserror::Error;

/// Errors that can occur while fetching review pages.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error requesting {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request timed out before completion.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// HTTP 4xx response. Never retried.
    #[error("client error: HTTP {status} {status_text} for {url}")]
    ClientStatus {
        /// The URL that returned the error status.
        url: String,
        /// The HTTP status code (400-499).
        status: u16,
        /// Canonical reason phrase for the status.
        status_text: String,
    },

    /// HTTP 5xx (or otherwise unexpected) response. Retryable.
    #[error("server error: HTTP {status} {status_text} for {url}")]
    ServerStatus {
        /// The URL that returned the error status.
        url: String,
        /// The HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        status_text: String,
    },

    /// Response body could not be decoded as a reviews page.
    #[error("unexpected response body from {url}: {source}")]
    Body {
        /// The URL whose body failed to decode.
        url: String,
        /// The underlying decode error.
        #[source]
        source: reqwest::Error,
    },

    /// The configured endpoint URL is malformed.
    #[error("invalid API URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// All retry attempts were consumed; wraps the last retryable error.
    #[error("retries exhausted after {attempts} attempt(s): {source}")]
    RetriesExhausted {
        /// Total attempts issued (initial attempt included).
        attempts: u32,
        /// The last error encountered.
        #[source]
        source: Box<FetchError>,
    },
}

impl FetchError {
    /// Creates a network error from a reqwest error.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates a client-status error (4xx).
    pub fn client_status(url: impl Into<String>, status: u16, status_text: &str) -> Self {
        Self::ClientStatus {
            url: url.into(),
            status,
            status_text: status_text.to_string(),
        }
    }

    /// Creates a server-status error (5xx or otherwise unexpected).
    pub fn server_status(url: impl Into<String>, status: u16, status_text: &str) -> Self {
        Self::ServerStatus {
            url: url.into(),
            status,
            status_text: status_text.to_string(),
        }
    }

    /// Creates a body-decode error.
    pub fn body(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Body {
            url: url.into(),
            source,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Wraps the last retryable error once attempts are exhausted.
    #[must_use]
    pub fn retries_exhausted(attempts: u32, source: FetchError) -> Self {
        Self::RetriesExhausted {
            attempts,
            source: Box::new(source),
        }
    }

    /// Whether another attempt could plausibly succeed.
    ///
    /// Server statuses and transport failures are retryable; client
    /// statuses, decode failures, and configuration errors are not.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Timeout { .. } | Self::ServerStatus { .. }
        )
    }
}

// Note on From trait implementations:
// We intentionally do NOT implement `From<reqwest::Error>` because the
// variants require context (url) that the source error doesn't reliably
// provide. The helper constructors are the pattern used instead.
