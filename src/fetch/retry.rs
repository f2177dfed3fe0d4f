//! Retry policy with exponential backoff for transient request failures.
//!
//! A failed attempt is either retryable (HTTP 5xx, transport failure) or
//! terminal (HTTP 4xx). The [`RetryPolicy`] bounds the number of attempts
//! and computes the backoff delay for each retry: the base delay doubles
//! per attempt, plus up to one second of uniform random jitter added on
//! top (not multiplied).

use std::time::Duration;

use rand::Rng;

/// Default maximum retry attempts (beyond the initial attempt).
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Default base delay for exponential backoff (1 second).
const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// Maximum jitter added to delays (1 second, exclusive).
const MAX_JITTER_MS: u64 = 1000;

/// Classification of an HTTP status for retry decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 200-399: treated as success.
    Success,
    /// 400-499: terminal, never retried.
    ClientError,
    /// Everything else (5xx and unexpected codes): retryable.
    ServerError,
}

/// Classifies an HTTP status code for the retry loop.
#[must_use]
pub fn classify_status(status: u16) -> StatusClass {
    match status {
        200..=399 => StatusClass::Success,
        400..=499 => StatusClass::ClientError,
        _ => StatusClass::ServerError,
    }
}

/// Configuration for retry behavior with exponential backoff.
///
/// # Default Values
///
/// - `max_retries`: 3 (so 4 total attempts)
/// - `base_delay`: 1 second
///
/// # Delay Calculation
///
/// ```text
/// delay = base_delay * 2^attempt + jitter
/// ```
///
/// where `attempt` is the 0-indexed attempt that just failed and `jitter`
/// is uniform in `[0ms, 1000ms)`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries allowed beyond the initial attempt.
    max_retries: u32,

    /// Base delay for the first retry.
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Creates a new retry policy with custom settings.
    #[must_use]
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Creates a policy with a custom retry count, using the default base delay.
    #[must_use]
    pub fn with_max_retries(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::default()
        }
    }

    /// Returns the number of retries allowed beyond the initial attempt.
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Returns the total number of attempts this policy permits.
    #[must_use]
    pub fn total_attempts(&self) -> u32 {
        self.max_retries + 1
    }

    /// Calculates the delay before the retry following failed attempt
    /// `attempt` (0-indexed).
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        // Cap the shift so the doubling cannot overflow.
        let multiplier = 1u64 << attempt.min(20);
        let backoff_ms = (self.base_delay.as_millis() as u64).saturating_mul(multiplier);
        Duration::from_millis(backoff_ms) + jitter()
    }
}

/// Generates random jitter in `[0, MAX_JITTER_MS)` milliseconds.
///
/// Jitter prevents synchronized retry storms when multiple clients fail
/// simultaneously and retry at the same time.
fn jitter() -> Duration {
    let mut rng = rand::thread_rng();
    Duration::from_millis(rng.gen_range(0..MAX_JITTER_MS))
}
