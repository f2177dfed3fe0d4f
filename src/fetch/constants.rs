//! Constants for the fetch module (upstream endpoint, pagination, timeouts).

use std::time::Duration;

/// Default reviews API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.bazaarvoice.com/data/reviews.json";

/// Static client access token the upstream API expects on every request.
pub const API_PASSKEY: &str = "calXm2DyQVjcCy9agq85vmTJv5ELuuBCF2sdg4BnJzJus";

/// Upstream API version pin.
pub const API_VERSION: &str = "5.4";

/// Content locale filter applied to review content.
pub const CONTENT_LOCALE: &str = "en*";

/// Display locale requested from the API.
pub const LOCALE: &str = "en_US";

/// Sort order for review pages (newest first).
pub const SORT_ORDER: &str = "SubmissionTime:desc";

/// Sub-resources included with each page.
pub const INCLUDE: &str = "Products,Comments";

/// Statistics block requested with each page.
pub const STATS: &str = "Reviews";

/// Fixed page size for review pagination.
pub const PAGE_SIZE: u64 = 100;

/// Unconditional delay inserted between page fetches to reduce request
/// pressure on the upstream service. Not an adaptive rate limiter.
pub const PAGE_DELAY: Duration = Duration::from_millis(100);

/// Default HTTP connect timeout (10 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default HTTP read timeout (30 seconds).
pub const READ_TIMEOUT_SECS: u64 = 30;
