//! Shared User-Agent string for the reviews API client.
//!
//! Single source for project URL and UA format (good citizenship; RFC 9308).

/// Project URL for User-Agent identification.
const PROJECT_UA_URL: &str = "https://github.com/fiercely/review-export";

/// Default User-Agent for reviews API requests (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("review-export/{version} (review-export-tool; +{PROJECT_UA_URL})")
}
