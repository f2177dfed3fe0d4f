//! Product identifier extraction from product page URLs.
//!
//! The upstream catalog embeds the product identifier (PID) in the page
//! URL. Two extraction strategies exist in the wild: the last dash-delimited
//! segment of the path, and an explicit `-P<digits>` suffix. Both are
//! exposed behind [`PidStrategy`] so callers pick one instead of duplicating
//! the fetch pipeline per URL shape.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::error::ParseError;

/// Regex pattern for `-P<digits>` product suffixes, e.g.
/// `.../fragrance-sampler-P481234`. Anchored to a separator or end of input
/// so embedded `-P...` fragments inside longer tokens don't match.
#[allow(clippy::expect_used)]
static P_SUFFIX_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"-(P\d+)(?:[/?#]|$)").expect("PID suffix regex is valid") // Static pattern, safe to panic
});

/// Strategy for extracting a product identifier from a page URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PidStrategy {
    /// Match a `-P<digits>` suffix; fall back to scanning dash/slash
    /// delimited tokens for a `P<digits>` token.
    #[default]
    PSuffix,

    /// Take the last dash-delimited segment of the URL (query string
    /// stripped first). Accepts whatever that segment contains.
    TrailingSegment,
}

/// Extracts a product identifier from an already-validated URL string.
///
/// The extraction operates on the raw URL text with the query string
/// stripped, matching what the original page variants did.
///
/// # Errors
///
/// Returns [`ParseError::PidNotFound`] when the chosen strategy cannot
/// locate an identifier.
pub fn extract_product_id(url: &str, strategy: PidStrategy) -> Result<String, ParseError> {
    let before_query = url.split('?').next().unwrap_or(url);
    trace!(url = %before_query, ?strategy, "extracting product identifier");

    let pid = match strategy {
        PidStrategy::PSuffix => extract_p_suffix(before_query),
        PidStrategy::TrailingSegment => extract_trailing_segment(before_query),
    };

    match pid {
        Some(pid) => {
            debug!(pid = %pid, "product identifier extracted");
            Ok(pid)
        }
        None => Err(ParseError::pid_not_found(url)),
    }
}

/// Last dash-delimited segment of the input.
fn extract_trailing_segment(input: &str) -> Option<String> {
    input
        .rsplit('-')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// `-P<digits>` suffix match, with a fallback scan over dash/slash tokens.
fn extract_p_suffix(input: &str) -> Option<String> {
    if let Some(cap) = P_SUFFIX_PATTERN.captures(input) {
        return Some(cap[1].to_string());
    }

    // Fallback: some URL shapes carry the PID as its own path segment
    // rather than a dash suffix (e.g. `/product/P481234`).
    input
        .rsplit(['-', '/'])
        .find(|token| is_pid_token(token))
        .map(str::to_string)
}

/// True for tokens of the form `P<digits>`.
fn is_pid_token(token: &str) -> bool {
    token.len() > 1
        && token.starts_with('P')
        && token[1..].chars().all(|c| c.is_ascii_digit())
}
