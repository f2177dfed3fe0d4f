//! Product input parsing: URL validation and identifier extraction.
//!
//! This module turns a pasted product page URL into the product identifier
//! the reviews API filters on. Validation (scheme, host, length) happens
//! first; extraction is delegated to a [`PidStrategy`].
//!
//! # Example
//!
//! ```
//! use review_export::parser::{PidStrategy, product_id_from_url};
//!
//! let pid = product_id_from_url(
//!     "https://www.sephora.com/product/mini-set-P481234?skuId=268",
//!     PidStrategy::PSuffix,
//! )
//! .unwrap();
//! assert_eq!(pid, "P481234");
//! ```

mod error;
mod product_id;

pub use error::{MAX_URL_LENGTH, ParseError};
pub use product_id::{PidStrategy, extract_product_id};

use tracing::debug;
use url::Url;

/// Validates a product page URL and extracts the product identifier.
///
/// # Validation rules
/// - Input must be non-empty after trimming
/// - Must not exceed [`MAX_URL_LENGTH`] (2000 chars)
/// - Must be parseable by the `url` crate
/// - Must use http or https scheme (no ftp, file, etc.)
/// - Must have a host (domain or IP)
///
/// # Errors
///
/// Returns [`ParseError`] when validation fails or the strategy finds no
/// identifier in the URL.
#[tracing::instrument(skip(url), fields(url_len = url.len()))]
pub fn product_id_from_url(url: &str, strategy: PidStrategy) -> Result<String, ParseError> {
    let trimmed = url.trim();

    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    if trimmed.len() > MAX_URL_LENGTH {
        return Err(ParseError::too_long(trimmed));
    }

    let parsed = Url::parse(trimmed).map_err(|e| ParseError::malformed(trimmed, &e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(ParseError::unsupported_scheme(trimmed, scheme)),
    }

    if parsed.host().is_none() {
        return Err(ParseError::no_host(trimmed));
    }

    debug!(url = %trimmed, "product URL validated");
    extract_product_id(trimmed, strategy)
}
