//! Normalization of raw review records into the flat export shape.
//!
//! Pure and order-preserving: each [`RawReview`] maps to exactly one
//! [`ReviewRow`], with missing fields replaced by fixed defaults. There are
//! no failure modes; default substitution is a data-completion policy, not
//! an error path.

use std::fmt;

use crate::fetch::RawReview;

/// Default title for reviews without one.
pub const DEFAULT_TITLE: &str = "No Title";

/// Default body for reviews without text.
pub const DEFAULT_REVIEW_TEXT: &str = "No Review Text";

/// Whether the reviewer recommends the product.
///
/// Absent upstream values normalize to [`Recommended::No`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommended {
    /// The reviewer recommends the product.
    Yes,
    /// The reviewer does not (or the record carried no answer).
    No,
}

impl fmt::Display for Recommended {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yes => write!(f, "Yes"),
            Self::No => write!(f, "No"),
        }
    }
}

impl From<Option<bool>> for Recommended {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Yes,
            _ => Self::No,
        }
    }
}

/// One review in the flat tabular export shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRow {
    /// Recommendation answer.
    pub recommended: Recommended,
    /// Star rating; `None` renders as "N/A".
    pub rating: Option<u32>,
    /// Review headline (defaulted when missing).
    pub title: String,
    /// Review body (defaulted when missing).
    pub review_text: String,
}

impl ReviewRow {
    /// Rating rendered for display and CSV ("N/A" when absent).
    #[must_use]
    pub fn rating_display(&self) -> String {
        match self.rating {
            Some(rating) => rating.to_string(),
            None => "N/A".to_string(),
        }
    }

    fn from_raw(raw: &RawReview) -> Self {
        Self {
            recommended: Recommended::from(raw.is_recommended),
            // A zero rating is treated the same as an absent one.
            rating: raw.rating.filter(|&rating| rating != 0),
            title: non_empty_or(raw.title.as_deref(), DEFAULT_TITLE),
            review_text: non_empty_or(raw.review_text.as_deref(), DEFAULT_REVIEW_TEXT),
        }
    }
}

fn non_empty_or(value: Option<&str>, default: &str) -> String {
    value
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}

/// Normalizes a sequence of raw records, preserving order.
#[must_use]
pub fn extract_review_rows(reviews: &[RawReview]) -> Vec<ReviewRow> {
    reviews.iter().map(ReviewRow::from_raw).collect()
}
