//! Wire types for the reviews API.

use serde::Deserialize;

/// One raw review record as returned by the upstream API.
///
/// Only the fields the export consumes are modeled; everything else in the
/// upstream object is ignored. All fields may be absent or null.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawReview {
    /// Whether the reviewer recommends the product.
    #[serde(rename = "IsRecommended")]
    pub is_recommended: Option<bool>,

    /// Star rating, typically 1-5.
    #[serde(rename = "Rating")]
    pub rating: Option<u32>,

    /// Review headline.
    #[serde(rename = "Title")]
    pub title: Option<String>,

    /// Review body text.
    #[serde(rename = "ReviewText")]
    pub review_text: Option<String>,
}

/// One page of the paginated reviews response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewsPage {
    /// Review records for this page. Absent lists decode as empty.
    #[serde(rename = "Results", default)]
    pub results: Vec<RawReview>,

    /// Server-reported total across all pages, when present.
    #[serde(rename = "TotalResults")]
    pub total_results: Option<u64>,
}

impl ReviewsPage {
    /// True when this page carries no records (empty or absent list).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
