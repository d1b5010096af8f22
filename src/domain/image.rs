//! Search query and image result value types.
//!
//! These are the values that flow between the search client and the query
//! controller. All of them are immutable once built: a new page request is a
//! new [`SearchQuery`], never an edited one.

use super::error::{ImageFinderError, Result};
use serde::{Deserialize, Serialize};

/// A search request for one page of results.
///
/// The text is trimmed on construction and must not be empty. Pages are
/// 1-based.
///
/// # Examples
///
/// ```
/// use imagefinder::SearchQuery;
///
/// let query = SearchQuery::new("  red fox ", 1)?;
/// assert_eq!(query.text(), "red fox");
/// assert_eq!(query.next_page().page(), 2);
/// # Ok::<(), imagefinder::ImageFinderError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSearchQuery")]
pub struct SearchQuery {
    text: String,
    page: u32,
}

/// Unvalidated wire form of [`SearchQuery`].
#[derive(Deserialize)]
struct RawSearchQuery {
    text: String,
    page: u32,
}

impl TryFrom<RawSearchQuery> for SearchQuery {
    type Error = ImageFinderError;

    fn try_from(raw: RawSearchQuery) -> Result<Self> {
        Self::new(&raw.text, raw.page)
    }
}

impl SearchQuery {
    /// Builds a query for `page` of `text`.
    ///
    /// # Errors
    ///
    /// Returns [`ImageFinderError::InvalidQuery`] if the trimmed text is empty
    /// or `page` is zero.
    pub fn new(text: &str, page: u32) -> Result<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ImageFinderError::InvalidQuery("query text is empty".to_string()));
        }
        if page == 0 {
            return Err(ImageFinderError::InvalidQuery("pages are numbered from 1".to_string()));
        }
        Ok(Self {
            text: text.to_string(),
            page,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the query for the page after this one.
    #[must_use]
    pub fn next_page(&self) -> Self {
        Self {
            text: self.text.clone(),
            page: self.page.saturating_add(1),
        }
    }
}

/// A single image hit, normalized from the remote payload.
///
/// # Fields
///
/// - `id`: Opaque identifier assigned by the search service
/// - `preview_url`: Grid-sized rendition
/// - `full_url`: Large rendition shown in the viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    pub id: String,
    pub preview_url: String,
    pub full_url: String,
}

impl ImageResult {
    #[must_use]
    pub fn new(id: impl Into<String>, preview_url: impl Into<String>, full_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            preview_url: preview_url.into(),
            full_url: full_url.into(),
        }
    }
}

/// One page of results plus the total number of matches for the query.
///
/// `total_matches` is the same for every page of a given query; the
/// controller only reads it from the first page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultPage {
    pub items: Vec<ImageResult>,
    pub total_matches: u64,
}

impl ResultPage {
    #[must_use]
    pub const fn new(items: Vec<ImageResult>, total_matches: u64) -> Self {
        Self { items, total_matches }
    }

    /// Returns `true` if the service reported no matches at all.
    #[must_use]
    pub const fn is_empty_match(&self) -> bool {
        self.total_matches == 0
    }
}
