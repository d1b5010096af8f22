//! Remote image search client.
//!
//! This module defines the [`SearchClient`] seam used by the query controller and
//! the HTTP implementation that talks to a Pixabay-compatible endpoint.
//!
//! # Architecture
//!
//! - [`SearchClient`]: one method, one request, one normalized page
//! - [`ClientConfig`]: credential and fixed request parameters
//! - [`HttpSearchClient`]: `reqwest`-backed implementation
//! - `payload`: response body parsing
//!
//! The client performs no caching and no retry. A failed fetch is reported
//! once and the controller decides what to do with it.
//!
//! # Example
//!
//! ```no_run
//! use imagefinder::client::{ClientConfig, HttpSearchClient, SearchClient};
//! use imagefinder::SearchQuery;
//!
//! # async fn demo() -> imagefinder::Result<()> {
//! let client = HttpSearchClient::new(ClientConfig::new("my-api-key"))?;
//! let page = client.fetch_page(&SearchQuery::new("mountains", 1)?).await?;
//! println!("{} of {} matches", page.items.len(), page.total_matches);
//! # Ok(())
//! # }
//! ```

mod http;
pub mod payload;

pub use http::HttpSearchClient;

use crate::domain::{ResultPage, Result, SearchQuery};
use futures_util::future::BoxFuture;
use std::time::Duration;

/// Default search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://pixabay.com/api/";

/// Default number of hits per page.
pub const DEFAULT_PER_PAGE: u32 = 12;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Fetches one page of search results.
///
/// Implementations must be shareable across tasks: the controller holds the
/// client behind an `Arc` and runs each fetch on a spawned task.
pub trait SearchClient: Send + Sync {
    /// Issues a single request for `query` and normalizes the response.
    ///
    /// # Errors
    ///
    /// - [`ImageFinderError::Network`](crate::ImageFinderError::Network) on
    ///   transport failure or a non-200 status
    /// - [`ImageFinderError::MalformedResponse`](crate::ImageFinderError::MalformedResponse)
    ///   when the body does not have the expected shape
    fn fetch_page<'a>(&'a self, query: &'a SearchQuery) -> BoxFuture<'a, Result<ResultPage>>;
}

/// Static parameters for the search client.
///
/// Everything here is fixed at construction. Only the query text and page
/// vary between requests.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Service credential sent as the `key` parameter.
    pub api_key: String,

    /// Endpoint URL. Default: [`DEFAULT_BASE_URL`]
    pub base_url: String,

    /// Hits per page. Default: [`DEFAULT_PER_PAGE`]
    pub per_page: u32,

    /// Content filter. Default: `"photo"`
    pub image_type: String,

    /// Default: `"horizontal"`
    pub orientation: String,

    /// Default: `true`
    pub safe_search: bool,

    /// Per-request timeout covering connect, send and body read.
    pub timeout: Duration,

    /// `User-Agent` header value.
    pub user_agent: String,
}

impl ClientConfig {
    /// Creates a configuration with the given credential and default parameters.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            image_type: "photo".to_string(),
            orientation: "horizontal".to_string(),
            safe_search: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: format!("imagefinder/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Builds the query string parameters for one request.
    ///
    /// # Example
    ///
    /// ```
    /// use imagefinder::client::ClientConfig;
    /// use imagefinder::SearchQuery;
    ///
    /// let params = ClientConfig::new("k").query_params(&SearchQuery::new("cats", 2)?);
    /// assert!(params.contains(&("q", "cats".to_string())));
    /// assert!(params.contains(&("page", "2".to_string())));
    /// # Ok::<(), imagefinder::ImageFinderError>(())
    /// ```
    #[must_use]
    pub fn query_params(&self, query: &SearchQuery) -> Vec<(&'static str, String)> {
        vec![
            ("key", self.api_key.clone()),
            ("q", query.text().to_string()),
            ("page", query.page().to_string()),
            ("per_page", self.per_page.to_string()),
            ("image_type", self.image_type.clone()),
            ("orientation", self.orientation.clone()),
            ("safesearch", self.safe_search.to_string()),
        ]
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("per_page", &self.per_page)
            .field("image_type", &self.image_type)
            .field("orientation", &self.orientation)
            .field("safe_search", &self.safe_search)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
