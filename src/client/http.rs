//! `reqwest`-backed search client.

use super::{payload, ClientConfig, SearchClient};
use crate::domain::error::{ImageFinderError, Result};
use crate::domain::{ResultPage, SearchQuery};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use reqwest::StatusCode;
use tracing::Instrument;

/// Search client issuing plain HTTP GET requests.
///
/// Holds one `reqwest::Client` so connections are pooled across pages.
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpSearchClient {
    /// Creates a client from static configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ImageFinderError::Config`] if the credential or base URL is
    /// empty, or if the underlying HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(ImageFinderError::Config("api_key must not be empty".to_string()));
        }
        if config.base_url.trim().is_empty() {
            return Err(ImageFinderError::Config("base_url must not be empty".to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ImageFinderError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn fetch(&self, query: &SearchQuery) -> Result<ResultPage> {
        let response = self
            .http
            .get(&self.config.base_url)
            .query(&self.config.query_params(query))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::debug!(status = %status, "search service returned non-success status");
            return Err(ImageFinderError::Network(format!("HTTP status: {status}")));
        }

        let body = response.text().await?;
        let page = payload::parse_page(&body)?;

        tracing::debug!(
            items = page.items.len(),
            total_matches = page.total_matches,
            "search page fetched"
        );

        Ok(page)
    }
}

impl SearchClient for HttpSearchClient {
    fn fetch_page<'a>(&'a self, query: &'a SearchQuery) -> BoxFuture<'a, Result<ResultPage>> {
        let span = tracing::debug_span!("fetch_page", query = %query.text(), page = query.page());
        self.fetch(query).instrument(span).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_key_is_rejected() {
        let result = HttpSearchClient::new(ClientConfig::new("  "));
        assert!(matches!(result, Err(ImageFinderError::Config(_))));
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let mut config = ClientConfig::new("key");
        config.base_url = String::new();
        assert!(matches!(HttpSearchClient::new(config), Err(ImageFinderError::Config(_))));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let mut config = ClientConfig::new("key");
        config.base_url = "http://127.0.0.1:9/api/".to_string();
        config.timeout = std::time::Duration::from_secs(2);
        let client = HttpSearchClient::new(config).unwrap();

        let result = client.fetch_page(&SearchQuery::new("cats", 1).unwrap()).await;

        assert!(matches!(result, Err(ImageFinderError::Network(_))));
    }
}
