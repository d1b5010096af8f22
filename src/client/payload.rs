//! Wire types for the search service response body.
//!
//! The service answers with `{ total, totalHits, hits: [...] }`. Only the fields
//! the gallery uses are modelled; everything else in a hit is ignored.

use crate::domain::error::{ImageFinderError, Result};
use crate::domain::{ImageResult, ResultPage};
use serde::Deserialize;

/// Top-level response body.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    total: u64,

    /// Matches reachable through the API. Pixabay caps this below `total`
    /// for broad queries and rejects page requests beyond it.
    #[serde(rename = "totalHits", default)]
    total_hits: Option<u64>,

    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    id: HitId,
    #[serde(rename = "webformatURL")]
    webformat_url: String,
    #[serde(rename = "largeImageURL")]
    large_image_url: String,
}

/// Hit identifiers are numeric on Pixabay but treated as opaque here.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum HitId {
    Number(u64),
    Text(String),
}

impl HitId {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

impl From<Hit> for ImageResult {
    fn from(hit: Hit) -> Self {
        Self {
            id: hit.id.into_string(),
            preview_url: hit.webformat_url,
            full_url: hit.large_image_url,
        }
    }
}

/// Parses a response body into a normalized [`ResultPage`].
///
/// `total_matches` is `total`, lowered to `totalHits` when the service reports
/// a smaller reachable count.
///
/// # Errors
///
/// Returns [`ImageFinderError::MalformedResponse`] if the body is not JSON or
/// is missing `total`, `hits`, or any of the per-hit fields.
pub fn parse_page(body: &str) -> Result<ResultPage> {
    let response: SearchResponse = serde_json::from_str(body)
        .map_err(|e| ImageFinderError::MalformedResponse(format!("failed to parse search response: {e}")))?;

    let total_matches = response
        .total_hits
        .map_or(response.total, |hits| hits.min(response.total));

    let items = response.hits.into_iter().map(ImageResult::from).collect();

    Ok(ResultPage { items, total_matches })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hits_in_order() {
        let body = r#"{
            "total": 50,
            "hits": [
                {"id": 7, "webformatURL": "https://cdn/7_640.jpg", "largeImageURL": "https://cdn/7_1280.jpg", "likes": 3},
                {"id": 9, "webformatURL": "https://cdn/9_640.jpg", "largeImageURL": "https://cdn/9_1280.jpg"}
            ]
        }"#;

        let page = parse_page(body).unwrap();

        assert_eq!(page.total_matches, 50);
        assert_eq!(
            page.items,
            vec![
                ImageResult::new("7", "https://cdn/7_640.jpg", "https://cdn/7_1280.jpg"),
                ImageResult::new("9", "https://cdn/9_640.jpg", "https://cdn/9_1280.jpg"),
            ]
        );
    }

    #[test]
    fn total_hits_caps_total() {
        let body = r#"{"total": 12000, "totalHits": 500, "hits": []}"#;
        assert_eq!(parse_page(body).unwrap().total_matches, 500);
    }

    #[test]
    fn larger_total_hits_does_not_raise_total() {
        let body = r#"{"total": 40, "totalHits": 500, "hits": []}"#;
        assert_eq!(parse_page(body).unwrap().total_matches, 40);
    }

    #[test]
    fn string_ids_are_accepted() {
        let body = r#"{"total": 1, "hits": [{"id": "abc", "webformatURL": "p", "largeImageURL": "f"}]}"#;
        assert_eq!(parse_page(body).unwrap().items[0].id, "abc");
    }

    #[test]
    fn missing_hits_is_malformed() {
        let result = parse_page(r#"{"total": 3}"#);
        assert!(matches!(result, Err(ImageFinderError::MalformedResponse(_))));
    }

    #[test]
    fn hit_without_large_url_is_malformed() {
        let body = r#"{"total": 1, "hits": [{"id": 1, "webformatURL": "p"}]}"#;
        assert!(matches!(parse_page(body), Err(ImageFinderError::MalformedResponse(_))));
    }

    #[test]
    fn non_json_body_is_malformed() {
        assert!(matches!(
            parse_page("[ERROR 400] \"page\" is out of valid range."),
            Err(ImageFinderError::MalformedResponse(_))
        ));
    }
}
