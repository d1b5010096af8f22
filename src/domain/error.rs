//! Error types for the imagefinder crate.
//!
//! This module defines the centralized error type [`ImageFinderError`] and a type
//! alias [`Result`] for convenient error handling throughout the crate. All errors
//! are implemented using the `thiserror` crate for automatic `Error` trait
//! implementation.

use thiserror::Error;

/// The main error type for imagefinder operations.
///
/// The two fetch failures (`Network`, `MalformedResponse`) are what a
/// [`SearchClient`](crate::client::SearchClient) reports. The controller maps
/// both to the same `Error` status, so the distinction only shows up in logs.
///
/// # Examples
///
/// ```
/// use imagefinder::ImageFinderError;
///
/// fn validate_key(key: &str) -> Result<(), ImageFinderError> {
///     if key.is_empty() {
///         return Err(ImageFinderError::Config("api_key must not be empty".to_string()));
///     }
///     Ok(())
/// }
///
/// assert!(validate_key("").is_err());
/// ```
#[derive(Debug, Error)]
pub enum ImageFinderError {
    /// Transport failure or a non-success HTTP status from the search service.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be parsed into the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A query could not be constructed (empty text or page 0).
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when required configuration values are missing or malformed.
    /// The string describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The controller task has stopped and no longer accepts commands.
    #[error("Controller closed")]
    ControllerClosed,
}

impl From<reqwest::Error> for ImageFinderError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ImageFinderError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedResponse(err.to_string())
    }
}

/// A specialized `Result` type for imagefinder operations.
pub type Result<T> = std::result::Result<T, ImageFinderError>;
