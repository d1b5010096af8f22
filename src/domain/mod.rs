//! Domain layer for the imagefinder crate.
//!
//! This module contains the value types shared by the search client and the
//! query controller, independent of HTTP or async runtime concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`image`]: Search query, image result and result page values
//!
//! # Examples
//!
//! ```
//! use imagefinder::domain::{ImageResult, ResultPage, Result};
//!
//! fn single_hit() -> Result<ResultPage> {
//!     Ok(ResultPage::new(
//!         vec![ImageResult::new("1", "https://cdn/1_640.jpg", "https://cdn/1_1280.jpg")],
//!         1,
//!     ))
//! }
//! ```

pub mod error;
pub mod image;

pub use error::{ImageFinderError, Result};
pub use image::{ImageResult, ResultPage, SearchQuery};
