//! Presentation-side helpers.
//!
//! Rendering itself belongs to the host application. This module provides the
//! state a gallery front-end keeps for itself and the data it renders from:
//!
//! ```text
//! SessionSnapshot ─┐
//!                  ├─▶ GalleryViewModel::compute ─▶ host renderer
//! ImageViewer ─────┘
//! ```
//!
//! # Modules
//!
//! - [`viewer`]: Full-size image overlay state (open/close)
//! - [`viewmodel`]: Display-ready data derived from a snapshot

pub mod viewer;
pub mod viewmodel;

pub use viewer::ImageViewer;
pub use viewmodel::{GalleryViewModel, GridItem, StatusMessage};
