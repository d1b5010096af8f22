//! View model derived from a session snapshot.
//!
//! This module turns a [`SessionSnapshot`] plus the [`ImageViewer`] state into
//! the display-ready data a presentation layer needs: which placeholder text to
//! show, which images go in the grid, and whether the "load more" button and
//! loading indicator are visible. It contains no business logic.
//!
//! # Example
//!
//! ```rust
//! use imagefinder::app::SessionSnapshot;
//! use imagefinder::ui::{GalleryViewModel, ImageViewer};
//!
//! let vm = GalleryViewModel::compute(&SessionSnapshot::default(), &ImageViewer::new());
//! assert!(vm.message.is_some());
//! assert!(vm.grid.is_empty());
//! assert!(!vm.show_load_more);
//! ```

use super::viewer::ImageViewer;
use crate::app::{SessionSnapshot, Status};

/// Placeholder shown before any search.
pub const IDLE_MESSAGE: &str = "Please, write query in search field and hit Enter";

/// Placeholder shown when the query matched nothing.
pub const NOT_FOUND_MESSAGE: &str = "Sorry, we didn't find any pictures for your query";

/// Placeholder shown after a failed fetch.
pub const ERROR_MESSAGE: &str = "Sorry, something went wrong. Please try again.";

/// Complete view model for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryViewModel {
    /// Placeholder text in place of the grid, if any.
    pub message: Option<StatusMessage>,

    /// Images to lay out, in display order.
    pub grid: Vec<GridItem>,

    /// Whether to show a loading indicator below the grid.
    pub loading: bool,

    /// Whether to offer the "load more" affordance.
    pub show_load_more: bool,

    /// Header summary, e.g. `"24 of 500"`. `None` while idle.
    pub summary: Option<String>,

    /// Full-size URL to show in the overlay, if open.
    pub overlay: Option<String>,
}

/// Placeholder text with its severity for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: &'static str,
    pub is_error: bool,
}

/// One cell of the image grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridItem {
    pub id: String,
    pub preview_url: String,
    /// Passed to [`ImageViewer::open`] when the cell is activated.
    pub full_url: String,
}

impl GalleryViewModel {
    /// Computes the view model for `snapshot` and `viewer`.
    ///
    /// The grid is shown while pending or resolved, so results already loaded
    /// stay visible while the next page is fetched.
    #[must_use]
    pub fn compute(snapshot: &SessionSnapshot, viewer: &ImageViewer) -> Self {
        let message = match snapshot.status {
            Status::Idle => Some(StatusMessage {
                text: IDLE_MESSAGE,
                is_error: false,
            }),
            Status::NotFound => Some(StatusMessage {
                text: NOT_FOUND_MESSAGE,
                is_error: false,
            }),
            Status::Error => Some(StatusMessage {
                text: ERROR_MESSAGE,
                is_error: true,
            }),
            Status::Pending | Status::Resolved => None,
        };

        let grid = if message.is_none() {
            snapshot
                .accumulated
                .iter()
                .map(|image| GridItem {
                    id: image.id.clone(),
                    preview_url: image.preview_url.clone(),
                    full_url: image.full_url.clone(),
                })
                .collect()
        } else {
            vec![]
        };

        let summary = match snapshot.status {
            Status::Idle => None,
            Status::Pending if snapshot.total == 0 => Some(format!("Searching \"{}\"", snapshot.query)),
            _ => Some(format!("{} of {}", snapshot.accumulated.len(), snapshot.total)),
        };

        Self {
            message,
            grid,
            loading: snapshot.status.is_pending(),
            show_load_more: snapshot.can_load_more(),
            summary,
            overlay: viewer.selected_url().map(str::to_string),
        }
    }
}
