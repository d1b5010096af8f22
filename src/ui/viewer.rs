//! Full-size image viewer sub-state.
//!
//! The viewer is owned by the presentation layer. It is independent of the
//! search status: it can be opened while a fetch is pending and stays open
//! across new submissions until closed.

/// Open/closed state of the full-size image overlay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageViewer {
    selected: Option<String>,
}

impl ImageViewer {
    #[must_use]
    pub const fn new() -> Self {
        Self { selected: None }
    }

    /// Opens the viewer on `full_url`.
    ///
    /// An empty URL is ignored and leaves the viewer unchanged. Returns `true`
    /// if the viewer state changed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use imagefinder::ui::ImageViewer;
    ///
    /// let mut viewer = ImageViewer::new();
    /// assert!(viewer.open("https://cdn/1_1280.jpg"));
    /// assert!(viewer.is_open());
    /// assert!(!viewer.open(""));
    /// ```
    pub fn open(&mut self, full_url: &str) -> bool {
        if full_url.is_empty() {
            tracing::trace!("ignoring viewer open without a url");
            return false;
        }
        if self.selected.as_deref() == Some(full_url) {
            return false;
        }
        self.selected = Some(full_url.to_string());
        true
    }

    /// Closes the viewer and clears the selected URL.
    pub fn close(&mut self) -> bool {
        self.selected.take().is_some()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    #[must_use]
    pub fn selected_url(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}
