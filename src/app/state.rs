//! Session state for the query/pagination state machine.
//!
//! This module defines [`SessionState`], the single source of truth for the
//! current search: which query is active, how many pages have been fetched,
//! the results accumulated so far, and the current [`Status`].
//!
//! # Ownership
//!
//! Fields are only writable inside the crate. All mutation goes through
//! [`handle_event`](super::handle_event), so every change corresponds to a row
//! of the transition table. Readers get accessors or a [`SessionSnapshot`].
//!
//! # Request Tracking
//!
//! Each fetch is tagged with a [`RequestId`] drawn from a monotonic counter.
//! Only the outcome whose id matches `in_flight` may change state; anything
//! else belongs to a superseded query or page and is dropped.

use super::status::Status;
use crate::domain::ImageResult;

/// Identifier attached to each issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// State owned by the query controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Current query text. Empty means no active search.
    pub(crate) query: String,

    /// Highest page requested for the current query (1-based).
    pub(crate) page: u32,

    /// Results across all fetched pages, in page order.
    pub(crate) accumulated: Vec<ImageResult>,

    /// Total matches reported by the first page. Zero until it resolves.
    pub(crate) total: u64,

    pub(crate) status: Status,

    /// The fetch whose outcome is still awaited, if any.
    pub(crate) in_flight: Option<RequestId>,

    last_request: u64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Creates an idle state with no query.
    ///
    /// # Example
    ///
    /// ```rust
    /// use imagefinder::app::{SessionState, Status};
    ///
    /// let state = SessionState::new();
    /// assert_eq!(state.status(), Status::Idle);
    /// assert_eq!(state.page(), 1);
    /// assert!(state.accumulated().is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self {
            query: String::new(),
            page: 1,
            accumulated: Vec::new(),
            total: 0,
            status: Status::Idle,
            in_flight: None,
            last_request: 0,
        }
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn accumulated(&self) -> &[ImageResult] {
        &self.accumulated
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub const fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Returns `true` if the server reports more matches than are loaded.
    #[must_use]
    pub fn has_more(&self) -> bool {
        (self.accumulated.len() as u64) < self.total
    }

    /// Returns `true` if a `load_more` would issue a fetch right now.
    ///
    /// The presentation layer should only offer a "load more" affordance when
    /// this holds.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.status == Status::Resolved && self.has_more()
    }

    /// Returns a read-only copy for subscribers.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            query: self.query.clone(),
            page: self.page,
            accumulated: self.accumulated.clone(),
            total: self.total,
            status: self.status,
        }
    }

    /// Discards all results of the current query and sets `status`.
    ///
    /// The query text itself is kept.
    pub(crate) fn reset(&mut self, status: Status) {
        self.page = 1;
        self.total = 0;
        self.accumulated.clear();
        self.status = status;
    }

    /// Allocates the next request id and marks it as in flight.
    ///
    /// Any previously in-flight request becomes stale.
    pub(crate) fn issue_request(&mut self) -> RequestId {
        self.last_request += 1;
        let id = RequestId(self.last_request);
        self.in_flight = Some(id);
        id
    }

    /// Clears `in_flight` if `request` is the current one.
    ///
    /// Returns `false` for stale requests, which must not touch state.
    pub(crate) fn settle(&mut self, request: RequestId) -> bool {
        if self.in_flight == Some(request) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// Drops results beyond the reported total.
    pub(crate) fn clamp_to_total(&mut self) {
        let limit = usize::try_from(self.total).unwrap_or(usize::MAX);
        if self.accumulated.len() > limit {
            tracing::debug!(
                accumulated = self.accumulated.len(),
                total = self.total,
                "dropping results beyond reported total"
            );
            self.accumulated.truncate(limit);
        }
    }
}

/// Read-only copy of the observable part of [`SessionState`].
///
/// Published to subscribers after every state-changing transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub query: String,
    pub page: u32,
    pub accumulated: Vec<ImageResult>,
    pub total: u64,
    pub status: Status,
}

impl SessionSnapshot {
    /// Same rule as [`SessionState::can_load_more`].
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.status == Status::Resolved && (self.accumulated.len() as u64) < self.total
    }
}
