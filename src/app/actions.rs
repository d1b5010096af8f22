//! Actions representing side effects to be executed by the controller.
//!
//! This module defines the [`Action`] type, the imperative commands produced by
//! the event handler after a state transition. Actions bridge the pure reducer
//! and the effectful world: network fetches and user-facing notifications.
//!
//! # Architecture
//!
//! The event handler returns a `Vec<Action>` after processing each event,
//! allowing multiple side effects to be queued atomically. The
//! [`QueryController`](crate::controller::QueryController) executes them in
//! order.
//!
//! # Example
//!
//! ```rust
//! use imagefinder::app::{handle_event, Action, Event, SessionState};
//!
//! let mut state = SessionState::new();
//! let (_, actions) = handle_event(&mut state, Event::Submit("cats".to_string()));
//! assert!(matches!(actions.as_slice(), [Action::Fetch { .. }]));
//! ```

use super::state::RequestId;
use crate::domain::SearchQuery;
use crate::notify::Notification;

/// Commands representing side effects to be executed by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetches one page from the search client.
    ///
    /// The outcome must come back as `Event::PageLoaded` or
    /// `Event::FetchFailed` carrying the same `request`.
    Fetch {
        /// Tag used to recognise the outcome as current or stale.
        request: RequestId,
        /// Query text and page to fetch.
        query: SearchQuery,
    },

    /// Hands a message to the notification collaborator.
    Notify(Notification),
}
