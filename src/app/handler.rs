//! Event handling and state transition logic.
//!
//! This module implements the reducer for the query/pagination state machine.
//! It processes user actions and fetch outcomes, mutates [`SessionState`], and
//! returns the side effects to run. It performs no I/O.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the caller (`Submit`, `LoadMore`) or from finished
//!    fetches (`PageLoaded`, `FetchFailed`)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. State mutations occur on `SessionState`
//! 4. Actions are collected and returned for execution
//!
//! # Stale Outcomes
//!
//! Fetch outcomes carry the [`RequestId`] they were issued with. An outcome
//! whose id is not the one in flight belongs to a query or page the user has
//! moved past, and is ignored without touching state.
//!
//! # Example
//!
//! ```rust
//! use imagefinder::app::{handle_event, Event, SessionState, Status};
//!
//! let mut state = SessionState::new();
//! let (changed, actions) = handle_event(&mut state, Event::Submit(String::new()));
//! assert!(changed);
//! assert!(actions.is_empty());
//! assert_eq!(state.status(), Status::Idle);
//! ```

use super::actions::Action;
use super::state::{RequestId, SessionState};
use super::status::Status;
use crate::domain::{ResultPage, SearchQuery};
use crate::notify::Notification;

/// Events triggered by user actions or fetch completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Starts a new search. Blank text clears the search instead.
    Submit(String),

    /// Requests the next page of the current query.
    LoadMore,

    /// A fetch completed successfully.
    PageLoaded {
        request: RequestId,
        page: ResultPage,
    },

    /// A fetch failed.
    ///
    /// The reason is only logged; every failure maps to the same status and
    /// notification.
    FetchFailed {
        request: RequestId,
        reason: String,
    },
}

/// Processes an event, mutates session state, and returns actions to execute.
///
/// # Returns
///
/// A `(changed, actions)` pair. `changed` is `true` when observable state was
/// modified and subscribers should be notified. `actions` may be empty.
///
/// # Tracing
///
/// Each call creates a debug-level span with the event type.
pub fn handle_event(state: &mut SessionState, event: Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = ?EventKind::of(&event)).entered();

    match event {
        Event::Submit(text) => {
            state.query = text.trim().to_string();
            state.in_flight = None;

            let Ok(query) = SearchQuery::new(&state.query, 1) else {
                tracing::debug!("empty query submitted, returning to idle");
                state.reset(Status::Idle);
                return (true, vec![]);
            };

            state.reset(Status::Pending);
            let request = state.issue_request();

            tracing::debug!(query = %query.text(), request_id = %request, "search submitted");

            (true, vec![Action::Fetch { request, query }])
        }
        Event::LoadMore => {
            if !state.can_load_more() {
                tracing::debug!(
                    status = %state.status,
                    accumulated = state.accumulated.len(),
                    total = state.total,
                    "load more ignored"
                );
                return (false, vec![]);
            }

            let Ok(query) = SearchQuery::new(&state.query, state.page).map(|q| q.next_page()) else {
                tracing::debug!("load more without an active query");
                return (false, vec![]);
            };

            state.page = query.page();
            state.status = Status::Pending;
            let request = state.issue_request();

            tracing::debug!(page = state.page, request_id = %request, "loading next page");

            (true, vec![Action::Fetch { request, query }])
        }
        Event::PageLoaded { request, page } => {
            if !state.settle(request) {
                tracing::debug!(request_id = %request, "discarding stale page");
                return (false, vec![]);
            }

            if state.page == 1 {
                if page.is_empty_match() {
                    tracing::debug!(query = %state.query, "no matches");
                    state.reset(Status::NotFound);
                    return (true, vec![Action::Notify(Notification::not_found())]);
                }

                state.total = page.total_matches;
                state.accumulated = page.items;
            } else if page.items.is_empty() {
                // Nothing more is reachable even though the total says otherwise.
                tracing::debug!(page = state.page, total = state.total, "empty page, capping total");
                state.total = state.accumulated.len() as u64;
            } else {
                state.accumulated.extend(page.items);
            }

            state.clamp_to_total();
            state.status = Status::Resolved;

            tracing::debug!(
                page = state.page,
                accumulated = state.accumulated.len(),
                total = state.total,
                "page applied"
            );

            (true, vec![])
        }
        Event::FetchFailed { request, reason } => {
            if !state.settle(request) {
                tracing::debug!(request_id = %request, "discarding stale failure");
                return (false, vec![]);
            }

            tracing::warn!(page = state.page, reason = %reason, "search fetch failed");
            state.reset(Status::Error);

            (true, vec![Action::Notify(Notification::fetch_failed())])
        }
    }
}

/// Payload-free event tag for span fields.
#[derive(Debug)]
enum EventKind {
    Submit,
    LoadMore,
    PageLoaded,
    FetchFailed,
}

impl EventKind {
    const fn of(event: &Event) -> Self {
        match event {
            Event::Submit(_) => Self::Submit,
            Event::LoadMore => Self::LoadMore,
            Event::PageLoaded { .. } => Self::PageLoaded,
            Event::FetchFailed { .. } => Self::FetchFailed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageResult;
    use crate::notify::NotificationKind;

    fn images(range: std::ops::Range<u32>) -> Vec<ImageResult> {
        range
            .map(|i| ImageResult::new(i.to_string(), format!("https://cdn/{i}_640.jpg"), format!("https://cdn/{i}_1280.jpg")))
            .collect()
    }

    fn fetch_request(actions: &[Action]) -> (RequestId, SearchQuery) {
        match actions {
            [Action::Fetch { request, query }] => (*request, query.clone()),
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    fn submit(state: &mut SessionState, text: &str) -> RequestId {
        let (_, actions) = handle_event(state, Event::Submit(text.to_string()));
        fetch_request(&actions).0
    }

    fn resolve(state: &mut SessionState, request: RequestId, items: Vec<ImageResult>, total: u64) -> Vec<Action> {
        handle_event(state, Event::PageLoaded { request, page: ResultPage::new(items, total) }).1
    }

    #[test]
    fn submit_resets_before_fetching() {
        let mut state = SessionState::new();
        let request = submit(&mut state, "cats");
        resolve(&mut state, request, images(0..12), 50);

        let (changed, actions) = handle_event(&mut state, Event::Submit("  dogs ".to_string()));

        assert!(changed);
        assert_eq!(state.query(), "dogs");
        assert_eq!(state.page(), 1);
        assert_eq!(state.total(), 0);
        assert!(state.accumulated().is_empty());
        assert_eq!(state.status(), Status::Pending);
        let (_, query) = fetch_request(&actions);
        assert_eq!(query, SearchQuery::new("dogs", 1).unwrap());
    }

    #[test]
    fn empty_submit_goes_idle_without_fetch() {
        let mut state = SessionState::new();
        let request = submit(&mut state, "cats");
        resolve(&mut state, request, images(0..12), 50);

        let (changed, actions) = handle_event(&mut state, Event::Submit("   ".to_string()));

        assert!(changed);
        assert!(actions.is_empty());
        assert_eq!(state.status(), Status::Idle);
        assert_eq!(state.query(), "");
        assert!(state.accumulated().is_empty());
        assert_eq!(state.in_flight(), None);
    }

    #[test]
    fn zero_total_is_not_found_with_info_notification() {
        let mut state = SessionState::new();
        let request = submit(&mut state, "cats");

        let actions = resolve(&mut state, request, vec![], 0);

        assert_eq!(state.status(), Status::NotFound);
        assert!(state.accumulated().is_empty());
        assert_eq!(state.total(), 0);
        match actions.as_slice() {
            [Action::Notify(n)] => assert_eq!(n.kind, NotificationKind::Info),
            other => panic!("expected one notification, got {other:?}"),
        }
    }

    #[test]
    fn first_page_resolves() {
        let mut state = SessionState::new();
        let request = submit(&mut state, "cats");

        let actions = resolve(&mut state, request, images(0..12), 50);

        assert!(actions.is_empty());
        assert_eq!(state.status(), Status::Resolved);
        assert_eq!(state.accumulated().len(), 12);
        assert_eq!(state.total(), 50);
    }

    #[test]
    fn load_more_appends_in_page_order() {
        let mut state = SessionState::new();
        let request = submit(&mut state, "cats");
        resolve(&mut state, request, images(0..12), 50);

        let (changed, actions) = handle_event(&mut state, Event::LoadMore);
        assert!(changed);
        assert_eq!(state.status(), Status::Pending);
        let (request, query) = fetch_request(&actions);
        assert_eq!(query.page(), 2);
        assert_eq!(query.text(), "cats");

        resolve(&mut state, request, images(12..24), 50);

        assert_eq!(state.status(), Status::Resolved);
        assert_eq!(state.page(), 2);
        assert_eq!(state.accumulated(), images(0..24).as_slice());
    }

    #[test]
    fn repeated_load_more_accumulates_every_page() {
        let mut state = SessionState::new();
        let request = submit(&mut state, "cats");
        resolve(&mut state, request, images(0..12), 40);

        for page in 1..4u32 {
            let (_, actions) = handle_event(&mut state, Event::LoadMore);
            let (request, query) = fetch_request(&actions);
            assert_eq!(query.page(), page + 1);
            let start = page * 12;
            resolve(&mut state, request, images(start..(start + 12).min(40)), 40);
        }

        assert_eq!(state.accumulated(), images(0..40).as_slice());
        assert!(!state.can_load_more());
    }

    #[test]
    fn load_more_is_noop_when_everything_is_loaded() {
        let mut state = SessionState::new();
        let request = submit(&mut state, "cats");
        resolve(&mut state, request, images(0..5), 5);
        let before = state.clone();

        let (changed, actions) = handle_event(&mut state, Event::LoadMore);

        assert!(!changed);
        assert!(actions.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn load_more_is_noop_while_pending() {
        let mut state = SessionState::new();
        let request = submit(&mut state, "cats");
        resolve(&mut state, request, images(0..12), 50);
        handle_event(&mut state, Event::LoadMore);
        let before = state.clone();

        let (changed, actions) = handle_event(&mut state, Event::LoadMore);

        assert!(!changed);
        assert!(actions.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn load_more_is_noop_when_idle() {
        let mut state = SessionState::new();
        let (changed, actions) = handle_event(&mut state, Event::LoadMore);
        assert!(!changed);
        assert!(actions.is_empty());
        assert_eq!(state, SessionState::new());
    }

    #[test]
    fn first_page_failure_is_error_with_notification() {
        let mut state = SessionState::new();
        let request = submit(&mut state, "cats");

        let (changed, actions) = handle_event(
            &mut state,
            Event::FetchFailed { request, reason: "connection refused".to_string() },
        );

        assert!(changed);
        assert_eq!(state.status(), Status::Error);
        assert!(state.accumulated().is_empty());
        assert_eq!(state.total(), 0);
        match actions.as_slice() {
            [Action::Notify(n)] => assert_eq!(n.kind, NotificationKind::Error),
            other => panic!("expected one notification, got {other:?}"),
        }
    }

    #[test]
    fn later_page_failure_discards_accumulated() {
        let mut state = SessionState::new();
        let request = submit(&mut state, "cats");
        resolve(&mut state, request, images(0..12), 50);
        let (_, actions) = handle_event(&mut state, Event::LoadMore);
        let (request, _) = fetch_request(&actions);

        handle_event(&mut state, Event::FetchFailed { request, reason: "HTTP status: 500".to_string() });

        assert_eq!(state.status(), Status::Error);
        assert_eq!(state.page(), 1);
        assert_eq!(state.total(), 0);
        assert!(state.accumulated().is_empty());
        assert_eq!(state.query(), "cats");
    }

    #[test]
    fn submit_is_accepted_after_error() {
        let mut state = SessionState::new();
        let request = submit(&mut state, "cats");
        handle_event(&mut state, Event::FetchFailed { request, reason: String::new() });

        let request = submit(&mut state, "cats");
        resolve(&mut state, request, images(0..3), 3);

        assert_eq!(state.status(), Status::Resolved);
        assert_eq!(state.accumulated().len(), 3);
    }

    #[test]
    fn stale_page_from_superseded_query_is_ignored() {
        let mut state = SessionState::new();
        let stale = submit(&mut state, "cats");
        let current = submit(&mut state, "dogs");
        let before = state.clone();

        let (changed, actions) = handle_event(
            &mut state,
            Event::PageLoaded { request: stale, page: ResultPage::new(images(0..12), 99) },
        );

        assert!(!changed);
        assert!(actions.is_empty());
        assert_eq!(state, before);

        resolve(&mut state, current, images(100..104), 4);
        assert_eq!(state.query(), "dogs");
        assert_eq!(state.accumulated(), images(100..104).as_slice());
    }

    #[test]
    fn stale_failure_is_ignored() {
        let mut state = SessionState::new();
        let stale = submit(&mut state, "cats");
        let current = submit(&mut state, "dogs");
        resolve(&mut state, current, images(0..12), 20);
        let before = state.clone();

        let (changed, actions) = handle_event(&mut state, Event::FetchFailed { request: stale, reason: String::new() });

        assert!(!changed);
        assert!(actions.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn outcome_after_empty_submit_is_ignored() {
        let mut state = SessionState::new();
        let request = submit(&mut state, "cats");
        handle_event(&mut state, Event::Submit(String::new()));

        let actions = resolve(&mut state, request, images(0..12), 50);

        assert!(actions.is_empty());
        assert_eq!(state.status(), Status::Idle);
        assert!(state.accumulated().is_empty());
    }

    #[test]
    fn accumulated_never_exceeds_total() {
        let mut state = SessionState::new();
        let request = submit(&mut state, "cats");

        resolve(&mut state, request, images(0..12), 7);

        assert_eq!(state.accumulated().len(), 7);
        assert!(!state.can_load_more());
    }

    #[test]
    fn empty_later_page_stops_pagination() {
        let mut state = SessionState::new();
        let request = submit(&mut state, "cats");
        resolve(&mut state, request, images(0..12), 500);
        let (_, actions) = handle_event(&mut state, Event::LoadMore);
        let (request, _) = fetch_request(&actions);

        resolve(&mut state, request, vec![], 500);

        assert_eq!(state.status(), Status::Resolved);
        assert_eq!(state.total(), 12);
        assert!(!state.can_load_more());
    }
}
