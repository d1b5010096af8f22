//! Effect executor for the query state machine.
//!
//! [`QueryController`] owns the [`SessionState`], runs the reducer in
//! [`app::handle_event`](crate::app::handle_event), and executes the resulting
//! actions: fetches run on spawned Tokio tasks, notifications go straight to the
//! [`Notifier`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  Command   ┌──────────────────────────────┐   Fetch    ┌──────────────┐
//! │ Presentation │ ─────────▶ │ QueryController              │ ─────────▶ │ spawned task │
//! │    layer     │            │  handle_event(state, event)  │            │ SearchClient │
//! │              │ ◀───────── │  SessionState                │ ◀───────── │              │
//! └──────────────┘  snapshot  └──────────────────────────────┘  outcome   └──────────────┘
//!                    (watch)                │ Notify                (mpsc)
//!                                           ▼
//!                                       Notifier
//! ```
//!
//! All state mutation happens on whichever task owns the controller. Fetch
//! outcomes come back over an mpsc channel and go through the reducer like any
//! other event, so the stale-request check is the only ordering rule needed.
//!
//! # Driving Modes
//!
//! - Inline: call [`QueryController::submit`] / [`QueryController::load_more`]
//!   and await [`QueryController::settle`] to apply the outcome.
//! - Task: [`QueryController::spawn`] moves the controller onto its own task
//!   and returns a cloneable [`ControllerHandle`].

mod handle;

pub use handle::{Command, ControllerHandle};

use crate::app::{handle_event, Action, Event, RequestId, SessionSnapshot, SessionState};
use crate::client::SearchClient;
use crate::domain::SearchQuery;
use crate::notify::Notifier;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Capacity of the command channel created by [`QueryController::spawn`].
const COMMAND_BUFFER: usize = 32;

/// Owns the session state and executes the reducer's side effects.
pub struct QueryController<C> {
    state: SessionState,
    client: Arc<C>,
    notifier: Arc<dyn Notifier>,
    snapshots: watch::Sender<SessionSnapshot>,
    outcomes_tx: mpsc::UnboundedSender<Event>,
    outcomes_rx: mpsc::UnboundedReceiver<Event>,
}

impl<C> QueryController<C>
where
    C: SearchClient + 'static,
{
    /// Creates an idle controller.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use imagefinder::client::{ClientConfig, HttpSearchClient};
    /// use imagefinder::controller::QueryController;
    /// use imagefinder::notify::LogNotifier;
    ///
    /// # async fn demo() -> imagefinder::Result<()> {
    /// let client = HttpSearchClient::new(ClientConfig::new("my-api-key"))?;
    /// let mut controller = QueryController::new(client, LogNotifier);
    ///
    /// controller.submit("lighthouse");
    /// controller.settle().await;
    /// println!("{} images", controller.state().accumulated().len());
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(client: C, notifier: impl Notifier + 'static) -> Self {
        Self::with_shared(Arc::new(client), Arc::new(notifier))
    }

    /// Creates an idle controller around an already shared client and notifier.
    pub fn with_shared(client: Arc<C>, notifier: Arc<dyn Notifier>) -> Self {
        let state = SessionState::new();
        let (snapshots, _) = watch::channel(state.snapshot());
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();

        Self {
            state,
            client,
            notifier,
            snapshots,
            outcomes_tx,
            outcomes_rx,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns a receiver that sees a new snapshot after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.subscribe()
    }

    /// Starts a new search for `text`. Blank text clears the search.
    ///
    /// # Panics
    ///
    /// Issuing a fetch spawns a Tokio task, so this must be called from within
    /// a Tokio runtime.
    pub fn submit(&mut self, text: &str) {
        self.dispatch(Event::Submit(text.to_string()));
    }

    /// Requests the next page of the current query, if one is available.
    ///
    /// # Panics
    ///
    /// Same runtime requirement as [`submit`](Self::submit).
    pub fn load_more(&mut self) {
        self.dispatch(Event::LoadMore);
    }

    /// Runs one event through the reducer and executes the resulting actions.
    pub fn dispatch(&mut self, event: Event) {
        let (changed, actions) = handle_event(&mut self.state, event);

        if changed {
            self.snapshots.send_replace(self.state.snapshot());
        }

        for action in actions {
            self.execute(action);
        }
    }

    /// Waits for the next fetch outcome and applies it.
    ///
    /// Stale outcomes are consumed and ignored by the reducer. Returns once a
    /// single outcome has been dispatched, or immediately when no fetch is in
    /// flight.
    pub async fn apply_next_outcome(&mut self) {
        if self.state.in_flight().is_none() {
            return;
        }
        if let Some(event) = self.outcomes_rx.recv().await {
            self.dispatch(event);
        }
    }

    /// Applies fetch outcomes until no fetch is in flight.
    ///
    /// Returns immediately when the state is not pending.
    pub async fn settle(&mut self) {
        while self.state.in_flight().is_some() {
            self.apply_next_outcome().await;
        }
    }

    /// Processes commands and fetch outcomes until every command sender is dropped.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        tracing::debug!("query controller started");

        loop {
            let event = tokio::select! {
                command = commands.recv() => match command {
                    Some(command) => Event::from(command),
                    None => break,
                },
                Some(outcome) = self.outcomes_rx.recv() => outcome,
            };

            self.dispatch(event);
        }

        tracing::debug!("query controller stopped");
    }

    /// Moves the controller onto its own task.
    ///
    /// The task ends when every clone of the returned handle is dropped.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(self) -> (ControllerHandle, JoinHandle<()>) {
        let (commands_tx, commands_rx) = mpsc::channel(COMMAND_BUFFER);
        let handle = ControllerHandle::new(commands_tx, self.subscribe());
        let task = tokio::spawn(self.run(commands_rx));
        (handle, task)
    }

    fn execute(&self, action: Action) {
        match action {
            Action::Fetch { request, query } => self.spawn_fetch(request, query),
            Action::Notify(notification) => self.notifier.notify(&notification),
        }
    }

    fn spawn_fetch(&self, request: RequestId, query: SearchQuery) {
        let client = Arc::clone(&self.client);
        let outcomes = self.outcomes_tx.clone();
        let span = tracing::debug_span!("search_fetch", request_id = %request, page = query.page());

        tokio::spawn(
            async move {
                let fetch = AssertUnwindSafe(async { client.fetch_page(&query).await });
                let event = match fetch.catch_unwind().await {
                    Ok(Ok(page)) => Event::PageLoaded { request, page },
                    Ok(Err(e)) => {
                        tracing::debug!(error = %e, "fetch returned an error");
                        Event::FetchFailed {
                            request,
                            reason: e.to_string(),
                        }
                    }
                    Err(payload) => {
                        let reason = panic_message(payload.as_ref());
                        tracing::warn!(reason = %reason, "search client panicked");
                        Event::FetchFailed { request, reason }
                    }
                };

                if outcomes.send(event).is_err() {
                    tracing::debug!("controller dropped before fetch completed");
                }
            }
            .instrument(span),
        );
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "search client panicked".to_string())
}

impl<C> std::fmt::Debug for QueryController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryController")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
