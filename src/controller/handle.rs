//! Command channel front-end for a controller running on its own task.

use crate::app::{Event, SessionSnapshot};
use crate::domain::error::{ImageFinderError, Result};
use tokio::sync::{mpsc, watch};

/// User actions accepted by a spawned controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Submit(String),
    LoadMore,
}

impl From<Command> for Event {
    fn from(command: Command) -> Self {
        match command {
            Command::Submit(text) => Self::Submit(text),
            Command::LoadMore => Self::LoadMore,
        }
    }
}

/// Cloneable handle to a controller started with
/// [`QueryController::spawn`](super::QueryController::spawn).
#[derive(Debug, Clone)]
pub struct ControllerHandle {
    commands: mpsc::Sender<Command>,
    snapshots: watch::Receiver<SessionSnapshot>,
}

impl ControllerHandle {
    pub(super) const fn new(commands: mpsc::Sender<Command>, snapshots: watch::Receiver<SessionSnapshot>) -> Self {
        Self { commands, snapshots }
    }

    /// Queues a new search.
    ///
    /// # Errors
    ///
    /// Returns [`ImageFinderError::ControllerClosed`] if the controller task has
    /// stopped.
    pub async fn submit(&self, text: impl Into<String>) -> Result<()> {
        self.send(Command::Submit(text.into())).await
    }

    /// Queues a request for the next page.
    ///
    /// # Errors
    ///
    /// Returns [`ImageFinderError::ControllerClosed`] if the controller task has
    /// stopped.
    pub async fn load_more(&self) -> Result<()> {
        self.send(Command::LoadMore).await
    }

    /// Returns the most recently published snapshot.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Returns a fresh receiver for snapshot changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    async fn send(&self, command: Command) -> Result<()> {
        self.commands
            .send(command)
            .await
            .map_err(|_| ImageFinderError::ControllerClosed)
    }
}
