//! Notification events for the presentation layer's toast system.
//!
//! The controller never renders anything. When a search ends in "no matches"
//! or in a failure it emits a [`Notification`] through a [`Notifier`], and the
//! presentation layer decides how to show it.
//!
//! Delivery is fire-and-forget: [`Notifier::notify`] must return immediately.
//!
//! # Example
//!
//! ```rust
//! use imagefinder::notify::{ChannelNotifier, Notification, Notifier};
//!
//! let (notifier, mut toasts) = ChannelNotifier::new();
//! notifier.notify(&Notification::error("Sorry, something went wrong."));
//! assert_eq!(toasts.try_recv().unwrap().message, "Sorry, something went wrong.");
//! ```

use tokio::sync::mpsc;

/// Shown when the first page of a query reports zero matches.
pub const NOT_FOUND_MESSAGE: &str = "Sorry, we didn't find any pictures";

/// Shown when a fetch fails for any reason.
pub const ERROR_MESSAGE: &str = "Sorry, something went wrong.";

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Info,
    Error,
}

/// A single user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }

    /// Notification for a query with no matches.
    #[must_use]
    pub fn not_found() -> Self {
        Self::info(NOT_FOUND_MESSAGE)
    }

    /// Notification for a failed fetch.
    #[must_use]
    pub fn fetch_failed() -> Self {
        Self::error(ERROR_MESSAGE)
    }
}

/// Receiver of notifications.
///
/// Implementations must not block: the controller calls this inline while
/// applying a state transition.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: &Notification);
}

impl<F> Notifier for F
where
    F: Fn(&Notification) + Send + Sync,
{
    fn notify(&self, notification: &Notification) {
        self(notification);
    }
}

/// Forwards notifications into an unbounded channel.
///
/// Sending never waits. If the receiving side has been dropped the
/// notification is discarded.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notification>,
}

impl ChannelNotifier {
    /// Creates a notifier and the receiver the presentation layer reads from.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notification: &Notification) {
        if self.sender.send(notification.clone()).is_err() {
            tracing::debug!(message = %notification.message, "notification receiver dropped");
        }
    }
}

/// Writes notifications to the log instead of showing them.
///
/// Useful for headless hosts that have no toast layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: &Notification) {
        match notification.kind {
            NotificationKind::Info => tracing::info!(message = %notification.message, "notification"),
            NotificationKind::Error => tracing::warn!(message = %notification.message, "notification"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn channel_notifier_delivers_in_order() {
        let (notifier, mut receiver) = ChannelNotifier::new();

        notifier.notify(&Notification::not_found());
        notifier.notify(&Notification::fetch_failed());

        let first = receiver.try_recv().unwrap();
        let second = receiver.try_recv().unwrap();
        assert_eq!(first.kind, NotificationKind::Info);
        assert_eq!(first.message, NOT_FOUND_MESSAGE);
        assert_eq!(second.kind, NotificationKind::Error);
        assert_eq!(second.message, ERROR_MESSAGE);
    }

    #[test]
    fn channel_notifier_tolerates_dropped_receiver() {
        let (notifier, receiver) = ChannelNotifier::new();
        drop(receiver);
        notifier.notify(&Notification::fetch_failed());
    }

    #[test]
    fn closures_are_notifiers() {
        let seen = Mutex::new(Vec::new());
        let notifier = |n: &Notification| seen.lock().unwrap().push(n.kind);

        notifier.notify(&Notification::info("hello"));

        assert_eq!(*seen.lock().unwrap(), vec![NotificationKind::Info]);
    }
}
