//! Application layer: the query/pagination state machine.
//!
//! This module holds the pure half of the query controller. It owns no I/O and
//! no runtime; the [`controller`](crate::controller) module executes the actions
//! it produces.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! submit / load_more → Events → handle_event → SessionState → Actions → Effects
//!                                   ↑                                     ↓
//!                                   └─────────── fetch outcomes ──────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and the transition table
//! - [`status`]: Search status enum
//! - [`state`]: Session state container, request ids and snapshots
//!
//! # Example
//!
//! ```rust
//! use imagefinder::app::{handle_event, Event, SessionState, Status};
//!
//! let mut state = SessionState::new();
//! let (changed, actions) = handle_event(&mut state, Event::Submit("cats".to_string()));
//! assert!(changed);
//! assert_eq!(actions.len(), 1);
//! assert_eq!(state.status(), Status::Pending);
//! ```

pub mod actions;
pub mod handler;
pub mod state;
pub mod status;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use state::{RequestId, SessionSnapshot, SessionState};
pub use status::Status;
