//! Search status for the query state machine.
//!
//! # State Machine
//!
//! ```text
//!            submit(text)                 page 1, total > 0
//!   Idle ───────────────▶ Pending ─────────────────────────▶ Resolved
//!    ▲                     │  │  ▲                               │
//!    │ submit("")          │  │  └────────── load_more ──────────┘
//!    │                     │  │
//!    │     page 1, total 0 │  │ fetch failed
//!    │                     ▼  ▼
//!    └───────────── NotFound  Error
//! ```
//!
//! Every status accepts a new `submit`.

/// Where the current search stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Status {
    /// No active search. The initial status, and the result of an empty submit.
    #[default]
    Idle,

    /// A fetch for the current query is in flight.
    ///
    /// `load_more` is ignored until the fetch settles.
    Pending,

    /// The latest page was merged into the accumulated results.
    Resolved,

    /// The first page reported zero matches.
    NotFound,

    /// The latest fetch failed. Accumulated results were discarded.
    Error,
}

impl Status {
    /// Returns `true` while a fetch is outstanding.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Pending => "pending",
            Self::Resolved => "resolved",
            Self::NotFound => "notfound",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}
