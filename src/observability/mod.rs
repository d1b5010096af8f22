//! Structured logging with file-based output.
//!
//! Operations across the crate emit `tracing` spans and events (`fetch_page`,
//! `search_fetch`, `handle_event`). This module installs the subscriber that
//! turns them into plain-text lines in a rotating log file.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → RotatingFileWriter → log file
//! ```
//!
//! # Features
//!
//! - **File Output**: `~/.local/share/imagefinder/imagefinder.log` by default
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//! - **Span Context**: Each line carries the enclosing span fields
//!
//! # Configuration
//!
//! Log level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `log_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber initialization
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::RotatingFileWriter;
pub use init::init_tracing;
