//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module resolves where configuration and log files live on the current
//! platform.

pub mod paths;

pub use paths::{default_config_file, expand_tilde, get_data_dir};
