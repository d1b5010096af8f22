//! Imagefinder: query and pagination core for an image search gallery.
//!
//! Imagefinder drives a paginated keyword search against the Pixabay API and
//! exposes the resulting state to whatever front-end renders the gallery:
//! - Paginated search with accumulated results and "load more"
//! - Five-state status machine (idle, pending, resolved, not found, error)
//! - Stale response suppression when a new query supersedes an old one
//! - Toast notifications on empty results and failed fetches
//! - Full-size image viewer overlay state

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Host application (GUI, TUI, web shell)             │  ← Renders
//! └─────────────────────────────────────────────────────┘
//!            │ submit / load_more          ▲ snapshots, toasts
//! ┌─────────────────────────────────────────────────────┐
//! │  Controller (controller/)                           │  ← Effects
//! │  - Spawns fetches on Tokio tasks                    │
//! │  - Publishes snapshots over a watch channel         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action emission                                  │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Client        │   │ Notify        │   │ UI helpers    │
//! │ (client/)     │   │ (notify/)     │   │ (ui/)         │
//! │ - HTTP GET    │   │ - Toasts      │   │ - Viewer      │
//! │ - JSON parse  │   │               │   │ - View model  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Infrastructure & Domain Layers                     │
//! │  - Platform paths (infrastructure/)                 │
//! │  - Error types (domain/error)                       │
//! │  - Query and image model (domain/image)             │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - tracing-subscriber fmt layer                     │
//! │  - Rotating log file                                │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Query state machine with event/action model
//! - [`client`]: Search client trait and HTTP implementation
//! - [`controller`]: Effect executor and task handle
//! - [`domain`]: Core domain types (query, image, errors)
//! - [`infrastructure`]: Platform-specific utilities (paths)
//! - [`notify`]: User-facing notifications
//! - [`ui`]: Viewer overlay and view model
//! - [`observability`]: Log file setup
//!
//! # Configuration
//!
//! Configuration is read from `~/.config/imagefinder/config.toml` (or any
//! path passed to [`Config::from_file`]):
//!
//! ```toml
//! api_key = "your-pixabay-key"
//! per_page = 12
//! orientation = "horizontal"
//! log_level = "debug"
//! ```
//!
//! `IMAGEFINDER_API_KEY` in the environment replaces the file's key.
//!
//! # Examples
//!
//! ```no_run
//! use imagefinder::notify::ChannelNotifier;
//! use imagefinder::{initialize, observability, Config};
//!
//! # async fn demo() -> imagefinder::Result<()> {
//! let config = Config::from_file(imagefinder::infrastructure::default_config_file())?
//!     .with_env_overrides();
//! observability::init_tracing(&config);
//!
//! let (notifier, mut toasts) = ChannelNotifier::new();
//! let (handle, _task) = initialize(&config, notifier)?.spawn();
//!
//! handle.submit("northern lights").await?;
//! let mut snapshots = handle.subscribe();
//! snapshots.changed().await.ok();
//! println!("{:?}", snapshots.borrow().status);
//!
//! if let Ok(toast) = toasts.try_recv() {
//!     println!("{}", toast.message);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Key Design Decisions
//!
//! ## Pure Reducer
//!
//! [`handle_event`] mutates [`SessionState`] and returns [`Action`]s without
//! performing I/O. Every transition is testable without a runtime.
//!
//! ## Request Identity
//!
//! Each fetch carries a [`RequestId`]. A response whose id is not the one in
//! flight is dropped, so a slow response for an abandoned query can never
//! overwrite newer results.

pub mod app;
pub mod client;
pub mod controller;
pub mod domain;
pub mod infrastructure;
pub mod notify;
pub mod observability;
pub mod ui;

pub use app::{handle_event, Action, Event, RequestId, SessionSnapshot, SessionState, Status};
pub use client::{ClientConfig, HttpSearchClient, SearchClient};
pub use controller::{Command, ControllerHandle, QueryController};
pub use domain::{ImageFinderError, ImageResult, Result, ResultPage, SearchQuery};
pub use notify::{Notification, NotificationKind, Notifier};

use client::{DEFAULT_BASE_URL, DEFAULT_PER_PAGE, DEFAULT_TIMEOUT_SECS};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable that overrides [`Config::api_key`].
pub const API_KEY_ENV: &str = "IMAGEFINDER_API_KEY";

/// Accepted range for [`Config::per_page`].
const PER_PAGE_RANGE: std::ops::RangeInclusive<u32> = 3..=200;

/// Application configuration.
///
/// Loaded from a TOML file, a string map, or built directly. Missing keys take
/// their defaults.
///
/// # Example
///
/// ```toml
/// api_key = "your-pixabay-key"
/// base_url = "https://pixabay.com/api/"
/// per_page = 20
/// image_type = "photo"
/// orientation = "vertical"
/// safe_search = true
/// timeout_secs = 10
/// log_level = "debug"
/// log_file = "~/logs/imagefinder.log"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pixabay API key. Required, no default.
    pub api_key: String,

    /// Search endpoint. Default: `"https://pixabay.com/api/"`
    pub base_url: String,

    /// Hits per page, between 3 and 200. Default: 12
    pub per_page: u32,

    /// Options: `all`, `photo`, `illustration`, `vector`. Default: `"photo"`
    pub image_type: String,

    /// Options: `all`, `horizontal`, `vertical`. Default: `"horizontal"`
    pub orientation: String,

    /// Default: `true`
    pub safe_search: bool,

    /// Per-request timeout. Default: 15
    pub timeout_secs: u64,

    /// Tracing level filter.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub log_level: Option<String>,

    /// Log file path. Default: `imagefinder.log` in the platform data directory.
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            per_page: DEFAULT_PER_PAGE,
            image_type: "photo".to_string(),
            orientation: "horizontal".to_string(),
            safe_search: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_level: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Parses configuration from a string key/value map.
    ///
    /// # Parsing Rules
    ///
    /// - Unknown keys are ignored
    /// - `per_page`, `timeout_secs`: unparsable values fall back to defaults
    /// - `safe_search`: `"true"`/`"false"`, anything else keeps the default
    /// - `log_file`: a leading `~` is expanded
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use imagefinder::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "abc123".to_string());
    /// map.insert("per_page".to_string(), "40".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.api_key, "abc123");
    /// assert_eq!(config.per_page, 40);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str, default: String| {
            map.get(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(default)
        };

        Self {
            api_key: text("api_key", defaults.api_key),
            base_url: text("base_url", defaults.base_url),
            per_page: map
                .get("per_page")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.per_page),
            image_type: text("image_type", defaults.image_type),
            orientation: text("orientation", defaults.orientation),
            safe_search: map
                .get("safe_search")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.safe_search),
            timeout_secs: map
                .get("timeout_secs")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.timeout_secs),
            log_level: map.get("log_level").cloned(),
            log_file: map.get("log_file").map(|s| infrastructure::expand_tilde(s)),
        }
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ImageFinderError::Config`] if the text is not valid TOML or a
    /// value has the wrong type.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let mut config: Self =
            toml::from_str(text).map_err(|e| ImageFinderError::Config(e.to_string()))?;

        config.log_file = config
            .log_file
            .take()
            .map(|path| infrastructure::expand_tilde(&path.to_string_lossy()));

        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// - [`ImageFinderError::Io`] if the file cannot be read
    /// - [`ImageFinderError::Config`] if the content does not parse
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
        Self::from_toml_str(&text)
    }

    /// Applies `IMAGEFINDER_API_KEY` from the environment, if set and non-empty.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_api_key_override(std::env::var(API_KEY_ENV).ok())
    }

    fn with_api_key_override(mut self, key: Option<String>) -> Self {
        if let Some(key) = key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty()) {
            self.api_key = key;
        }
        self
    }

    /// Checks that the configuration can be used to build a client.
    ///
    /// # Errors
    ///
    /// Returns [`ImageFinderError::Config`] when the API key or base URL is
    /// empty, or `per_page` is outside 3..=200.
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(ImageFinderError::Config(format!(
                "api_key must be set (or provide {API_KEY_ENV})"
            )));
        }
        if self.base_url.trim().is_empty() {
            return Err(ImageFinderError::Config("base_url must not be empty".to_string()));
        }
        if !PER_PAGE_RANGE.contains(&self.per_page) {
            return Err(ImageFinderError::Config(format!(
                "per_page must be between {} and {}, got {}",
                PER_PAGE_RANGE.start(),
                PER_PAGE_RANGE.end(),
                self.per_page
            )));
        }
        Ok(())
    }

    /// Builds the search client parameters from this configuration.
    #[must_use]
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            per_page: self.per_page,
            image_type: self.image_type.clone(),
            orientation: self.orientation.clone(),
            safe_search: self.safe_search,
            timeout: Duration::from_secs(self.timeout_secs),
            ..ClientConfig::new(self.api_key.clone())
        }
    }
}

/// Builds an idle controller backed by the HTTP client.
///
/// Tracing is not installed here; call
/// [`observability::init_tracing`] first if log output is wanted.
///
/// # Errors
///
/// Returns [`ImageFinderError::Config`] if [`Config::validate`] fails or the
/// HTTP client cannot be built.
///
/// # Example
///
/// ```rust
/// use imagefinder::notify::LogNotifier;
/// use imagefinder::{initialize, Config, Status};
///
/// let config = Config {
///     api_key: "abc123".to_string(),
///     ..Default::default()
/// };
///
/// let controller = initialize(&config, LogNotifier)?;
/// assert_eq!(controller.state().status(), Status::Idle);
/// # Ok::<(), imagefinder::ImageFinderError>(())
/// ```
pub fn initialize(
    config: &Config,
    notifier: impl Notifier + 'static,
) -> Result<QueryController<HttpSearchClient>> {
    config.validate()?;

    let client = HttpSearchClient::new(config.client_config())?;
    tracing::debug!(
        base_url = %config.base_url,
        per_page = config.per_page,
        "initializing image search controller"
    );

    Ok(QueryController::new(client, notifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::LogNotifier;
    use std::io::Write;

    #[test]
    fn defaults_match_service_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://pixabay.com/api/");
        assert_eq!(config.per_page, 12);
        assert_eq!(config.image_type, "photo");
        assert_eq!(config.orientation, "horizontal");
        assert!(config.safe_search);
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn from_map_falls_back_on_bad_values() {
        let map: BTreeMap<String, String> = [
            ("api_key", "k"),
            ("per_page", "lots"),
            ("safe_search", "false"),
            ("timeout_secs", "-3"),
            ("orientation", "  "),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let config = Config::from_map(&map);
        assert_eq!(config.api_key, "k");
        assert_eq!(config.per_page, DEFAULT_PER_PAGE);
        assert!(!config.safe_search);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.orientation, "horizontal");
    }

    #[test]
    fn toml_fills_missing_keys_with_defaults() {
        let config = Config::from_toml_str("api_key = \"k\"\nper_page = 30\n").unwrap();
        assert_eq!(config.api_key, "k");
        assert_eq!(config.per_page, 30);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn toml_type_error_is_config_error() {
        let err = Config::from_toml_str("per_page = \"twelve\"").unwrap_err();
        assert!(matches!(err, ImageFinderError::Config(_)));
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "api_key = \"from-file\"\nlog_level = \"debug\"").unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.api_key, "from-file");
        assert_eq!(config.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ImageFinderError::Io(_)));
    }

    #[test]
    fn api_key_override_ignores_blank() {
        let config = Config {
            api_key: "file".to_string(),
            ..Default::default()
        };
        assert_eq!(config.clone().with_api_key_override(Some("  ".to_string())).api_key, "file");
        assert_eq!(config.clone().with_api_key_override(None).api_key, "file");
        assert_eq!(config.with_api_key_override(Some("env".to_string())).api_key, "env");
    }

    #[test]
    fn validate_rejects_bad_values() {
        assert!(Config::default().validate().is_err());

        let ok = Config {
            api_key: "k".to_string(),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        for per_page in [2, 201] {
            let config = Config { per_page, ..ok.clone() };
            assert!(matches!(config.validate(), Err(ImageFinderError::Config(_))));
        }

        let config = Config {
            base_url: String::new(),
            ..ok
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn client_config_carries_request_parameters() {
        let config = Config {
            api_key: "k".to_string(),
            per_page: 40,
            orientation: "vertical".to_string(),
            timeout_secs: 5,
            ..Default::default()
        };
        let client = config.client_config();
        assert_eq!(client.api_key, "k");
        assert_eq!(client.per_page, 40);
        assert_eq!(client.orientation, "vertical");
        assert_eq!(client.timeout, Duration::from_secs(5));
    }

    #[test]
    fn initialize_requires_api_key() {
        let err = initialize(&Config::default(), LogNotifier).unwrap_err();
        assert!(matches!(err, ImageFinderError::Config(_)));
    }

    #[test]
    fn initialize_reports_every_failure_as_config_error() {
        let bad_page_size = Config {
            api_key: "k".to_string(),
            per_page: 500,
            ..Default::default()
        };
        assert!(matches!(
            initialize(&bad_page_size, LogNotifier),
            Err(ImageFinderError::Config(_))
        ));
    }

    #[test]
    fn initialize_returns_idle_controller() {
        let config = Config {
            api_key: "k".to_string(),
            ..Default::default()
        };
        let controller = initialize(&config, LogNotifier).unwrap();
        assert_eq!(controller.state().status(), Status::Idle);
        assert!(controller.state().accumulated().is_empty());
    }
}
