//! jobtrail: the list view of a job-application tracker.
//!
//! The crate derives what the user sees from the record collection, remembers
//! their search/filter/view choices for the rest of the session, and brings a
//! record back into view after they return from editing it:
//! - Free-text search combined with date, status and application-type filters
//! - Session-scoped persistence of the view state that never fails the view
//! - Scroll restoration by record identity with a bounded per-frame retry loop
//! - Summary counts, the application-type facet and removable filter chips

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Command Shell (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!     │              │               │              │
//! ┌──────────┐ ┌────────────┐ ┌─────────────┐ ┌──────────┐
//! │ filter/  │ │ storage/   │ │ scroll/     │ │ ui/      │
//! │ derive   │ │ view state │ │ anchor      │ │ render   │
//! │ stats    │ │ session    │ │ frames      │ │ page     │
//! │ chips    │ │ backends   │ │ viewport    │ │          │
//! └──────────┘ └────────────┘ └─────────────┘ └──────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Records & Infrastructure                   │
//! │  - Records, queries, errors (domain/)               │
//! │  - Record store access (records/)                   │
//! │  - Platform paths (infrastructure/)                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing, file-based OTLP export    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Records, filter queries and errors
//! - [`filter`]: Derived view, statistics, facets and chips
//! - [`storage`]: Session-scoped view state persistence
//! - [`scroll`]: Scroll restoration by record identity
//! - [`records`]: Record store access
//! - [`ui`]: Plain-text rendering
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: OpenTelemetry tracing
//!
//! # Configuration
//!
//! Configuration comes from `key=value` pairs, optionally layered over a TOML
//! file:
//!
//! ```toml
//! records_file = "~/.local/share/jobtrail/applications.json"
//! session_dir = "/run/user/1000/jobtrail"
//! persist_view_state = true
//! scroll_retry_budget = 20
//! trace_level = "info"
//! ```
//!
//! # Example
//!
//! ```rust
//! use jobtrail::{handle_event, initialize, Config, Event};
//!
//! let config = Config {
//!     persist_view_state: false,
//!     ..Default::default()
//! };
//! let mut state = initialize(&config);
//!
//! for event in [Event::Mounted, Event::SearchChanged("acme".into())] {
//!     let (_needs_render, _actions) = handle_event(&mut state, &event)?;
//!     // Execute actions...
//! }
//! # Ok::<(), jobtrail::TrackerError>(())
//! ```

pub mod app;
pub mod domain;
pub mod filter;
pub mod infrastructure;
pub mod observability;
pub mod records;
pub mod scroll;
pub mod storage;
pub mod ui;

pub use app::{handle_event, Action, AppState, Event, ViewMode};
pub use domain::{Result, TrackerError};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use storage::{JsonSessionFile, MemorySession, SessionBackend, ViewStateStore};

/// Name of the session file inside `session_dir`.
const SESSION_FILE_NAME: &str = "view-state.json";

/// Runtime configuration.
///
/// Every key has a default, and an unparsable value falls back to the default
/// for that key only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON export read by the record store.
    ///
    /// Default: `<data dir>/applications.json`
    pub records_file: PathBuf,

    /// Directory of the session file.
    ///
    /// Default: `$XDG_RUNTIME_DIR/jobtrail`, or the temp dir.
    pub session_dir: PathBuf,

    /// `false` keeps view state in memory only. Default: `true`
    pub persist_view_state: bool,

    /// Frames the scroll anchor checks before giving up. Default: `20`
    pub scroll_retry_budget: u32,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or any `EnvFilter`
    /// directive. Default: `"info"`
    pub trace_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            records_file: infrastructure::default_records_file(),
            session_dir: infrastructure::session_dir(),
            persist_view_state: true,
            scroll_retry_budget: scroll::DEFAULT_RETRY_BUDGET,
            trace_level: "info".to_string(),
        }
    }
}

/// TOML shape of [`Config`]; every key optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    records_file: Option<String>,
    session_dir: Option<String>,
    persist_view_state: Option<bool>,
    scroll_retry_budget: Option<u32>,
    trace_level: Option<String>,
}

impl Config {
    /// Parses configuration from a string map with per-key fallback defaults.
    ///
    /// # Parsing Rules
    ///
    /// - `records_file`, `session_dir`: paths, `~` expanded
    /// - `persist_view_state`: `true`/`false`/`yes`/`no`/`1`/`0`
    /// - `scroll_retry_budget`: `u32`
    /// - `trace_level`: any non-empty string
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use jobtrail::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("scroll_retry_budget".to_string(), "5".to_string());
    /// map.insert("persist_view_state".to_string(), "maybe".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.scroll_retry_budget, 5);
    /// assert!(config.persist_view_state);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let mut config = Self::default();
        config.apply_overrides(map);
        config
    }

    /// Overrides the keys present (and valid) in `map`, leaving the rest as is.
    pub fn apply_overrides(&mut self, map: &BTreeMap<String, String>) {
        for (key, value) in map {
            let value = value.trim();
            match key.as_str() {
                "records_file" if !value.is_empty() => self.records_file = infrastructure::expand_tilde(value),
                "session_dir" if !value.is_empty() => self.session_dir = infrastructure::expand_tilde(value),
                "persist_view_state" => match parse_bool(value) {
                    Some(flag) => self.persist_view_state = flag,
                    None => tracing::debug!(value = %value, "ignoring invalid persist_view_state"),
                },
                "scroll_retry_budget" => match value.parse::<u32>() {
                    Ok(budget) => self.scroll_retry_budget = budget,
                    Err(e) => tracing::debug!(value = %value, error = %e, "ignoring invalid scroll_retry_budget"),
                },
                "trace_level" if !value.is_empty() => self.trace_level = value.to_string(),
                "config" => {}
                other => tracing::debug!(key = %other, "ignoring unknown config key"),
            }
        }
    }

    /// Parses a TOML document; missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Config`] for invalid TOML, unknown keys or
    /// mistyped values.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let raw: RawConfig =
            toml::from_str(contents).map_err(|e| TrackerError::Config(e.to_string()))?;

        let mut config = Self::default();
        if let Some(path) = raw.records_file {
            config.records_file = infrastructure::expand_tilde(&path);
        }
        if let Some(path) = raw.session_dir {
            config.session_dir = infrastructure::expand_tilde(&path);
        }
        if let Some(flag) = raw.persist_view_state {
            config.persist_view_state = flag;
        }
        if let Some(budget) = raw.scroll_retry_budget {
            config.scroll_retry_budget = budget;
        }
        if let Some(level) = raw.trace_level.filter(|level| !level.is_empty()) {
            config.trace_level = level;
        }
        Ok(config)
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::Io`] if the file cannot be read, or
    /// [`TrackerError::Config`] if it does not parse.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Path of the session file.
    #[must_use]
    pub fn session_file(&self) -> PathBuf {
        self.session_dir.join(SESSION_FILE_NAME)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Creates the application state with its view state store.
///
/// The session file backend is used when persistence is enabled. An
/// unreadable session file is discarded and started over; if the file still
/// cannot be opened, the view state lives in memory for this run.
///
/// # Example
///
/// ```rust
/// use jobtrail::{initialize, Config};
///
/// let config = Config {
///     persist_view_state: false,
///     ..Default::default()
/// };
/// let state = initialize(&config);
/// ```
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(
        persist = config.persist_view_state,
        session_dir = ?config.session_dir,
        "initializing jobtrail"
    );

    let backend: Box<dyn SessionBackend> = if config.persist_view_state {
        open_session(&config.session_file())
    } else {
        Box::new(MemorySession::default())
    };

    AppState::new(ViewStateStore::new(backend))
}

fn open_session(path: &Path) -> Box<dyn SessionBackend> {
    match JsonSessionFile::open(path.to_path_buf()) {
        Ok(session) => return Box::new(session),
        Err(TrackerError::Storage(e)) => {
            tracing::warn!(error = %e, path = ?path, "discarding unreadable session file");
            if std::fs::remove_file(path).is_ok() {
                if let Ok(session) = JsonSessionFile::open(path.to_path_buf()) {
                    return Box::new(session);
                }
            }
        }
        Err(e) => tracing::warn!(error = %e, path = ?path, "session file unavailable"),
    }

    tracing::warn!("keeping view state in memory for this run");
    Box::new(MemorySession::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn map_values_fall_back_per_key() {
        let mut map = BTreeMap::new();
        map.insert("scroll_retry_budget".to_string(), "-3".to_string());
        map.insert("trace_level".to_string(), "debug".to_string());
        map.insert("persist_view_state".to_string(), "no".to_string());

        let config = Config::from_map(&map);
        assert_eq!(config.scroll_retry_budget, 20);
        assert_eq!(config.trace_level, "debug");
        assert!(!config.persist_view_state);
    }

    #[test]
    fn toml_overlays_defaults() {
        let config = Config::from_toml_str(
            r#"
            records_file = "/srv/jobs.json"
            scroll_retry_budget = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.records_file, PathBuf::from("/srv/jobs.json"));
        assert_eq!(config.scroll_retry_budget, 5);
        assert_eq!(config.trace_level, "info");
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        assert!(matches!(
            Config::from_toml_str("scroll_retry_budget = \"lots\""),
            Err(TrackerError::Config(_))
        ));
        assert!(matches!(
            Config::from_toml_str("colour = \"blue\""),
            Err(TrackerError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::from_file(&dir.path().join("absent.toml")),
            Err(TrackerError::Io(_))
        ));
    }

    #[test]
    fn overrides_win_over_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jobtrail.toml");
        std::fs::write(&path, "trace_level = \"warn\"\nscroll_retry_budget = 7\n").unwrap();

        let mut config = Config::from_file(&path).unwrap();
        let mut map = BTreeMap::new();
        map.insert("trace_level".to_string(), "trace".to_string());
        config.apply_overrides(&map);

        assert_eq!(config.trace_level, "trace");
        assert_eq!(config.scroll_retry_budget, 7);
    }

    #[test]
    fn initialize_persists_to_session_file() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            session_dir: dir.path().to_path_buf(),
            ..Config::default()
        };

        let mut state = initialize(&config);
        handle_event(&mut state, &Event::SetViewMode(ViewMode::List)).unwrap();
        drop(state);

        let state = initialize(&config);
        assert_eq!(state.view_store().load().view_mode, ViewMode::List);
        assert!(config.session_file().exists());
    }

    #[test]
    fn ended_session_starts_from_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            session_dir: dir.path().to_path_buf(),
            ..Config::default()
        };

        let mut state = initialize(&config);
        handle_event(&mut state, &Event::SetViewMode(ViewMode::List)).unwrap();
        handle_event(&mut state, &Event::SearchChanged("acme".into())).unwrap();
        state.view_store_mut().end_session();
        drop(state);
        assert!(!config.session_file().exists());

        let mut state = initialize(&config);
        assert_eq!(state.view_store().load(), storage::ViewState::default());
        handle_event(&mut state, &Event::Mounted).unwrap();
        assert_eq!(state.view_mode, ViewMode::Card);
        assert!(state.search_text.is_empty());
    }

    #[test]
    fn corrupt_session_file_is_replaced() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            session_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        std::fs::write(config.session_file(), "{{{ not json").unwrap();

        let mut state = initialize(&config);
        assert_eq!(state.view_store().load().view_mode, ViewMode::Card);
        handle_event(&mut state, &Event::SearchChanged("acme".into())).unwrap();

        let reread = std::fs::read_to_string(config.session_file()).unwrap();
        assert!(reread.contains("acme"));
    }
}
