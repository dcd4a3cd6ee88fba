//! Rick and Morty explorer: a catalog browser with on-device favorites.
//!
//! The explorer lists characters from the public Rick and Morty REST API,
//! pages and searches through them, shows character and episode detail, and
//! keeps a persistent set of favorite characters:
//! - Paginated and name-filtered character search over HTTP
//! - Per-purpose cancellation of in-flight fetches
//! - Durable favorites in a local JSON store
//! - A line-driven front end rendering plain-text view models

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Front end (main.rs)                                │  ← stdin intents, debounce
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime (runtime.rs)                               │  ← single state owner
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ App Layer     │   │ Worker Layer  │   │ UI Layer      │
//! │ (app/)        │   │ (worker/)     │   │ (ui/)         │
//! │ - Reducers    │   │ - tokio tasks │   │ - View models │
//! │ - Scopes      │   │ - Cancel      │   │ - Renderer    │
//! │ - Actions     │   │   tokens      │   │               │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                        │
//! ┌───────────────────────────┐   ┌───────────────────────────┐
//! │ API (api/)                │   │ Storage (storage/)        │
//! │ - reqwest client          │   │ - JSON favorites store    │
//! └───────────────────────────┘   └───────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, infrastructure & observability             │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Pure reducers with event/action model
//! - [`api`]: Catalog client
//! - [`domain`]: Core domain types (Character, Episode, errors)
//! - [`infrastructure`]: Platform paths
//! - [`observability`]: Rotating file logging
//! - [`runtime`]: State owner tying reducer, worker and event channel together
//! - [`storage`]: Favorites persistence
//! - [`ui`]: View models and text rendering
//! - [`worker`]: Background execution of actions
//!
//! # Configuration
//!
//! Read from `<config dir>/rickmorty-explorer/config.toml`; every key is
//! optional:
//!
//! ```toml
//! base_url = "https://rickandmortyapi.com/api"
//! data_dir = "/home/me/.local/share/rickmorty-explorer"
//! search_debounce_ms = 300
//! trace_level = "rickmorty_explorer=debug"
//! ```
//!
//! # Example
//!
//! ```no_run
//! use rickmorty_explorer::{initialize, Config, Event};
//!
//! # async fn run() -> rickmorty_explorer::Result<()> {
//! let mut runtime = initialize(&Config::load()?)?;
//! runtime.dispatch(Event::VisibilityToggled);
//! runtime.step().await;
//! println!("{}", rickmorty_explorer::ui::render(&runtime.viewmodel()));
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod runtime;
pub mod storage;
pub mod ui;
pub mod worker;

pub use app::{handle_event, Action, Event, ListState};
pub use domain::{ApiError, ExplorerError, Result, StoreError};
pub use runtime::Runtime;

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Explorer configuration.
///
/// Every field has a default; a missing config file yields
/// [`Config::default()`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Catalog base address. Default: `https://rickandmortyapi.com/api`
    pub base_url: String,

    /// Directory for the favorites store and the log file.
    ///
    /// Default: the platform data directory joined with `rickmorty-explorer`.
    pub data_dir: Option<PathBuf>,

    /// Input inactivity before a search is triggered. Default: 300
    pub search_debounce_ms: u64,

    /// `EnvFilter` directive for logging. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: api::DEFAULT_BASE_URL.to_string(),
            data_dir: None,
            search_debounce_ms: 300,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from TOML text. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ExplorerError::Config`] if the text is not valid TOML or a
    /// value has the wrong type.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rickmorty_explorer::Config;
    ///
    /// let config = Config::from_toml_str("search_debounce_ms = 500").unwrap();
    /// assert_eq!(config.search_debounce_ms, 500);
    /// assert_eq!(config.base_url, "https://rickandmortyapi.com/api");
    /// ```
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ExplorerError::Config(e.to_string()))
    }

    /// Loads the configuration file at `path`; a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Loads the configuration from the platform config directory.
    ///
    /// # Errors
    ///
    /// See [`Config::load_from`].
    pub fn load() -> Result<Self> {
        Self::load_from(&infrastructure::get_config_path())
    }

    /// Resolved data directory.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(infrastructure::get_data_dir)
    }

    /// Path of the favorites store.
    #[must_use]
    pub fn favorites_path(&self) -> PathBuf {
        self.data_dir().join(infrastructure::FAVORITES_FILE)
    }

    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

/// Initializes the explorer with configuration.
///
/// Creates the catalog client, installs the process-wide favorites store and
/// returns a [`Runtime`] holding a fresh, hidden list.
///
/// # Errors
///
/// Returns an error if `base_url` is invalid or the favorites store cannot be
/// opened.
pub fn initialize(config: &Config) -> Result<Runtime> {
    tracing::debug!(base_url = %config.base_url, "initializing explorer");

    let api = api::ApiClient::new(config.base_url.clone())?;
    let favorites = storage::init_favorites(config.favorites_path())?;

    Ok(Runtime::new(Arc::new(api), favorites))
}
