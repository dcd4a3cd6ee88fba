//! Tracing initialization and subscriber setup.

use super::file_writer::RotatingFile;
use crate::infrastructure::paths::LOG_FILE;
use crate::Config;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive when no level is configured.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Initializes the tracing subscriber with a rotating log file.
///
/// Sets up a subscriber pipeline that:
/// 1. Filters spans and events by the configured trace level
/// 2. Formats them with the fmt layer (no ANSI colors)
/// 3. Writes to `<data_dir>/explorer.log`, rotating at 10 MB with 3 backups
///
/// # Trace Level Resolution
///
/// `config.trace_level` if set, otherwise `"info"`. Any `EnvFilter` directive
/// is accepted, e.g. `"rickmorty_explorer=debug,reqwest=warn"`; an invalid
/// directive falls back to the default.
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Silently skips setup if directory creation fails (logging is optional)
/// - Idempotent: safe to call multiple times (only the first call takes effect)
///
/// # Example
///
/// ```rust
/// use rickmorty_explorer::observability::init_tracing;
/// use rickmorty_explorer::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     data_dir: Some(std::env::temp_dir().join("rickmorty-explorer-doc")),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);

    let data_dir = config.data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_TRACE_LEVEL));

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(RotatingFile::new(data_dir.join(LOG_FILE)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();

    tracing::debug!(level = %level, "tracing initialized");
}
