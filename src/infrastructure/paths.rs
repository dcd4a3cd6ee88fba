//! Platform directories for explorer data and configuration.
//!
//! Both directories live under the platform conventions resolved by `dirs`
//! (`~/.local/share` and `~/.config` on Linux). When the platform has no such
//! directory, the current directory is used so the explorer still runs.

use std::path::PathBuf;

/// Directory name used under the platform data and config directories.
pub const APP_DIR_NAME: &str = "rickmorty-explorer";

/// File name of the favorites store inside the data directory.
pub const FAVORITES_FILE: &str = "favorites.json";

/// File name of the log file inside the data directory.
pub const LOG_FILE: &str = "explorer.log";

/// File name of the configuration file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Returns the data directory holding the favorites store and logs.
///
/// # Examples
///
/// ```
/// use rickmorty_explorer::infrastructure::get_data_dir;
///
/// assert!(get_data_dir().ends_with("rickmorty-explorer"));
/// ```
#[must_use]
pub fn get_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Returns the directory searched for `config.toml`.
#[must_use]
pub fn get_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Returns the default configuration file path.
#[must_use]
pub fn get_config_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILE)
}
