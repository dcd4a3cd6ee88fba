//! Process-wide favorites store.
//!
//! The store is set up once at startup with [`init_favorites`] and lives for
//! the rest of the process; there is no teardown. [`favorites`] must not be
//! called before initialization and reports an error if it is.

use crate::domain::error::{ExplorerError, Result};
use crate::storage::favorites::FavoritesStore;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

static FAVORITES: OnceLock<Arc<FavoritesStore>> = OnceLock::new();

/// Opens the JSON favorites store at `path` and installs it process-wide.
///
/// Calling this again after a successful initialization returns the
/// installed store and ignores `path`.
///
/// # Errors
///
/// Returns an error if the store file exists but cannot be read or parsed.
pub fn init_favorites(path: PathBuf) -> Result<Arc<FavoritesStore>> {
    if let Some(store) = FAVORITES.get() {
        tracing::debug!("favorites store already initialized");
        return Ok(Arc::clone(store));
    }

    tracing::debug!(path = ?path, "initializing process-wide favorites store");
    let store = Arc::new(FavoritesStore::open(path)?);

    Ok(Arc::clone(FAVORITES.get_or_init(|| store)))
}

/// Returns the process-wide favorites store.
///
/// # Errors
///
/// Returns [`ExplorerError::Storage`] if [`init_favorites`] has not run yet.
pub fn favorites() -> Result<Arc<FavoritesStore>> {
    FAVORITES
        .get()
        .cloned()
        .ok_or_else(|| ExplorerError::Storage("favorites store not initialized".to_string()))
}
