//! JSON file-based storage backend.
//!
//! This module provides a small, human-readable favorites store. Every
//! mutation is written to a temporary file, synced, and atomically renamed
//! over the store file before it reports success, so a crash never leaves a
//! torn file behind.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(log n) - the whole dataset is kept in memory
//! - **Write**: O(n) - serializes and writes the entire dataset
//! - **Best for**: a few thousand favorites, user-paced writes

use crate::domain::error::{ExplorerError, Result};
use crate::domain::CharacterId;
use crate::storage::backend::Storage;
use crate::storage::models::FavoriteRecord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Current on-disk format version.
const STORAGE_VERSION: u32 = 1;

/// JSON storage container format.
///
/// Top-level structure serialized to disk. Favorites are keyed by character
/// id so lookups are exact-match on the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format.
    version: u32,

    /// Stored favorites, keyed by character id.
    #[serde(default)]
    favorites: BTreeMap<CharacterId, FavoriteRecord>,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: STORAGE_VERSION,
            favorites: BTreeMap::new(),
        }
    }
}

/// JSON file storage backend.
///
/// The dataset is loaded once on creation and kept in memory; each mutation
/// persists the whole dataset.
///
/// # Thread Safety
///
/// This type is `Send` but not `Sync`. Callers serialize access to it, which
/// [`FavoritesStore`](crate::storage::FavoritesStore) does with an async mutex.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "favorites": {
///     "1": { "character_id": 1 },
///     "42": { "character_id": 42 }
///   }
/// }
/// ```
#[derive(Debug)]
pub struct JsonStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory copy of the persisted data.
    data: StorageData,
}

impl JsonStorage {
    /// Creates or opens a JSON storage backend.
    ///
    /// If the file exists, loads existing data. Otherwise starts empty; the
    /// file is created on the first mutation. Parent directories are created
    /// automatically.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = if file_path.exists() {
            Self::load_from_file(&file_path)?
        } else {
            tracing::debug!("initializing new empty storage");
            StorageData::default()
        };

        tracing::debug!(favorite_count = data.favorites.len(), "storage initialized");

        Ok(Self { file_path, data })
    }

    /// Loads storage data from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| ExplorerError::Storage(format!("failed to parse JSON: {e}")))?;

        if data.version != STORAGE_VERSION {
            return Err(ExplorerError::Storage(format!(
                "unsupported storage version {}",
                data.version
            )));
        }

        tracing::debug!(
            version = data.version,
            favorites = data.favorites.len(),
            "loaded storage data"
        );

        Ok(data)
    }

    /// Saves storage data to disk using an atomic, synced write.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temporary write, the sync, or
    /// the rename fails.
    fn save_to_file(&self) -> Result<()> {
        tracing::debug!(path = ?self.file_path, "saving storage data");

        let json = serde_json::to_vec_pretty(&self.data)
            .map_err(|e| ExplorerError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        {
            let mut file = std::fs::File::create(&tmp_path)?;
            file.write_all(&json)?;
            file.sync_all()?;
        }

        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!("storage saved successfully");
        Ok(())
    }
}

impl Storage for JsonStorage {
    fn get_all_favorites(&self) -> Result<Vec<FavoriteRecord>> {
        let favorites: Vec<FavoriteRecord> = self.data.favorites.values().copied().collect();
        tracing::debug!(count = favorites.len(), "retrieved favorites");
        Ok(favorites)
    }

    fn get_favorite(&self, character_id: CharacterId) -> Result<Option<FavoriteRecord>> {
        Ok(self.data.favorites.get(&character_id).copied())
    }

    fn insert_favorite(&mut self, record: &FavoriteRecord) -> Result<bool> {
        let _span = tracing::debug_span!("json_insert_favorite",
            character_id = record.character_id
        ).entered();

        if self.data.favorites.contains_key(&record.character_id) {
            tracing::debug!("favorite already stored, skipping write");
            return Ok(false);
        }

        self.data.favorites.insert(record.character_id, *record);

        if let Err(e) = self.save_to_file() {
            self.data.favorites.remove(&record.character_id);
            return Err(e);
        }

        tracing::debug!("favorite inserted");
        Ok(true)
    }

    fn delete_favorite(&mut self, character_id: CharacterId) -> Result<bool> {
        let _span = tracing::debug_span!("json_delete_favorite",
            character_id = character_id
        ).entered();

        let Some(removed) = self.data.favorites.remove(&character_id) else {
            tracing::debug!("favorite not stored, skipping write");
            return Ok(false);
        };

        if let Err(e) = self.save_to_file() {
            self.data.favorites.insert(character_id, removed);
            return Err(e);
        }

        tracing::debug!("favorite deleted");
        Ok(true)
    }
}
