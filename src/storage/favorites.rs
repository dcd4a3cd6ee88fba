//! Favorites store: the single shared mutable resource of the explorer.
//!
//! [`FavoritesStore`] wraps a [`Storage`] backend behind an async mutex so
//! writes are serialized, and keeps a cached membership set for cheap
//! synchronous reads. The cache is only ever updated while the backend lock
//! is held and only after the backend confirmed a durable write, so readers
//! never observe a membership the disk does not have.

use crate::domain::error::Result;
use crate::domain::{CharacterId, StoreError};
use crate::storage::backend::Storage;
use crate::storage::json::JsonStorage;
use crate::storage::models::FavoriteRecord;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::Mutex;

/// Serialized access to the favorites backend with a cached membership set.
pub struct FavoritesStore {
    storage: Arc<Mutex<Box<dyn Storage>>>,
    cache: RwLock<HashSet<CharacterId>>,
}

impl FavoritesStore {
    /// Wraps `storage`, loading the current membership into the cache.
    ///
    /// A backend that cannot be read yields an empty cache; the failure is
    /// logged and the store stays usable for writes.
    #[must_use]
    pub fn new(storage: Box<dyn Storage>) -> Self {
        let ids = match load_ids(&*storage) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load favorites, starting empty");
                HashSet::new()
            }
        };

        tracing::debug!(favorite_count = ids.len(), "favorites store ready");

        Self {
            storage: Arc::new(Mutex::new(storage)),
            cache: RwLock::new(ids),
        }
    }

    /// Opens a JSON-backed store at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON file exists but cannot be read or parsed.
    pub fn open(path: PathBuf) -> Result<Self> {
        Ok(Self::new(Box::new(JsonStorage::new(path)?)))
    }

    /// Current membership, as last confirmed by the backend.
    #[must_use]
    pub fn list(&self) -> HashSet<CharacterId> {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Whether `id` is currently a favorite.
    #[must_use]
    pub fn contains(&self, id: CharacterId) -> bool {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&id)
    }

    /// Adds `id` to the favorites. Adding a present id succeeds without writing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SaveFailed`] if the write cannot be made durable.
    pub async fn add(&self, id: CharacterId) -> std::result::Result<(), StoreError> {
        let written = self
            .with_storage(move |storage| storage.insert_favorite(&FavoriteRecord::new(id)), |ids| {
                ids.insert(id);
            })
            .await
            .map_err(StoreError::SaveFailed)?;

        tracing::debug!(character_id = id, written = written, "favorite added");
        Ok(())
    }

    /// Removes `id` from the favorites. Removing an absent id succeeds without writing.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DeleteFailed`] if the write cannot be made durable.
    pub async fn remove(&self, id: CharacterId) -> std::result::Result<(), StoreError> {
        let written = self
            .with_storage(move |storage| storage.delete_favorite(id), |ids| {
                ids.remove(&id);
            })
            .await
            .map_err(StoreError::DeleteFailed)?;

        tracing::debug!(character_id = id, written = written, "favorite removed");
        Ok(())
    }

    /// Re-reads the backend, replaces the cached membership and returns it.
    ///
    /// Waits for any write in progress, so the result is never older than a
    /// mutation that already completed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::FetchFailed`] if the backend cannot be read; the
    /// cache is left untouched.
    pub async fn reload(&self) -> std::result::Result<HashSet<CharacterId>, StoreError> {
        let storage = self.storage.lock().await;
        let ids = load_ids(&**storage).map_err(|e| StoreError::FetchFailed(e.to_string()))?;
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        cache.clone_from(&ids);
        drop(cache);
        drop(storage);
        Ok(ids)
    }

    /// Runs a blocking backend mutation under the backend lock, then applies
    /// `update` to the cache before releasing the lock.
    async fn with_storage<F, U>(&self, op: F, update: U) -> std::result::Result<bool, String>
    where
        F: FnOnce(&mut Box<dyn Storage>) -> Result<bool> + Send + 'static,
        U: FnOnce(&mut HashSet<CharacterId>),
    {
        let mut guard = Arc::clone(&self.storage).lock_owned().await;

        let (guard, outcome) = tokio::task::spawn_blocking(move || {
            let outcome = op(&mut *guard);
            (guard, outcome)
        })
        .await
        .map_err(|e| format!("storage task failed: {e}"))?;

        let written = outcome.map_err(|e| e.to_string())?;
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        update(&mut *cache);
        drop(cache);
        drop(guard);

        Ok(written)
    }
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesStore")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

fn load_ids(storage: &dyn Storage) -> Result<HashSet<CharacterId>> {
    Ok(storage
        .get_all_favorites()?
        .into_iter()
        .map(|record| record.character_id)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExplorerError;
    use tempfile::TempDir;

    /// Backend whose writes always fail.
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get_all_favorites(&self) -> Result<Vec<FavoriteRecord>> {
            Ok(vec![FavoriteRecord::new(5)])
        }

        fn get_favorite(&self, character_id: CharacterId) -> Result<Option<FavoriteRecord>> {
            Ok((character_id == 5).then(|| FavoriteRecord::new(5)))
        }

        fn insert_favorite(&mut self, _record: &FavoriteRecord) -> Result<bool> {
            Err(ExplorerError::Storage("disk full".to_string()))
        }

        fn delete_favorite(&mut self, _character_id: CharacterId) -> Result<bool> {
            Err(ExplorerError::Storage("read-only".to_string()))
        }
    }

    #[tokio::test]
    async fn add_and_remove_update_membership() {
        let dir = TempDir::new().unwrap();
        let store = FavoritesStore::open(dir.path().join("favorites.json")).unwrap();

        store.add(1).await.unwrap();
        store.add(2).await.unwrap();
        assert_eq!(store.list(), HashSet::from([1, 2]));

        store.remove(1).await.unwrap();
        assert!(!store.contains(1));
        assert!(store.contains(2));
    }

    #[tokio::test]
    async fn repeated_calls_are_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FavoritesStore::open(dir.path().join("favorites.json")).unwrap();

        store.add(3).await.unwrap();
        store.add(3).await.unwrap();
        assert_eq!(store.list(), HashSet::from([3]));

        store.remove(3).await.unwrap();
        store.remove(3).await.unwrap();
        assert!(store.list().is_empty());
    }

    #[tokio::test]
    async fn membership_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("favorites.json");

        {
            let store = FavoritesStore::open(path.clone()).unwrap();
            store.add(10).await.unwrap();
            store.add(11).await.unwrap();
            store.remove(10).await.unwrap();
        }

        let store = FavoritesStore::open(path).unwrap();
        assert_eq!(store.list(), HashSet::from([11]));
    }

    #[tokio::test]
    async fn failed_writes_map_to_store_errors() {
        let store = FavoritesStore::new(Box::new(BrokenStorage));
        assert!(store.contains(5));

        let err = store.add(6).await.unwrap_err();
        assert_eq!(err, StoreError::SaveFailed("Storage error: disk full".to_string()));
        assert!(!store.contains(6));

        let err = store.remove(5).await.unwrap_err();
        assert!(matches!(err, StoreError::DeleteFailed(_)));
        assert!(store.contains(5));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writes_keep_file_valid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("favorites.json");
        let store = Arc::new(FavoritesStore::open(path.clone()).unwrap());

        let tasks: Vec<_> = (0..16)
            .map(|id| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.add(id).await })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(store.list().len(), 16);
        let reopened = FavoritesStore::open(path).unwrap();
        assert_eq!(reopened.list(), store.list());
    }

    #[tokio::test]
    async fn reload_replaces_cache() {
        let store = FavoritesStore::new(Box::new(BrokenStorage));
        assert_eq!(store.reload().await.unwrap(), HashSet::from([5]));
        assert_eq!(store.list(), HashSet::from([5]));
    }
}
