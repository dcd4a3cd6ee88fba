//! Storage backend abstraction.
//!
//! This module defines the [`Storage`] trait that abstracts over persistence
//! backends for favorites. The trait is synchronous and minimal: each method
//! maps to one use case of [`FavoritesStore`](crate::storage::FavoritesStore),
//! which owns the backend and serializes access to it.

use crate::domain::error::Result;
use crate::domain::CharacterId;
use crate::storage::models::FavoriteRecord;

/// Abstraction over persistent favorites backends.
///
/// Implementations hold one record type keyed by character id and look it up
/// by exact match on that id. Mutations must be durable before they return
/// `Ok`, and a failed mutation must leave the backend unchanged.
///
/// # Implementations
///
/// - [`JsonStorage`](crate::storage::JsonStorage): JSON file with atomic writes (default)
///
/// # Examples
///
/// ```no_run
/// use rickmorty_explorer::storage::{FavoriteRecord, JsonStorage, Storage};
/// use std::path::PathBuf;
///
/// let mut storage = JsonStorage::new(PathBuf::from("/tmp/favorites.json"))?;
/// storage.insert_favorite(&FavoriteRecord::new(1))?;
/// assert!(storage.get_favorite(1)?.is_some());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Storage: Send {
    /// Retrieves every stored favorite, in ascending id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn get_all_favorites(&self) -> Result<Vec<FavoriteRecord>>;

    /// Retrieves the favorite for `character_id`, if stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the read operation fails.
    fn get_favorite(&self, character_id: CharacterId) -> Result<Option<FavoriteRecord>>;

    /// Inserts a favorite.
    ///
    /// Returns `Ok(false)` without writing if the id is already stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be made durable.
    fn insert_favorite(&mut self, record: &FavoriteRecord) -> Result<bool>;

    /// Deletes the favorite for `character_id`.
    ///
    /// Returns `Ok(false)` without writing if the id is not stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be made durable.
    fn delete_favorite(&mut self, character_id: CharacterId) -> Result<bool>;
}
