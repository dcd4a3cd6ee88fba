//! Storage record models for the persistence layer.
//!
//! Records are kept separate from domain types so the on-disk shape can stay
//! stable while the catalog model evolves.

use crate::domain::CharacterId;
use serde::{Deserialize, Serialize};

/// A persisted favorite.
///
/// Membership is the only fact tracked: the record holds the character id and
/// nothing else (no timestamp, no ordering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavoriteRecord {
    /// Identifier of the favorited character.
    pub character_id: CharacterId,
}

impl FavoriteRecord {
    /// Creates a record for `character_id`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rickmorty_explorer::storage::FavoriteRecord;
    ///
    /// let record = FavoriteRecord::new(42);
    /// assert_eq!(record.character_id, 42);
    /// ```
    #[must_use]
    pub const fn new(character_id: CharacterId) -> Self {
        Self { character_id }
    }
}
