//! Completion messages sent from background tasks to the state-owning context.
//!
//! Background tasks never touch state. Each finished [`Action`](crate::app::Action)
//! is reported as one [`WorkerResponse`], wrapped in
//! [`Event::WorkerResponse`](crate::app::Event::WorkerResponse) and applied by
//! the reducer in delivery order.

use crate::app::{CancelScope, DetailSession, RequestId};
use crate::domain::{ApiError, Character, CharacterId, Episode, StoreError};
use std::collections::HashSet;

/// Outcome of one background operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    /// A character page was fetched.
    ///
    /// Filtered "not found" pages arrive here with an empty `characters`.
    CharactersLoaded {
        scope: CancelScope,
        request: RequestId,
        characters: Vec<Character>,
    },

    /// A character page could not be fetched.
    CharactersFailed {
        scope: CancelScope,
        request: RequestId,
        error: ApiError,
    },

    /// An episode requested from the detail screen `session` arrived.
    EpisodeLoaded {
        session: DetailSession,
        character_id: CharacterId,
        episode: Episode,
    },

    EpisodeFailed {
        session: DetailSession,
        character_id: CharacterId,
        error: ApiError,
    },

    /// A favorite mutation was made durable. `is_favorite` is the membership
    /// read back from the store afterwards.
    FavoriteUpdated {
        session: DetailSession,
        character_id: CharacterId,
        is_favorite: bool,
    },

    FavoriteFailed {
        session: DetailSession,
        character_id: CharacterId,
        error: StoreError,
    },

    /// Current favorite set as read from the store.
    FavoritesLoaded { ids: HashSet<CharacterId> },
}

impl WorkerResponse {
    /// Short name used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::CharactersLoaded { .. } => "characters_loaded",
            Self::CharactersFailed { .. } => "characters_failed",
            Self::EpisodeLoaded { .. } => "episode_loaded",
            Self::EpisodeFailed { .. } => "episode_failed",
            Self::FavoriteUpdated { .. } => "favorite_updated",
            Self::FavoriteFailed { .. } => "favorite_failed",
            Self::FavoritesLoaded { .. } => "favorites_loaded",
        }
    }
}
