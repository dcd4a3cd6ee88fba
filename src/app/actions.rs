//! Commands emitted by the reducers for the effect executor.
//!
//! The reducers never perform I/O. Every side effect they need is returned as
//! an [`Action`]; the [`Worker`](crate::worker::Worker) runs it and reports the
//! outcome back as a [`WorkerResponse`](crate::worker::WorkerResponse) event.
//!
//! # Example
//!
//! ```rust
//! use rickmorty_explorer::app::{handle_event, Action, Event, ListState};
//!
//! let mut state = ListState::new();
//! let (_, actions) = handle_event(&mut state, Event::VisibilityToggled);
//! assert!(matches!(actions.last(), Some(Action::FetchCharacters { page: 1, .. })));
//! ```

use crate::app::detail::DetailSession;
use crate::app::scopes::{CancelScope, RequestId};
use crate::domain::CharacterId;

/// Side effects requested by a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Fetches one page of characters under a cancellation scope.
    ///
    /// The completion is reported with the same `scope` and `request` so the
    /// reducer can drop it if the request was cancelled in the meantime.
    FetchCharacters {
        scope: CancelScope,
        request: RequestId,
        /// 1-based page number.
        page: u32,
        /// Name filter; `None` fetches unfiltered.
        filter: Option<String>,
    },

    /// Aborts every in-flight fetch of a scope.
    Cancel(CancelScope),

    /// Fetches a single episode for the detail screen `session`.
    FetchEpisode {
        session: DetailSession,
        character_id: CharacterId,
        url: String,
    },

    /// Marks a character as favorite on behalf of the detail screen `session`.
    AddFavorite {
        session: DetailSession,
        character_id: CharacterId,
    },

    /// Unmarks a character as favorite.
    RemoveFavorite {
        session: DetailSession,
        character_id: CharacterId,
    },

    /// Re-reads the favorite set from the store.
    LoadFavorites,
}

impl Action {
    /// Builds a character fetch, normalizing an empty filter to `None`.
    #[must_use]
    pub fn fetch_characters(
        scope: CancelScope,
        request: RequestId,
        page: u32,
        filter: &str,
    ) -> Self {
        Self::FetchCharacters {
            scope,
            request,
            page,
            filter: crate::api::normalize_filter(Some(filter)).map(str::to_string),
        }
    }
}
