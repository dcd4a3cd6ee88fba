//! Character list state.
//!
//! [`ListState`] is created once at startup and owned by the
//! [`Runtime`](crate::runtime::Runtime) for the process lifetime. Only
//! [`handle_event`](crate::app::handle_event) mutates it.

use crate::app::alert::Alert;
use crate::app::detail::{CharacterDetailState, DetailSession};
use crate::app::scopes::{CancelScope, ScopeRegistry};
use crate::app::Action;
use crate::domain::{Character, CharacterId};
use crate::ui::viewmodel::{AlertView, CharacterCard, ListViewModel};
use std::collections::HashSet;

/// State of the character list screen.
///
/// # Invariants
///
/// - `page` starts at 1, only moves forward while visible, and resets to 1
///   when the list is shown again or a search is triggered.
/// - `characters` holds fetched pages in completion order, duplicates included.
/// - `favorites` is a projection of the favorites store, replaced wholesale
///   whenever the store is re-read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    pub is_visible: bool,
    pub page: u32,
    pub characters: Vec<Character>,
    pub search_text: String,
    pub favorites: HashSet<CharacterId>,
    pub alert: Option<Alert>,
    pub detail: Option<CharacterDetailState>,
    pub scopes: ScopeRegistry,
    next_session: u64,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            is_visible: false,
            page: 1,
            characters: Vec::new(),
            search_text: String::new(),
            favorites: HashSet::new(),
            alert: None,
            detail: None,
            scopes: ScopeRegistry::new(),
            next_session: 0,
        }
    }

    /// Whether a bottom-reached intent may fetch the next page.
    #[must_use]
    pub fn should_allow_pagination(&self) -> bool {
        self.is_visible && !self.characters.is_empty()
    }

    /// Whether any character fetch is still awaiting completion.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        !self.scopes.is_idle()
    }

    /// First accumulated character with the given id.
    #[must_use]
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Replaces the favorites projection and re-syncs an open detail screen.
    pub fn apply_favorites(&mut self, ids: HashSet<CharacterId>) {
        if let Some(detail) = self.detail.as_mut() {
            detail.is_favorite = ids.contains(&detail.character.id);
        }
        self.favorites = ids;
    }

    /// Presents a fresh detail screen for `character` under a new session.
    pub(crate) fn open_detail(&mut self, character: Character) -> DetailSession {
        self.next_session += 1;
        let session = DetailSession(self.next_session);
        let is_favorite = self.favorites.contains(&character.id);
        self.detail = Some(CharacterDetailState::new(session, character, is_favorite));
        session
    }

    pub(crate) fn reset_results(&mut self) {
        self.page = 1;
        self.characters.clear();
    }

    pub(crate) fn cancel_scopes(&mut self, scopes: &[CancelScope]) -> Vec<Action> {
        scopes
            .iter()
            .map(|&scope| {
                if self.scopes.cancel(scope) {
                    tracing::debug!(scope = %scope, "cancelled outstanding fetches");
                }
                Action::Cancel(scope)
            })
            .collect()
    }

    /// Computes the view model for the renderer.
    #[must_use]
    pub fn compute_viewmodel(&self) -> ListViewModel {
        let cards = if self.is_visible {
            self.characters
                .iter()
                .map(|c| CharacterCard {
                    id: c.id,
                    name: c.name.clone(),
                    status: c.status.clone(),
                    is_favorite: self.favorites.contains(&c.id),
                })
                .collect()
        } else {
            Vec::new()
        };

        ListViewModel {
            visible: self.is_visible,
            page: self.page,
            search_text: self.search_text.clone(),
            cards,
            loading: self.is_loading(),
            alert: self.alert.as_ref().map(AlertView::from),
            detail: self.detail.as_ref().map(CharacterDetailState::compute_viewmodel),
        }
    }
}
