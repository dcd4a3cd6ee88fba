//! Character detail state machine.
//!
//! The detail screen holds a snapshot of one [`Character`] and a cached
//! favorite flag. The flag is never flipped optimistically: a toggle only
//! issues the store mutation, and the flag changes when the worker reports
//! the confirmed membership read back from the store.
//!
//! Each opened screen gets its own [`DetailSession`]. Every effect it issues
//! carries that session, and a completion is only applied to the screen that
//! issued it: reopening the same character starts a new session.

use crate::app::alert::Alert;
use crate::app::episode::{EpisodeDelegate, EpisodeDetailState, EpisodeEvent};
use crate::app::Action;
use crate::domain::{episode_number, ApiError, Character, Episode, StoreError};
use crate::ui::viewmodel::{AlertView, DetailViewModel, EpisodeLink};
use std::fmt;

/// Identifier of one presentation of the character screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DetailSession(pub u64);

impl fmt::Display for DetailSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "detail-{}", self.0)
    }
}

/// State of an open character screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterDetailState {
    pub session: DetailSession,
    pub character: Character,
    pub is_favorite: bool,
    pub alert: Option<Alert>,
    /// Present exactly while the episode screen is shown.
    pub episode: Option<EpisodeDetailState>,
}

/// Intents raised on the character screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailEvent {
    FavoriteToggled,
    /// Opens the episode at the given URL once it has been fetched.
    EpisodeSelected(String),
    /// Intent raised inside the episode screen.
    Episode(EpisodeEvent),
    EpisodeDismissed,
    AlertDismissed,
}

impl CharacterDetailState {
    #[must_use]
    pub const fn new(session: DetailSession, character: Character, is_favorite: bool) -> Self {
        Self {
            session,
            character,
            is_favorite,
            alert: None,
            episode: None,
        }
    }

    /// Applies the store's confirmed membership after a successful toggle.
    pub fn apply_favorite_updated(&mut self, is_favorite: bool) {
        tracing::debug!(
            character_id = self.character.id,
            is_favorite = is_favorite,
            "favorite flag synchronized"
        );
        self.is_favorite = is_favorite;
    }

    /// A failed store mutation leaves the flag alone and raises an alert.
    pub fn apply_favorite_failed(&mut self, error: &StoreError) {
        tracing::warn!(character_id = self.character.id, error = %error, "favorite toggle failed");
        self.alert = Some(Alert::detail_error(ApiError::InvalidData));
    }

    pub fn apply_episode_loaded(&mut self, episode: Episode) {
        tracing::debug!(episode_id = episode.id, "presenting episode");
        self.episode = Some(EpisodeDetailState::new(episode));
    }

    pub fn apply_episode_failed(&mut self, error: ApiError) {
        tracing::warn!(character_id = self.character.id, error = %error, "episode fetch failed");
        self.alert = Some(Alert::detail_error(error));
    }

    #[must_use]
    pub fn compute_viewmodel(&self) -> DetailViewModel {
        let character = &self.character;
        DetailViewModel {
            id: character.id,
            name: character.name.clone(),
            status: character.status.clone(),
            gender: character.gender.clone(),
            origin: character.origin.name.clone(),
            location: character.location.name.clone(),
            image: character.image.clone(),
            is_favorite: self.is_favorite,
            episodes: character
                .episodes
                .iter()
                .map(|url| EpisodeLink {
                    number: episode_number(url).to_string(),
                    url: url.clone(),
                })
                .collect(),
            alert: self.alert.as_ref().map(AlertView::from),
            episode: self.episode.as_ref().map(EpisodeDetailState::compute_viewmodel),
        }
    }
}

/// Processes a detail intent. Returns whether a re-render is needed and the
/// side effects to run.
pub fn handle_detail_event(
    state: &mut CharacterDetailState,
    event: DetailEvent,
) -> (bool, Vec<Action>) {
    let session = state.session;
    let character_id = state.character.id;
    let _span = tracing::debug_span!(
        "handle_detail_event",
        session = %session,
        character_id = character_id,
        event = ?event
    )
    .entered();

    match event {
        DetailEvent::FavoriteToggled => {
            let action = if state.is_favorite {
                Action::RemoveFavorite { session, character_id }
            } else {
                Action::AddFavorite { session, character_id }
            };
            (false, vec![action])
        }
        DetailEvent::EpisodeSelected(url) => (
            false,
            vec![Action::FetchEpisode {
                session,
                character_id,
                url,
            }],
        ),
        DetailEvent::Episode(event) => {
            let Some(episode) = state.episode.as_ref() else {
                tracing::debug!("no episode presented, ignoring");
                return (false, vec![]);
            };
            match episode.handle(event) {
                EpisodeDelegate::Dismiss => handle_detail_event(state, DetailEvent::EpisodeDismissed),
            }
        }
        DetailEvent::EpisodeDismissed => {
            let was_open = state.episode.take().is_some();
            (was_open, vec![])
        }
        DetailEvent::AlertDismissed => {
            let had_alert = state.alert.take().is_some();
            (had_alert, vec![])
        }
    }
}

impl From<&Alert> for AlertView {
    fn from(alert: &Alert) -> Self {
        Self {
            title: alert.title.clone(),
            message: alert.message.clone(),
            button: alert.button.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Place;

    fn rick() -> Character {
        Character {
            id: 1,
            name: "Rick Sanchez".to_string(),
            status: "Alive".to_string(),
            gender: "Male".to_string(),
            origin: Place { name: "Earth (C-137)".to_string() },
            location: Place { name: "Citadel of Ricks".to_string() },
            image: "https://rickandmortyapi.com/api/character/avatar/1.jpeg".to_string(),
            episodes: vec![
                "https://rickandmortyapi.com/api/episode/1".to_string(),
                "https://rickandmortyapi.com/api/episode/28".to_string(),
            ],
        }
    }

    const SESSION: DetailSession = DetailSession(7);

    fn pilot() -> Episode {
        Episode {
            id: 1,
            name: "Pilot".to_string(),
            air_date: "December 2, 2013".to_string(),
            code: "S01E01".to_string(),
            characters: vec![],
        }
    }

    #[test]
    fn toggle_issues_one_mutation_without_flipping_flag() {
        let mut state = CharacterDetailState::new(SESSION, rick(), false);
        let (_, actions) = handle_detail_event(&mut state, DetailEvent::FavoriteToggled);
        assert_eq!(actions, vec![Action::AddFavorite { session: SESSION, character_id: 1 }]);
        assert!(!state.is_favorite);

        state.apply_favorite_updated(true);
        let (_, actions) = handle_detail_event(&mut state, DetailEvent::FavoriteToggled);
        assert_eq!(actions, vec![Action::RemoveFavorite { session: SESSION, character_id: 1 }]);
        assert!(state.is_favorite);
    }

    #[test]
    fn failed_toggle_keeps_flag_and_raises_alert() {
        let mut state = CharacterDetailState::new(SESSION, rick(), false);
        state.apply_favorite_failed(&StoreError::SaveFailed("disk full".to_string()));

        assert!(!state.is_favorite);
        let alert = state.alert.clone().unwrap();
        assert_eq!(alert.title, "Error occurred!");
        assert_eq!(alert.message, "Data is invalid, try again.");

        let (changed, _) = handle_detail_event(&mut state, DetailEvent::AlertDismissed);
        assert!(changed);
        assert!(state.alert.is_none());
        assert!(!state.is_favorite);
    }

    #[test]
    fn episode_opens_only_after_fetch() {
        let mut state = CharacterDetailState::new(SESSION, rick(), false);
        let url = "https://rickandmortyapi.com/api/episode/1".to_string();

        let (_, actions) = handle_detail_event(&mut state, DetailEvent::EpisodeSelected(url.clone()));
        assert_eq!(
            actions,
            vec![Action::FetchEpisode {
                session: SESSION,
                character_id: 1,
                url
            }]
        );
        assert!(state.episode.is_none());

        state.apply_episode_loaded(pilot());
        assert_eq!(state.episode.as_ref().map(|e| e.episode.id), Some(1));
    }

    #[test]
    fn failed_episode_fetch_keeps_screen_closed() {
        let mut state = CharacterDetailState::new(SESSION, rick(), false);
        state.apply_episode_failed(ApiError::WrongUrl);
        assert!(state.episode.is_none());
        assert_eq!(
            state.alert.as_ref().map(|a| a.message.as_str()),
            Some("Wrong URL. Cannot download data.")
        );
    }

    #[test]
    fn close_tapped_bubbles_to_dismiss() {
        let mut state = CharacterDetailState::new(SESSION, rick(), false);
        state.apply_episode_loaded(pilot());

        let (changed, actions) =
            handle_detail_event(&mut state, DetailEvent::Episode(EpisodeEvent::CloseTapped));
        assert!(changed);
        assert!(actions.is_empty());
        assert!(state.episode.is_none());
    }

    #[test]
    fn viewmodel_labels_episodes_by_number() {
        let state = CharacterDetailState::new(SESSION, rick(), true);
        let vm = state.compute_viewmodel();
        let numbers: Vec<&str> = vm.episodes.iter().map(|e| e.number.as_str()).collect();
        assert_eq!(numbers, vec!["1", "28"]);
        assert_eq!(vm.origin, "Earth (C-137)");
        assert!(vm.is_favorite);
    }
}
