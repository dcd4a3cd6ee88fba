//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single pure transition function of the explorer:
//! it applies one [`Event`] to the [`ListState`] and returns the side effects
//! to execute. User intents and background completions are both events, so
//! every mutation happens in the order events are delivered.
//!
//! # Architecture
//!
//! ```text
//! Front end ──intents──▶ handle_event ──actions──▶ Worker
//!                             ▲                      │
//!                             └──── WorkerResponse ──┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use rickmorty_explorer::app::{handle_event, Event, ListState};
//!
//! let mut state = ListState::new();
//! let (rerender, actions) = handle_event(&mut state, Event::VisibilityToggled);
//! assert!(rerender);
//! assert_eq!(actions.len(), 1);
//! ```

use crate::app::alert::Alert;
use crate::app::detail::{handle_detail_event, CharacterDetailState, DetailEvent, DetailSession};
use crate::app::scopes::CancelScope;
use crate::app::{Action, ListState};
use crate::domain::CharacterId;
use crate::worker::WorkerResponse;

/// Events applied to the list state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The list screen appeared; re-reads the favorites projection.
    Appeared,
    /// Shows a hidden list or hides a visible one.
    VisibilityToggled,
    /// The user scrolled to the last row.
    ReachedBottom,
    /// The search field changed. Does not fetch on its own.
    SearchTextChanged(String),
    /// Debounced search trigger raised by the front end.
    SearchTriggered,
    SearchCleared,
    AlertDismissed,
    /// Opens the detail screen of a listed character.
    CharacterSelected(CharacterId),
    DetailDismissed,
    /// Intent raised inside the open detail screen.
    Detail(DetailEvent),
    /// Completion of a background operation.
    WorkerResponse(WorkerResponse),
}

/// Scopes a new search supersedes. The initial fetch is included so that a
/// first page still in flight cannot land in front of the search results.
const SEARCH_SUPERSEDES: [CancelScope; 3] = [
    CancelScope::InitialFetch,
    CancelScope::PaginationFetch,
    CancelScope::SearchFetch,
];

/// Processes one event and returns whether a re-render is needed, along with
/// the actions to execute.
pub fn handle_event(state: &mut ListState, event: Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::Appeared => (false, vec![Action::LoadFavorites]),
        Event::VisibilityToggled => toggle_visibility(state),
        Event::ReachedBottom => {
            if !state.should_allow_pagination() {
                tracing::debug!(
                    visible = state.is_visible,
                    count = state.characters.len(),
                    "pagination not allowed"
                );
                return (false, vec![]);
            }

            state.page += 1;
            let request = state.scopes.begin(CancelScope::PaginationFetch);
            tracing::debug!(page = state.page, request = %request, "fetching next page");

            (
                true,
                vec![Action::fetch_characters(
                    CancelScope::PaginationFetch,
                    request,
                    state.page,
                    &state.search_text,
                )],
            )
        }
        Event::SearchTextChanged(text) => {
            state.search_text = text;
            (true, vec![])
        }
        Event::SearchTriggered => {
            if !state.is_visible {
                tracing::debug!("list hidden, ignoring search trigger");
                return (false, vec![]);
            }

            state.reset_results();
            let mut actions = state.cancel_scopes(&SEARCH_SUPERSEDES);
            let request = state.scopes.begin(CancelScope::SearchFetch);
            tracing::debug!(search_text = %state.search_text, request = %request, "starting search");

            actions.push(Action::fetch_characters(
                CancelScope::SearchFetch,
                request,
                1,
                &state.search_text,
            ));
            (true, actions)
        }
        Event::SearchCleared => {
            state.search_text.clear();
            let actions = state.cancel_scopes(&[CancelScope::SearchFetch]);
            (true, actions)
        }
        Event::AlertDismissed => {
            let had_alert = state.alert.take().is_some();
            (had_alert, vec![])
        }
        Event::CharacterSelected(id) => {
            let Some(character) = state.character(id).cloned() else {
                tracing::debug!(character_id = id, "character not in results");
                return (false, vec![]);
            };

            let session = state.open_detail(character);
            tracing::debug!(character_id = id, session = %session, "opening detail");
            (true, vec![Action::LoadFavorites])
        }
        Event::DetailDismissed => {
            if state.detail.take().is_none() {
                return (false, vec![]);
            }
            (true, vec![Action::LoadFavorites])
        }
        Event::Detail(event) => {
            let Some(detail) = state.detail.as_mut() else {
                tracing::debug!("no detail open, ignoring");
                return (false, vec![]);
            };
            handle_detail_event(detail, event)
        }
        Event::WorkerResponse(response) => handle_worker_response(state, response),
    }
}

fn toggle_visibility(state: &mut ListState) -> (bool, Vec<Action>) {
    if state.is_visible {
        tracing::debug!("hiding list");
        state.is_visible = false;
        state.reset_results();
        state.detail = None;
        let actions = state.cancel_scopes(&CancelScope::ALL);
        return (true, actions);
    }

    tracing::debug!("showing list");
    state.is_visible = true;
    state.reset_results();
    state.search_text.clear();

    let request = state.scopes.begin(CancelScope::InitialFetch);
    (
        true,
        vec![Action::FetchCharacters {
            scope: CancelScope::InitialFetch,
            request,
            page: 1,
            filter: None,
        }],
    )
}

fn handle_worker_response(state: &mut ListState, response: WorkerResponse) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("worker_response", kind = response.kind()).entered();

    match response {
        WorkerResponse::CharactersLoaded {
            scope,
            request,
            characters,
        } => {
            if !state.scopes.complete(scope, request) {
                tracing::debug!(scope = %scope, request = %request, "dropping cancelled completion");
                return (false, vec![]);
            }

            tracing::debug!(
                scope = %scope,
                count = characters.len(),
                total = state.characters.len() + characters.len(),
                "appending characters"
            );
            state.characters.extend(characters);
            (true, vec![])
        }
        WorkerResponse::CharactersFailed {
            scope,
            request,
            error,
        } => {
            if !state.scopes.complete(scope, request) {
                tracing::debug!(scope = %scope, request = %request, "dropping cancelled failure");
                return (false, vec![]);
            }

            tracing::warn!(scope = %scope, error = %error, "character fetch failed");
            state.alert = Some(Alert::list_error(error));
            (true, vec![])
        }
        WorkerResponse::EpisodeLoaded {
            session,
            character_id,
            episode,
        } => match detail_for(state, session, character_id) {
            Some(detail) => {
                detail.apply_episode_loaded(episode);
                (true, vec![])
            }
            None => (false, vec![]),
        },
        WorkerResponse::EpisodeFailed {
            session,
            character_id,
            error,
        } => match detail_for(state, session, character_id) {
            Some(detail) => {
                detail.apply_episode_failed(error);
                (true, vec![])
            }
            None => (false, vec![]),
        },
        WorkerResponse::FavoriteUpdated {
            session,
            character_id,
            is_favorite,
        } => {
            if is_favorite {
                state.favorites.insert(character_id);
            } else {
                state.favorites.remove(&character_id);
            }
            if let Some(detail) = detail_for(state, session, character_id) {
                detail.apply_favorite_updated(is_favorite);
            }
            (true, vec![])
        }
        WorkerResponse::FavoriteFailed {
            session,
            character_id,
            error,
        } => match detail_for(state, session, character_id) {
            Some(detail) => {
                detail.apply_favorite_failed(&error);
                (true, vec![])
            }
            None => {
                tracing::warn!(character_id = character_id, error = %error, "favorite failed after detail closed");
                (false, vec![])
            }
        },
        WorkerResponse::FavoritesLoaded { ids } => {
            state.apply_favorites(ids);
            (true, vec![])
        }
    }
}

/// The open detail screen, if it is the presentation that issued the effect.
fn detail_for(
    state: &mut ListState,
    session: DetailSession,
    character_id: CharacterId,
) -> Option<&mut CharacterDetailState> {
    let detail = state
        .detail
        .as_mut()
        .filter(|detail| detail.session == session && detail.character.id == character_id);
    if detail.is_none() {
        tracing::debug!(
            session = %session,
            character_id = character_id,
            "issuing detail no longer open, dropping"
        );
    }
    detail
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::RequestId;
    use crate::domain::{ApiError, Character, Episode, Place, StoreError};
    use std::collections::HashSet;

    fn character(id: CharacterId, name: &str) -> Character {
        Character {
            id,
            name: name.to_string(),
            status: "Alive".to_string(),
            gender: "Male".to_string(),
            origin: Place { name: "Earth".to_string() },
            location: Place { name: "Earth".to_string() },
            image: String::new(),
            episodes: vec!["https://rickandmortyapi.com/api/episode/1".to_string()],
        }
    }

    /// Extracts the (scope, request, page, filter) of the single fetch in `actions`.
    fn fetch_of(actions: &[Action]) -> (CancelScope, RequestId, u32, Option<String>) {
        let fetches: Vec<_> = actions
            .iter()
            .filter_map(|a| match a {
                Action::FetchCharacters {
                    scope,
                    request,
                    page,
                    filter,
                } => Some((*scope, *request, *page, filter.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(fetches.len(), 1, "expected one fetch in {actions:?}");
        fetches[0].clone()
    }

    fn loaded(scope: CancelScope, request: RequestId, characters: Vec<Character>) -> Event {
        Event::WorkerResponse(WorkerResponse::CharactersLoaded {
            scope,
            request,
            characters,
        })
    }

    fn ids(state: &ListState) -> Vec<CharacterId> {
        state.characters.iter().map(|c| c.id).collect()
    }

    fn open_session(state: &ListState) -> DetailSession {
        state.detail.as_ref().map(|detail| detail.session).unwrap()
    }

    fn pilot() -> Episode {
        Episode {
            id: 1,
            name: "Pilot".to_string(),
            air_date: "December 2, 2013".to_string(),
            code: "S01E01".to_string(),
            characters: vec![],
        }
    }

    fn visible_with(characters: Vec<Character>) -> ListState {
        let mut state = ListState::new();
        let (_, actions) = handle_event(&mut state, Event::VisibilityToggled);
        let (scope, request, _, _) = fetch_of(&actions);
        handle_event(&mut state, loaded(scope, request, characters));
        state
    }

    #[test]
    fn showing_fetches_first_page_unfiltered() {
        let mut state = ListState::new();
        state.search_text = "stale".to_string();

        let (rerender, actions) = handle_event(&mut state, Event::VisibilityToggled);
        assert!(rerender);
        assert!(state.is_visible);
        assert!(state.search_text.is_empty());

        let (scope, _, page, filter) = fetch_of(&actions);
        assert_eq!(scope, CancelScope::InitialFetch);
        assert_eq!(page, 1);
        assert_eq!(filter, None);
    }

    #[test]
    fn hiding_cancels_every_scope_and_drops_late_results() {
        let mut state = ListState::new();
        let (_, actions) = handle_event(&mut state, Event::VisibilityToggled);
        let (scope, request, _, _) = fetch_of(&actions);

        let (_, actions) = handle_event(&mut state, Event::VisibilityToggled);
        for scope in CancelScope::ALL {
            assert!(actions.contains(&Action::Cancel(scope)));
        }

        let before = state.clone();
        let (rerender, actions) = handle_event(&mut state, loaded(scope, request, vec![character(1, "A")]));
        assert!(!rerender);
        assert!(actions.is_empty());
        assert_eq!(state, before);

        let failure = Event::WorkerResponse(WorkerResponse::CharactersFailed {
            scope,
            request,
            error: ApiError::InvalidResponse,
        });
        handle_event(&mut state, failure);
        assert_eq!(state, before);
    }

    #[test]
    fn pages_concatenate_in_fetch_order_without_dedup() {
        let mut state = visible_with(vec![character(1, "A"), character(2, "B")]);

        let (_, actions) = handle_event(&mut state, Event::ReachedBottom);
        let (scope, request, page, _) = fetch_of(&actions);
        assert_eq!((scope, page), (CancelScope::PaginationFetch, 2));
        handle_event(&mut state, loaded(scope, request, vec![character(2, "B"), character(3, "C")]));

        assert_eq!(ids(&state), vec![1, 2, 2, 3]);
        assert_eq!(state.page, 2);
    }

    #[test]
    fn pagination_requires_visible_non_empty_list() {
        let mut state = ListState::new();
        assert_eq!(handle_event(&mut state, Event::ReachedBottom), (false, vec![]));

        let mut state = visible_with(vec![]);
        assert_eq!(handle_event(&mut state, Event::ReachedBottom), (false, vec![]));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn pagination_carries_search_text() {
        let mut state = visible_with(vec![character(1, "A")]);
        handle_event(&mut state, Event::SearchTextChanged("  rick ".to_string()));

        let (_, actions) = handle_event(&mut state, Event::ReachedBottom);
        assert_eq!(fetch_of(&actions).3, Some("rick".to_string()));
    }

    #[test]
    fn search_supersedes_outstanding_pagination() {
        let mut state = visible_with(vec![character(1, "A"), character(2, "B")]);

        let (_, actions) = handle_event(&mut state, Event::ReachedBottom);
        let (paging_scope, paging_request, _, _) = fetch_of(&actions);

        handle_event(&mut state, Event::SearchTextChanged("rick".to_string()));
        let (_, actions) = handle_event(&mut state, Event::SearchTriggered);
        assert!(actions.contains(&Action::Cancel(CancelScope::PaginationFetch)));
        let (search_scope, search_request, page, filter) = fetch_of(&actions);
        assert_eq!(search_scope, CancelScope::SearchFetch);
        assert_eq!((page, filter), (1, Some("rick".to_string())));
        assert!(state.characters.is_empty());

        handle_event(&mut state, loaded(paging_scope, paging_request, vec![character(3, "C")]));
        handle_event(&mut state, loaded(search_scope, search_request, vec![character(1, "A")]));

        assert_eq!(ids(&state), vec![1]);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn second_search_cancels_the_first() {
        let mut state = visible_with(vec![character(1, "A")]);

        let (_, first) = handle_event(&mut state, Event::SearchTriggered);
        let (scope, first_request, _, _) = fetch_of(&first);
        let (_, second) = handle_event(&mut state, Event::SearchTriggered);
        let (_, second_request, _, _) = fetch_of(&second);
        assert!(second.contains(&Action::Cancel(CancelScope::SearchFetch)));

        handle_event(&mut state, loaded(scope, first_request, vec![character(9, "Z")]));
        handle_event(&mut state, loaded(scope, second_request, vec![character(2, "B")]));
        assert_eq!(ids(&state), vec![2]);
    }

    #[test]
    fn clearing_search_keeps_results_and_does_not_fetch() {
        let mut state = visible_with(vec![character(1, "A")]);
        handle_event(&mut state, Event::SearchTextChanged("rick".to_string()));

        let (_, actions) = handle_event(&mut state, Event::SearchCleared);
        assert_eq!(actions, vec![Action::Cancel(CancelScope::SearchFetch)]);
        assert!(state.search_text.is_empty());
        assert_eq!(ids(&state), vec![1]);
    }

    #[test]
    fn failure_sets_alert_and_keeps_results() {
        let mut state = visible_with(vec![character(1, "A")]);
        let (_, actions) = handle_event(&mut state, Event::ReachedBottom);
        let (scope, request, _, _) = fetch_of(&actions);

        handle_event(
            &mut state,
            Event::WorkerResponse(WorkerResponse::CharactersFailed {
                scope,
                request,
                error: ApiError::InvalidData,
            }),
        );
        assert_eq!(ids(&state), vec![1]);
        let alert = state.alert.clone().unwrap();
        assert_eq!(alert.title, "Error occurred");
        assert_eq!(alert.message, "Data is invalid, try again.");

        handle_event(&mut state, Event::AlertDismissed);
        assert!(state.alert.is_none());
    }

    #[test]
    fn favorite_flow_through_detail() {
        let mut state = visible_with(vec![character(1, "A"), character(2, "B")]);

        let (_, actions) = handle_event(&mut state, Event::CharacterSelected(2));
        assert_eq!(actions, vec![Action::LoadFavorites]);
        assert!(!state.detail.as_ref().unwrap().is_favorite);

        let session = open_session(&state);
        let (_, actions) = handle_event(&mut state, Event::Detail(DetailEvent::FavoriteToggled));
        assert_eq!(actions, vec![Action::AddFavorite { session, character_id: 2 }]);

        handle_event(
            &mut state,
            Event::WorkerResponse(WorkerResponse::FavoriteUpdated {
                session,
                character_id: 2,
                is_favorite: true,
            }),
        );
        assert!(state.detail.as_ref().unwrap().is_favorite);
        assert!(state.favorites.contains(&2));
        assert!(state.alert.is_none());
    }

    #[test]
    fn failing_store_keeps_flag_and_alerts() {
        let mut state = visible_with(vec![character(1, "A"), character(2, "B")]);
        handle_event(&mut state, Event::CharacterSelected(2));
        handle_event(&mut state, Event::Detail(DetailEvent::FavoriteToggled));

        let session = open_session(&state);
        handle_event(
            &mut state,
            Event::WorkerResponse(WorkerResponse::FavoriteFailed {
                session,
                character_id: 2,
                error: StoreError::SaveFailed("disk full".to_string()),
            }),
        );
        let detail = state.detail.as_ref().unwrap();
        assert!(!detail.is_favorite);
        assert_eq!(
            detail.alert.as_ref().map(|a| a.message.as_str()),
            Some("Data is invalid, try again.")
        );

        handle_event(&mut state, Event::Detail(DetailEvent::AlertDismissed));
        let detail = state.detail.as_ref().unwrap();
        assert!(detail.alert.is_none());
        assert!(!detail.is_favorite);
    }

    #[test]
    fn completions_for_other_characters_are_dropped() {
        let mut state = visible_with(vec![character(1, "A"), character(2, "B")]);
        handle_event(&mut state, Event::CharacterSelected(1));

        let session = open_session(&state);
        let (rerender, _) = handle_event(
            &mut state,
            Event::WorkerResponse(WorkerResponse::EpisodeLoaded {
                session,
                character_id: 2,
                episode: pilot(),
            }),
        );
        assert!(!rerender);
        assert!(state.detail.as_ref().unwrap().episode.is_none());
    }

    #[test]
    fn reopened_detail_ignores_effects_of_dismissed_one() {
        let mut state = visible_with(vec![character(1, "A")]);
        let url = "https://rickandmortyapi.com/api/episode/1".to_string();

        handle_event(&mut state, Event::CharacterSelected(1));
        let dismissed = open_session(&state);
        handle_event(&mut state, Event::Detail(DetailEvent::EpisodeSelected(url)));
        handle_event(&mut state, Event::Detail(DetailEvent::FavoriteToggled));
        handle_event(&mut state, Event::DetailDismissed);

        handle_event(&mut state, Event::CharacterSelected(1));
        assert_ne!(open_session(&state), dismissed);

        let (rerender, _) = handle_event(
            &mut state,
            Event::WorkerResponse(WorkerResponse::EpisodeLoaded {
                session: dismissed,
                character_id: 1,
                episode: pilot(),
            }),
        );
        assert!(!rerender);

        handle_event(
            &mut state,
            Event::WorkerResponse(WorkerResponse::FavoriteFailed {
                session: dismissed,
                character_id: 1,
                error: StoreError::SaveFailed("disk full".to_string()),
            }),
        );

        let detail = state.detail.as_ref().unwrap();
        assert!(detail.episode.is_none());
        assert!(detail.alert.is_none());
    }

    #[test]
    fn confirmed_favorite_from_dismissed_detail_still_updates_projection() {
        let mut state = visible_with(vec![character(1, "A")]);
        handle_event(&mut state, Event::CharacterSelected(1));
        let dismissed = open_session(&state);
        handle_event(&mut state, Event::Detail(DetailEvent::FavoriteToggled));
        handle_event(&mut state, Event::DetailDismissed);
        handle_event(&mut state, Event::CharacterSelected(1));

        handle_event(
            &mut state,
            Event::WorkerResponse(WorkerResponse::FavoriteUpdated {
                session: dismissed,
                character_id: 1,
                is_favorite: true,
            }),
        );
        assert!(state.favorites.contains(&1));
        assert!(!state.detail.as_ref().unwrap().is_favorite);

        handle_event(
            &mut state,
            Event::WorkerResponse(WorkerResponse::FavoritesLoaded {
                ids: HashSet::from([1]),
            }),
        );
        assert!(state.detail.as_ref().unwrap().is_favorite);
    }

    #[test]
    fn favorites_reload_resyncs_open_detail() {
        let mut state = visible_with(vec![character(1, "A")]);
        handle_event(&mut state, Event::CharacterSelected(1));

        handle_event(
            &mut state,
            Event::WorkerResponse(WorkerResponse::FavoritesLoaded {
                ids: HashSet::from([1]),
            }),
        );
        assert!(state.detail.as_ref().unwrap().is_favorite);

        let (_, actions) = handle_event(&mut state, Event::DetailDismissed);
        assert_eq!(actions, vec![Action::LoadFavorites]);
        assert!(state.detail.is_none());
    }

    #[test]
    fn end_to_end_list_scenario() {
        let mut state = ListState::new();

        let (_, actions) = handle_event(&mut state, Event::VisibilityToggled);
        let (scope, request, _, _) = fetch_of(&actions);
        handle_event(&mut state, loaded(scope, request, vec![character(1, "A"), character(2, "B")]));
        assert_eq!((ids(&state), state.page), (vec![1, 2], 1));

        let (_, actions) = handle_event(&mut state, Event::ReachedBottom);
        let (scope, request, _, _) = fetch_of(&actions);
        handle_event(&mut state, loaded(scope, request, vec![character(3, "C")]));
        assert_eq!((ids(&state), state.page), (vec![1, 2, 3], 2));

        handle_event(&mut state, Event::SearchTextChanged("rick".to_string()));
        let (_, actions) = handle_event(&mut state, Event::SearchTriggered);
        let (scope, request, _, filter) = fetch_of(&actions);
        assert_eq!(filter.as_deref(), Some("rick"));
        handle_event(&mut state, loaded(scope, request, vec![character(1, "A")]));
        assert_eq!((ids(&state), state.page), (vec![1], 1));

        handle_event(&mut state, Event::SearchCleared);
        assert_eq!(ids(&state), vec![1]);
        assert!(!state.is_loading());
    }
}
