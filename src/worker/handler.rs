//! Effect executor for reducer actions.
//!
//! [`Worker`] turns each [`Action`] into a tokio task and reports the outcome
//! back on the event channel as a [`WorkerResponse`]. Tasks never touch state.
//!
//! Character fetches run under the [`CancellationToken`] of their
//! [`CancelScope`]. Cancelling a scope cancels its token and installs a fresh
//! one, so later fetches in the same scope are unaffected. A task whose token
//! fires before its request finishes sends nothing.
//!
//! Favorite reads and mutations go through a single lane task that runs them
//! one at a time in the order they were issued, so their responses are
//! delivered in that order too.

use crate::api::CharacterApi;
use crate::app::{Action, CancelScope, DetailSession, Event, RequestId};
use crate::domain::{ApiError, CharacterId, StoreError};
use crate::storage::FavoritesStore;
use crate::worker::WorkerResponse;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

/// Work queued on the favorites lane.
#[derive(Debug)]
enum FavoritesJob {
    Reload,
    Mutate {
        session: DetailSession,
        character_id: CharacterId,
        add: bool,
    },
}

/// Executes actions against the catalog API and the favorites store.
///
/// Must be driven from within a tokio runtime.
pub struct Worker {
    api: Arc<dyn CharacterApi>,
    favorites: Arc<FavoritesStore>,
    events: UnboundedSender<Event>,
    scopes: HashMap<CancelScope, CancellationToken>,
    favorites_lane: Option<UnboundedSender<FavoritesJob>>,
}

impl Worker {
    pub fn new(
        api: Arc<dyn CharacterApi>,
        favorites: Arc<FavoritesStore>,
        events: UnboundedSender<Event>,
    ) -> Self {
        Self {
            api,
            favorites,
            events,
            scopes: HashMap::new(),
            favorites_lane: None,
        }
    }

    /// Starts the side effect described by `action`.
    ///
    /// Returns immediately; completions arrive later as events. Cancellation
    /// takes effect before this returns.
    pub fn execute(&mut self, action: Action) {
        match action {
            Action::FetchCharacters {
                scope,
                request,
                page,
                filter,
            } => self.spawn_fetch_characters(scope, request, page, filter),
            Action::Cancel(scope) => self.cancel(scope),
            Action::FetchEpisode {
                session,
                character_id,
                url,
            } => self.spawn_fetch_episode(session, character_id, url),
            Action::AddFavorite { session, character_id } => self.submit(FavoritesJob::Mutate {
                session,
                character_id,
                add: true,
            }),
            Action::RemoveFavorite { session, character_id } => self.submit(FavoritesJob::Mutate {
                session,
                character_id,
                add: false,
            }),
            Action::LoadFavorites => self.submit(FavoritesJob::Reload),
        }
    }

    /// Queues `job` on the favorites lane, starting the lane on first use.
    fn submit(&mut self, job: FavoritesJob) {
        let lane = match &self.favorites_lane {
            Some(lane) => lane.clone(),
            None => {
                let lane = spawn_favorites_lane(Arc::clone(&self.favorites), self.events.clone());
                self.favorites_lane = Some(lane.clone());
                lane
            }
        };
        if lane.send(job).is_err() {
            tracing::warn!("favorites lane stopped, dropping job");
        }
    }

    /// Token for new work in `scope`.
    fn token(&mut self, scope: CancelScope) -> CancellationToken {
        self.scopes.entry(scope).or_insert_with(CancellationToken::new).clone()
    }

    fn cancel(&mut self, scope: CancelScope) {
        if let Some(token) = self.scopes.remove(&scope) {
            tracing::debug!(scope = %scope, "cancelling scope");
            token.cancel();
        }
    }

    fn spawn_fetch_characters(
        &mut self,
        scope: CancelScope,
        request: RequestId,
        page: u32,
        filter: Option<String>,
    ) {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        let token = self.token(scope);
        let span = tracing::debug_span!(
            "fetch_characters",
            scope = %scope,
            request = %request,
            page = page,
            filter = ?filter
        );

        tokio::spawn(
            async move {
                let result = tokio::select! {
                    biased;
                    () = token.cancelled() => {
                        tracing::debug!("fetch cancelled");
                        return;
                    }
                    result = api.search_characters(page, filter.as_deref()) => result,
                };

                let response = match filtered_not_found_as_empty(result, filter.is_some()) {
                    Ok(characters) => WorkerResponse::CharactersLoaded {
                        scope,
                        request,
                        characters,
                    },
                    Err(error) => WorkerResponse::CharactersFailed {
                        scope,
                        request,
                        error,
                    },
                };
                send(&events, response);
            }
            .instrument(span),
        );
    }

    fn spawn_fetch_episode(&self, session: DetailSession, character_id: CharacterId, url: String) {
        let api = Arc::clone(&self.api);
        let events = self.events.clone();
        let span = tracing::debug_span!(
            "fetch_episode",
            session = %session,
            character_id = character_id,
            url = %url
        );

        tokio::spawn(
            async move {
                let response = match api.fetch_episode(&url).await {
                    Ok(episode) => WorkerResponse::EpisodeLoaded {
                        session,
                        character_id,
                        episode,
                    },
                    Err(error) => WorkerResponse::EpisodeFailed {
                        session,
                        character_id,
                        error,
                    },
                };
                send(&events, response);
            }
            .instrument(span),
        );
    }
}

impl std::fmt::Debug for Worker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Worker")
            .field("favorites", &self.favorites)
            .field("scopes", &self.scopes.keys().collect::<Vec<_>>())
            .field("favorites_lane", &self.favorites_lane.is_some())
            .finish_non_exhaustive()
    }
}

fn spawn_favorites_lane(
    favorites: Arc<FavoritesStore>,
    events: UnboundedSender<Event>,
) -> UnboundedSender<FavoritesJob> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    tokio::spawn(
        async move {
            while let Some(job) = rx.recv().await {
                match job {
                    FavoritesJob::Reload => reload_favorites(&favorites, &events).await,
                    FavoritesJob::Mutate {
                        session,
                        character_id,
                        add,
                    } => {
                        let span = tracing::debug_span!(
                            "favorite_mutation",
                            session = %session,
                            character_id = character_id,
                            add = add
                        );
                        mutate_favorite(&favorites, &events, session, character_id, add)
                            .instrument(span)
                            .await;
                    }
                }
            }
            tracing::debug!("favorites lane closed");
        }
        .instrument(tracing::debug_span!("favorites_lane")),
    );

    tx
}

async fn reload_favorites(favorites: &FavoritesStore, events: &UnboundedSender<Event>) {
    let ids = match favorites.reload().await {
        Ok(ids) => {
            tracing::debug!(favorite_count = ids.len(), "favorites reloaded");
            ids
        }
        Err(error) => {
            tracing::warn!(error = %error, "favorites reload failed, using confirmed cache");
            favorites.list()
        }
    };
    send(events, WorkerResponse::FavoritesLoaded { ids });
}

async fn mutate_favorite(
    favorites: &FavoritesStore,
    events: &UnboundedSender<Event>,
    session: DetailSession,
    character_id: CharacterId,
    add: bool,
) {
    let (operation, result) = if add {
        ("add favorite", favorites.add(character_id).await)
    } else {
        ("remove favorite", favorites.remove(character_id).await)
    };

    let response = handle_store_result(operation, session, character_id, result, || {
        WorkerResponse::FavoriteUpdated {
            session,
            character_id,
            is_favorite: favorites.contains(character_id),
        }
    });
    let succeeded = matches!(response, WorkerResponse::FavoriteUpdated { .. });
    send(events, response);

    if succeeded {
        send(events, WorkerResponse::FavoritesLoaded { ids: favorites.list() });
    }
}

/// A filtered page the catalog answers with a non-200 status means "no
/// matches", not a failure.
fn filtered_not_found_as_empty<T>(
    result: Result<Vec<T>, ApiError>,
    filtered: bool,
) -> Result<Vec<T>, ApiError> {
    match result {
        Err(ApiError::InvalidResponse) if filtered => {
            tracing::debug!("filtered search found nothing");
            Ok(Vec::new())
        }
        other => other,
    }
}

/// Standardizes logging of store outcomes and maps failures to a response.
fn handle_store_result<F>(
    operation: &str,
    session: DetailSession,
    character_id: CharacterId,
    result: Result<(), StoreError>,
    on_success: F,
) -> WorkerResponse
where
    F: FnOnce() -> WorkerResponse,
{
    match result {
        Ok(()) => {
            tracing::debug!(operation = operation, "store operation successful");
            on_success()
        }
        Err(error) => {
            tracing::debug!(operation = operation, error = %error, "store operation failed");
            WorkerResponse::FavoriteFailed {
                session,
                character_id,
                error,
            }
        }
    }
}

fn send(events: &UnboundedSender<Event>, response: WorkerResponse) {
    if events.send(Event::WorkerResponse(response)).is_err() {
        tracing::debug!("event channel closed, dropping completion");
    }
}
