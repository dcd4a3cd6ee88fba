//! The single state-owning context.
//!
//! [`Runtime`] owns the [`ListState`], the [`Worker`] and the receiving end of
//! the event channel. Front-end intents go through [`Runtime::dispatch`];
//! background completions are pulled with [`Runtime::step`] and dispatched
//! the same way, so every mutation is applied in one place, in delivery order.

use crate::api::CharacterApi;
use crate::app::{handle_event, Event, ListState};
use crate::storage::FavoritesStore;
use crate::ui::viewmodel::ListViewModel;
use crate::worker::Worker;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};

pub struct Runtime {
    state: ListState,
    worker: Worker,
    events: UnboundedReceiver<Event>,
}

impl Runtime {
    #[must_use]
    pub fn new(api: Arc<dyn CharacterApi>, favorites: Arc<FavoritesStore>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: ListState::new(),
            worker: Worker::new(api, favorites, tx),
            events: rx,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ListState {
        &self.state
    }

    #[must_use]
    pub fn viewmodel(&self) -> ListViewModel {
        self.state.compute_viewmodel()
    }

    /// Applies `event` and starts the resulting actions. Returns whether a
    /// re-render is needed.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, event: Event) -> bool {
        let (rerender, actions) = handle_event(&mut self.state, event);
        for action in actions {
            tracing::debug!(action = ?action, "executing action");
            self.worker.execute(action);
        }
        rerender
    }

    /// Waits for the next background completion and applies it.
    ///
    /// Returns `None` once no completion can arrive any more.
    pub async fn step(&mut self) -> Option<bool> {
        let event = self.events.recv().await?;
        Some(self.dispatch(event))
    }
}

impl std::fmt::Debug for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Runtime")
            .field("state", &self.state)
            .field("worker", &self.worker)
            .finish_non_exhaustive()
    }
}
