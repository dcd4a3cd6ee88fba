//! Episode detail: a read-only projection of one [`Episode`].

use crate::domain::Episode;
use crate::ui::viewmodel::EpisodeViewModel;

/// State of an open episode screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeDetailState {
    pub episode: Episode,
}

/// Intents raised on the episode screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeEvent {
    CloseTapped,
}

/// Requests the episode screen forwards to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeDelegate {
    Dismiss,
}

impl EpisodeDetailState {
    #[must_use]
    pub const fn new(episode: Episode) -> Self {
        Self { episode }
    }

    /// The screen owns no mutable state; every intent is forwarded.
    #[must_use]
    pub fn handle(&self, event: EpisodeEvent) -> EpisodeDelegate {
        match event {
            EpisodeEvent::CloseTapped => {
                tracing::debug!(episode_id = self.episode.id, "episode close tapped");
                EpisodeDelegate::Dismiss
            }
        }
    }

    #[must_use]
    pub fn compute_viewmodel(&self) -> EpisodeViewModel {
        EpisodeViewModel {
            name: self.episode.name.clone(),
            code: self.episode.code.clone(),
            air_date: self.episode.air_date.clone(),
            character_count: self.episode.characters.len(),
        }
    }
}
