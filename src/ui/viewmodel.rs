//! View model types representing renderable UI state.
//!
//! View models are immutable snapshots computed from the reducer state via
//! `compute_viewmodel()` and consumed by the [renderer](crate::ui::renderer).
//! They contain no business logic, only display-ready data.
//!
//! # Example
//!
//! ```rust
//! use rickmorty_explorer::app::ListState;
//!
//! let vm = ListState::new().compute_viewmodel();
//! assert!(!vm.visible);
//! assert!(vm.cards.is_empty());
//! ```

/// Complete view model of the character list screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListViewModel {
    /// Whether the list is shown at all.
    pub visible: bool,

    /// Current page cursor.
    pub page: u32,

    /// Current (possibly not yet triggered) search text.
    pub search_text: String,

    /// One card per accumulated result, in fetch order.
    pub cards: Vec<CharacterCard>,

    /// Whether any character fetch is outstanding.
    pub loading: bool,

    /// Outstanding list alert.
    pub alert: Option<AlertView>,

    /// Open character screen, if any.
    pub detail: Option<DetailViewModel>,
}

/// One row of the character list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterCard {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub is_favorite: bool,
}

/// A single-button modal alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertView {
    pub title: String,
    pub message: String,
    pub button: String,
}

/// Character detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailViewModel {
    pub id: i64,
    pub name: String,
    pub status: String,
    pub gender: String,
    pub origin: String,
    pub location: String,
    pub image: String,
    pub is_favorite: bool,

    /// Episodes the character appears in, labelled by episode number.
    pub episodes: Vec<EpisodeLink>,

    pub alert: Option<AlertView>,

    /// Open episode screen, if any.
    pub episode: Option<EpisodeViewModel>,
}

/// Selectable episode entry on the detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeLink {
    /// Trailing URL segment, e.g. `28`.
    pub number: String,
    pub url: String,
}

/// Episode detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeViewModel {
    pub name: String,
    pub code: String,
    pub air_date: String,
    pub character_count: usize,
}
