//! Presentation layer: view models and a plain-text renderer.
//!
//! ```text
//! ListState → compute_viewmodel → ListViewModel → render → String
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Text rendering of the innermost open screen

pub mod renderer;
pub mod viewmodel;

pub use renderer::render;
pub use viewmodel::{
    AlertView, CharacterCard, DetailViewModel, EpisodeLink, EpisodeViewModel, ListViewModel,
};
