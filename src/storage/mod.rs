//! Storage layer for on-device favorites.
//!
//! Favorites are a set of character ids persisted in a local JSON store.
//! The backend is hidden behind the [`Storage`] trait; [`FavoritesStore`] adds
//! write serialization and a cached membership set on top of it.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `models`: Storage record types separate from domain models
//! - `favorites`: Serialized async store with cached membership
//! - `global`: Process-wide store initialization

pub mod backend;
pub mod favorites;
pub mod global;
pub mod json;
pub mod models;

pub use backend::Storage;
pub use favorites::FavoritesStore;
pub use global::{favorites, init_favorites};
pub use json::JsonStorage;
pub use models::FavoriteRecord;
