//! Remote catalog access.
//!
//! - `client`: the [`CharacterApi`] seam and its `reqwest` implementation
//! - `models`: JSON response envelopes

pub mod client;
pub mod models;

pub use client::{normalize_filter, ApiClient, ApiResult, CharacterApi, DEFAULT_BASE_URL};
pub use models::CharactersResponse;
