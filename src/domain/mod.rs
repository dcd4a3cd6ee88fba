//! Domain layer for the explorer.
//!
//! Core catalog types and the error taxonomy, independent of the HTTP client,
//! the persistence backend and the reducers.
//!
//! # Organization
//!
//! - [`character`]: Character model and identity rules
//! - [`episode`]: Episode model
//! - [`error`]: Error types and result alias

pub mod character;
pub mod episode;
pub mod error;

pub use character::{episode_number, Character, CharacterId, Place};
pub use episode::Episode;
pub use error::{ApiError, ExplorerError, Result, StoreError};
