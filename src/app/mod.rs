//! Application layer: pure reducers, their commands and cancellation scopes.
//!
//! This layer sits between the front end (main.rs) and the worker/storage
//! layers. Nothing in it performs I/O.
//!
//! ```text
//! Intents → Event → handle_event → State mutation → Actions → Worker
//!                        ↑                                      ↓
//!                        └─────────── WorkerResponse ───────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the reducers
//! - [`alert`]: Single-button alerts raised for failed operations
//! - [`detail`]: Character detail state machine
//! - [`episode`]: Episode detail projection
//! - [`handler`]: List event processing and completion routing
//! - [`scopes`]: Cancellation scopes and the live-request registry
//! - [`state`]: List state container and view model computation

pub mod actions;
pub mod alert;
pub mod detail;
pub mod episode;
pub mod handler;
pub mod scopes;
pub mod state;

pub use actions::Action;
pub use alert::Alert;
pub use detail::{handle_detail_event, CharacterDetailState, DetailEvent, DetailSession};
pub use episode::{EpisodeDelegate, EpisodeDetailState, EpisodeEvent};
pub use handler::{handle_event, Event};
pub use scopes::{CancelScope, RequestId, ScopeRegistry};
pub use state::ListState;
