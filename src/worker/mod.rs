//! Background execution of reducer actions.
//!
//! Network and storage work runs as independent tokio tasks that report back
//! through the event channel; they never mutate state directly.
//!
//! # Architecture
//!
//! - `messages`: Completion messages delivered back to the reducer
//! - `handler`: Worker implementation and per-scope cancellation tokens

pub mod handler;
pub mod messages;

pub use handler::Worker;
pub use messages::WorkerResponse;
