//! Structured logging to a rotating file.
//!
//! All crate code logs through `tracing` macros and spans; this module only
//! wires the subscriber:
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → RotatingFile → explorer.log
//! ```
//!
//! Background tasks carry the span that spawned them via
//! [`tracing::Instrument`], so a fetch's log lines nest under the event that
//! requested it.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::{RotatingFile, MAX_BACKUP_FILES, MAX_FILE_SIZE_BYTES};
pub use init::{init_tracing, DEFAULT_TRACE_LEVEL};
