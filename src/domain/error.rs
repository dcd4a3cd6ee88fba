//! Error types for the explorer.
//!
//! Two closed taxonomies describe the failures the user can see: [`ApiError`]
//! for the remote catalog and [`StoreError`] for the on-device favorites
//! store. [`ExplorerError`] is the crate-level error used by setup paths
//! (configuration, store initialization, client construction). All types are
//! implemented with `thiserror`.

use thiserror::Error;

/// Failures of the remote character catalog.
///
/// The display strings are shown verbatim as alert messages, so they are
/// written for the user rather than for logs.
///
/// # Examples
///
/// ```
/// use rickmorty_explorer::ApiError;
///
/// assert_eq!(ApiError::InvalidData.to_string(), "Data is invalid, try again.");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ApiError {
    /// The request target could not be built or is not an absolute http(s) URL.
    #[error("Wrong URL. Cannot download data.")]
    WrongUrl,

    /// The server answered with a status other than 200.
    #[error("Invalid response, check your internet connection.")]
    InvalidResponse,

    /// The body could not be read or decoded.
    ///
    /// Transport failures and favorites-store failures are folded into this
    /// bucket when they reach the user.
    #[error("Data is invalid, try again.")]
    InvalidData,
}

/// Failures of the favorites persistence layer.
///
/// Each variant carries a diagnostic message from the underlying backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Adding a favorite could not be made durable.
    #[error("Failed to save: {0}")]
    SaveFailed(String),

    /// Reading the stored favorites failed.
    #[error("Failed to fetch: {0}")]
    FetchFailed(String),

    /// Removing a favorite could not be made durable.
    #[error("Failed to delete: {0}")]
    DeleteFailed(String),
}

/// The crate-level error type.
///
/// Used wherever a failure is reported to the caller instead of being turned
/// into an alert: loading configuration, opening the store, building the
/// HTTP client.
#[derive(Debug, Error)]
pub enum ExplorerError {
    /// Storage backend operation failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote catalog request failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Favorites store operation failed.
    #[error("Favorites error: {0}")]
    Store(#[from] StoreError),
}

/// A specialized `Result` type for explorer operations.
pub type Result<T> = std::result::Result<T, ExplorerError>;
