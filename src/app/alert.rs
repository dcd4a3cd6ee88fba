//! Modal alerts shown for failed asynchronous operations.

use crate::domain::ApiError;

/// A single-button alert. At most one is outstanding per screen; setting a
/// new one replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
    /// Label of the only (cancel-role) button.
    pub button: String,
}

impl Alert {
    /// Alert raised by the character list.
    #[must_use]
    pub fn list_error(error: ApiError) -> Self {
        Self {
            title: "Error occurred".to_string(),
            message: error.to_string(),
            button: "OK".to_string(),
        }
    }

    /// Alert raised by the character detail screen.
    #[must_use]
    pub fn detail_error(error: ApiError) -> Self {
        Self {
            title: "Error occurred!".to_string(),
            message: error.to_string(),
            button: "Cancel".to_string(),
        }
    }
}
