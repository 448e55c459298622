//! Error types surfaced by the view controllers.

/// Input rejected before any call to the data service
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Title is required")]
    EmptyTitle,
    #[error("Start time is required")]
    MissingStart,
    #[error("End time is required")]
    MissingEnd,
    #[error("End time must be after start time")]
    EndNotAfterStart,
    #[error("Sets must be at least 1")]
    NonPositiveSets,
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Invalid time: {0}")]
    InvalidTime(String),
    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Outcome of a user action that did not complete
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// No signed-in user; nothing was attempted
    #[error("Not signed in")]
    NotSignedIn,
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    /// The data service failed; carries the user-visible message
    #[error("{0}")]
    Backend(String),
}

impl ActionError {
    /// Build the user-visible message for a failed data-service call
    pub fn backend(action: &str, error: &anyhow::Error) -> Self {
        ActionError::Backend(format!("Failed to {}: {}", action, error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_message_includes_detail() {
        let err = anyhow::anyhow!("duplicate key value");
        let action_error = ActionError::backend("create task", &err);
        assert_eq!(action_error.to_string(), "Failed to create task: duplicate key value");
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: ActionError = ValidationError::EmptyTitle.into();
        assert_eq!(err.to_string(), "Title is required");
    }
}
