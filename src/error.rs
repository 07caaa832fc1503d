//! Error types for the activity store.

use thiserror::Error;
use uuid::Uuid;

/// Main error type for persistence operations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            StoreError::Io(e.into())
        } else if e.is_data() || e.is_syntax() || e.is_eof() {
            StoreError::Deserialization(e.to_string())
        } else {
            StoreError::Serialization(e.to_string())
        }
    }
}

/// Result type for persistence operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Commit-time validation failures raised by
/// [`ActivityBuilder::build`](crate::ActivityBuilder::build).
///
/// Always recoverable: the edit session is left untouched and the caller
/// can re-edit and retry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Activity name can't be empty.")]
    NameEmpty,

    #[error("Activity name exceeds max characters ({limit}).")]
    NameTooLong { limit: usize },

    #[error("Activity description exceeds max characters ({limit}).")]
    DescriptionTooLong { limit: usize },
}

impl ValidationError {
    /// Title under which validation failures are presented to the user.
    pub const TITLE: &'static str = "Activity Creation Error";
}

/// A presentable error: a title and a human-readable message.
///
/// Compares by its generated id, not by content, so two messages with the
/// same text are still distinct occurrences.
#[derive(Clone, Debug)]
pub struct ErrorMessage {
    pub id: Uuid,
    pub title: String,
    pub message: String,
}

impl ErrorMessage {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            message: message.into(),
        }
    }
}

impl PartialEq for ErrorMessage {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for ErrorMessage {}

impl From<&ValidationError> for ErrorMessage {
    fn from(error: &ValidationError) -> Self {
        ErrorMessage::new(ValidationError::TITLE, error.to_string())
    }
}
