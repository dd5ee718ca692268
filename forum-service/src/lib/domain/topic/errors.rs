use thiserror::Error;

use crate::user::errors::UserError;

/// Error for TopicId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TopicIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for topic and subscription operations
#[derive(Debug, Clone, Error)]
pub enum TopicError {
    #[error("Invalid topic ID: {0}")]
    InvalidTopicId(#[from] TopicIdError),

    #[error("Topic not found: {0}")]
    NotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<UserError> for TopicError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(username) => TopicError::UserNotFound(username),
            UserError::DatabaseError(msg) => TopicError::DatabaseError(msg),
            other => TopicError::Unknown(other.to_string()),
        }
    }
}
