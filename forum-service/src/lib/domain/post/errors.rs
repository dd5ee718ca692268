use thiserror::Error;

use crate::domain::topic::errors::TopicError;
use crate::user::errors::UserError;

/// Error for PostId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PostIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for post, comment, and feed operations
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Invalid post ID: {0}")]
    InvalidPostId(#[from] PostIdError),

    #[error("Post not found: {0}")]
    NotFound(String),

    #[error("Topic not found: {0}")]
    TopicNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<UserError> for PostError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(username) => PostError::UserNotFound(username),
            UserError::DatabaseError(msg) => PostError::DatabaseError(msg),
            other => PostError::Unknown(other.to_string()),
        }
    }
}

impl From<TopicError> for PostError {
    fn from(err: TopicError) -> Self {
        match err {
            TopicError::NotFound(id) => PostError::TopicNotFound(id),
            TopicError::DatabaseError(msg) => PostError::DatabaseError(msg),
            other => PostError::Unknown(other.to_string()),
        }
    }
}
