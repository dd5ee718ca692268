use std::fmt;

use uuid::Uuid;

use crate::domain::topic::errors::TopicIdError;

/// Topic unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TopicId(pub Uuid);

impl TopicId {
    /// Generate a new random topic ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a topic ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, TopicIdError> {
        Uuid::parse_str(s)
            .map(TopicId)
            .map_err(|e| TopicIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for TopicId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Topic entity.
///
/// Read-mostly: topics are seeded, listed, and subscribed to. There is no
/// creation or deletion endpoint.
#[derive(Debug, Clone)]
pub struct Topic {
    pub id: TopicId,
    pub title: String,
    pub description: String,
}
