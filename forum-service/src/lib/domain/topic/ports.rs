use async_trait::async_trait;

use crate::domain::topic::errors::TopicError;
use crate::domain::topic::models::Topic;
use crate::domain::topic::models::TopicId;
use crate::user::models::Username;

/// Port for topic domain service operations.
#[async_trait]
pub trait TopicServicePort: Send + Sync + 'static {
    /// List every topic.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_topics(&self) -> Result<Vec<Topic>, TopicError>;

    /// Subscribe a user to a topic.
    ///
    /// Idempotent: subscribing to a topic already in the user's set is a
    /// no-op with no write.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `NotFound` - Topic does not exist
    /// * `DatabaseError` - Database operation failed
    async fn subscribe(&self, topic_id: &TopicId, username: &Username) -> Result<(), TopicError>;

    /// Unsubscribe a user from a topic.
    ///
    /// Idempotent: removing an absent pair is a no-op with no write. The
    /// topic is still required to exist; unsubscribing from a nonexistent
    /// topic is NotFound, not a silent no-op.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `NotFound` - Topic does not exist
    /// * `DatabaseError` - Database operation failed
    async fn unsubscribe(&self, topic_id: &TopicId, username: &Username) -> Result<(), TopicError>;
}

/// Persistence operations for topics.
#[async_trait]
pub trait TopicRepository: Send + Sync + 'static {
    /// Retrieve a topic by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &TopicId) -> Result<Option<Topic>, TopicError>;

    /// Retrieve all topics.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Topic>, TopicError>;
}
