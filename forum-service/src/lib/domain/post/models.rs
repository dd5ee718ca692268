use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::post::errors::PostIdError;
use crate::domain::topic::models::TopicId;
use crate::domain::user::models::UserId;
use crate::user::models::Username;

/// Post unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub Uuid);

impl PostId {
    /// Generate a new random post ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a post ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, PostIdError> {
        Uuid::parse_str(s)
            .map(PostId)
            .map_err(|e| PostIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for PostId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Comment unique identifier value object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommentId(pub Uuid);

impl CommentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CommentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Post entity.
///
/// Carries the author's username and the topic title alongside the foreign
/// keys so read paths need no extra lookups. Feed resolution only cares
/// about `topic_id` and `created_at`.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub author_id: UserId,
    pub author: Username,
    pub topic_id: TopicId,
    pub topic_title: String,
    pub created_at: DateTime<Utc>,
}

/// Comment entity, always attached to one post.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub author_id: UserId,
    pub author: Username,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Command to create a new post in a topic.
#[derive(Debug)]
pub struct CreatePostCommand {
    pub title: String,
    pub content: String,
    pub topic_id: TopicId,
}

/// Command to comment on an existing post.
#[derive(Debug)]
pub struct CreateCommentCommand {
    pub post_id: PostId,
    pub content: String,
}
