use async_trait::async_trait;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::Comment;
use crate::domain::post::models::CreateCommentCommand;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::topic::models::TopicId;
use crate::user::models::Username;

/// Port for post domain service operations.
#[async_trait]
pub trait PostServicePort: Send + Sync + 'static {
    /// List every post, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_posts(&self) -> Result<Vec<Post>, PostError>;

    /// Create a post authored by the given user.
    ///
    /// # Errors
    /// * `UserNotFound` - Author does not exist
    /// * `TopicNotFound` - Target topic does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_post(
        &self,
        command: CreatePostCommand,
        author: &Username,
    ) -> Result<Post, PostError>;

    /// Retrieve a post with its comments.
    ///
    /// # Errors
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_post(&self, id: &PostId) -> Result<(Post, Vec<Comment>), PostError>;

    /// Compute the subscription-scoped feed for a user.
    ///
    /// Returns posts belonging to the user's subscribed topics, ordered by
    /// creation time descending. Posts outside the subscription set are
    /// excluded regardless of authorship; an empty set yields an empty
    /// feed, never all posts.
    ///
    /// # Errors
    /// * `UserNotFound` - User does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_feed(&self, username: &Username) -> Result<Vec<Post>, PostError>;

    /// Add a comment to an existing post.
    ///
    /// # Errors
    /// * `UserNotFound` - Author does not exist
    /// * `NotFound` - Post does not exist
    /// * `DatabaseError` - Database operation failed
    async fn add_comment(
        &self,
        command: CreateCommentCommand,
        author: &Username,
    ) -> Result<Comment, PostError>;
}

/// Persistence operations for posts.
#[async_trait]
pub trait PostRepository: Send + Sync + 'static {
    /// Persist a new post.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, post: Post) -> Result<Post, PostError>;

    /// Retrieve a post by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError>;

    /// Retrieve all posts, newest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Post>, PostError>;

    /// Retrieve posts whose topic is in the given set, ordered by
    /// `created_at` descending. Tie order between equal timestamps is
    /// unspecified.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_topics_newest_first(&self, topics: &[TopicId])
        -> Result<Vec<Post>, PostError>;
}

/// Persistence operations for comments.
#[async_trait]
pub trait CommentRepository: Send + Sync + 'static {
    /// Persist a new comment.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, comment: Comment) -> Result<Comment, PostError>;

    /// Retrieve a post's comments, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>, PostError>;
}
