use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::Comment;
use crate::domain::post::models::CommentId;
use crate::domain::post::models::CreateCommentCommand;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::CommentRepository;
use crate::domain::post::ports::PostRepository;
use crate::domain::post::ports::PostServicePort;
use crate::domain::topic::models::TopicId;
use crate::domain::topic::ports::TopicRepository;
use crate::user::models::Username;
use crate::user::ports::UserRepository;

/// Domain service for posts, comments, and the subscription-scoped feed.
pub struct PostService<PR, CR, UR, TR>
where
    PR: PostRepository,
    CR: CommentRepository,
    UR: UserRepository,
    TR: TopicRepository,
{
    post_repository: Arc<PR>,
    comment_repository: Arc<CR>,
    user_repository: Arc<UR>,
    topic_repository: Arc<TR>,
}

impl<PR, CR, UR, TR> PostService<PR, CR, UR, TR>
where
    PR: PostRepository,
    CR: CommentRepository,
    UR: UserRepository,
    TR: TopicRepository,
{
    pub fn new(
        post_repository: Arc<PR>,
        comment_repository: Arc<CR>,
        user_repository: Arc<UR>,
        topic_repository: Arc<TR>,
    ) -> Self {
        Self {
            post_repository,
            comment_repository,
            user_repository,
            topic_repository,
        }
    }
}

#[async_trait]
impl<PR, CR, UR, TR> PostServicePort for PostService<PR, CR, UR, TR>
where
    PR: PostRepository,
    CR: CommentRepository,
    UR: UserRepository,
    TR: TopicRepository,
{
    async fn list_posts(&self) -> Result<Vec<Post>, PostError> {
        self.post_repository.list_all().await
    }

    async fn create_post(
        &self,
        command: CreatePostCommand,
        author: &Username,
    ) -> Result<Post, PostError> {
        let user = self
            .user_repository
            .find_by_username(author)
            .await
            .map_err(PostError::from)?
            .ok_or_else(|| PostError::UserNotFound(author.to_string()))?;

        let topic = self
            .topic_repository
            .find_by_id(&command.topic_id)
            .await
            .map_err(PostError::from)?
            .ok_or_else(|| PostError::TopicNotFound(command.topic_id.to_string()))?;

        let post = Post {
            id: PostId::new(),
            title: command.title,
            content: command.content,
            author_id: user.id,
            author: user.username,
            topic_id: topic.id,
            topic_title: topic.title,
            created_at: Utc::now(),
        };

        self.post_repository.create(post).await
    }

    async fn get_post(&self, id: &PostId) -> Result<(Post, Vec<Comment>), PostError> {
        let post = self
            .post_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| PostError::NotFound(id.to_string()))?;

        let comments = self.comment_repository.find_by_post(id).await?;

        Ok((post, comments))
    }

    async fn get_feed(&self, username: &Username) -> Result<Vec<Post>, PostError> {
        let user = self
            .user_repository
            .find_by_username(username)
            .await
            .map_err(PostError::from)?
            .ok_or_else(|| PostError::UserNotFound(username.to_string()))?;

        // No subscriptions means an empty feed, never all posts
        if user.subscriptions.is_empty() {
            return Ok(Vec::new());
        }

        let topics: Vec<TopicId> = user.subscriptions.into_iter().collect();
        self.post_repository
            .find_by_topics_newest_first(&topics)
            .await
    }

    async fn add_comment(
        &self,
        command: CreateCommentCommand,
        author: &Username,
    ) -> Result<Comment, PostError> {
        let user = self
            .user_repository
            .find_by_username(author)
            .await
            .map_err(PostError::from)?
            .ok_or_else(|| PostError::UserNotFound(author.to_string()))?;

        let post = self
            .post_repository
            .find_by_id(&command.post_id)
            .await?
            .ok_or_else(|| PostError::NotFound(command.post_id.to_string()))?;

        let comment = Comment {
            id: CommentId::new(),
            post_id: post.id,
            author_id: user.id,
            author: user.username,
            content: command.content,
            created_at: Utc::now(),
        };

        self.comment_repository.create(comment).await
    }
}
