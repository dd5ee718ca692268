use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::Comment;
use crate::domain::post::models::CommentId;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::CommentRepository;
use crate::domain::user::models::UserId;
use crate::user::models::Username;

pub struct PostgresCommentRepository {
    pool: PgPool,
}

#[derive(FromRow)]
struct CommentRow {
    id: Uuid,
    post_id: Uuid,
    author_id: Uuid,
    author: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<CommentRow> for Comment {
    type Error = PostError;

    fn try_from(row: CommentRow) -> Result<Self, PostError> {
        Ok(Comment {
            id: CommentId(row.id),
            post_id: PostId(row.post_id),
            author_id: UserId(row.author_id),
            author: Username::new(row.author)
                .map_err(|e| PostError::DatabaseError(e.to_string()))?,
            content: row.content,
            created_at: row.created_at,
        })
    }
}

impl PostgresCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn create(&self, comment: Comment) -> Result<Comment, PostError> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, post_id, author_id, content, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(comment.id.0)
        .bind(comment.post_id.0)
        .bind(comment.author_id.0)
        .bind(&comment.content)
        .bind(comment.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(comment)
    }

    async fn find_by_post(&self, post_id: &PostId) -> Result<Vec<Comment>, PostError> {
        let rows: Vec<CommentRow> = sqlx::query_as(
            r#"
            SELECT c.id, c.post_id, c.author_id, u.username AS author, c.content, c.created_at
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.post_id = $1
            ORDER BY c.created_at
            "#,
        )
        .bind(post_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Comment::try_from).collect()
    }
}
