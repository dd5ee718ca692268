use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::post::errors::PostError;
use crate::domain::post::models::Post;
use crate::domain::post::models::PostId;
use crate::domain::post::ports::PostRepository;
use crate::domain::topic::models::TopicId;
use crate::domain::user::models::UserId;
use crate::user::models::Username;

pub struct PostgresPostRepository {
    pool: PgPool,
}

#[derive(FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    content: String,
    author_id: Uuid,
    author: String,
    topic_id: Uuid,
    topic_title: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = PostError;

    fn try_from(row: PostRow) -> Result<Self, PostError> {
        Ok(Post {
            id: PostId(row.id),
            title: row.title,
            content: row.content,
            author_id: UserId(row.author_id),
            author: Username::new(row.author)
                .map_err(|e| PostError::DatabaseError(e.to_string()))?,
            topic_id: TopicId(row.topic_id),
            topic_title: row.topic_title,
            created_at: row.created_at,
        })
    }
}

const SELECT_POST: &str = r#"
    SELECT p.id, p.title, p.content, p.author_id, u.username AS author,
           p.topic_id, t.title AS topic_title, p.created_at
    FROM posts p
    JOIN users u ON u.id = p.author_id
    JOIN topics t ON t.id = p.topic_id
"#;

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn create(&self, post: Post) -> Result<Post, PostError> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, title, content, author_id, topic_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id.0)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.author_id.0)
        .bind(post.topic_id.0)
        .bind(post.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        Ok(post)
    }

    async fn find_by_id(&self, id: &PostId) -> Result<Option<Post>, PostError> {
        let row: Option<PostRow> = sqlx::query_as(&format!("{SELECT_POST} WHERE p.id = $1"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        row.map(Post::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Post>, PostError> {
        let rows: Vec<PostRow> =
            sqlx::query_as(&format!("{SELECT_POST} ORDER BY p.created_at DESC"))
                .fetch_all(&self.pool)
                .await
                .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Post::try_from).collect()
    }

    async fn find_by_topics_newest_first(
        &self,
        topics: &[TopicId],
    ) -> Result<Vec<Post>, PostError> {
        let topic_ids: Vec<Uuid> = topics.iter().map(|t| t.0).collect();

        let rows: Vec<PostRow> = sqlx::query_as(&format!(
            "{SELECT_POST} WHERE p.topic_id = ANY($1) ORDER BY p.created_at DESC"
        ))
        .bind(&topic_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PostError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Post::try_from).collect()
    }
}
