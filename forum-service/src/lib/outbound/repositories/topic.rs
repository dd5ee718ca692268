use async_trait::async_trait;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::topic::errors::TopicError;
use crate::domain::topic::models::Topic;
use crate::domain::topic::models::TopicId;
use crate::domain::topic::ports::TopicRepository;

pub struct PostgresTopicRepository {
    pool: PgPool,
}

#[derive(FromRow)]
struct TopicRow {
    id: Uuid,
    title: String,
    description: String,
}

impl From<TopicRow> for Topic {
    fn from(row: TopicRow) -> Self {
        Topic {
            id: TopicId(row.id),
            title: row.title,
            description: row.description,
        }
    }
}

impl PostgresTopicRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TopicRepository for PostgresTopicRepository {
    async fn find_by_id(&self, id: &TopicId) -> Result<Option<Topic>, TopicError> {
        let row: Option<TopicRow> =
            sqlx::query_as("SELECT id, title, description FROM topics WHERE id = $1")
                .bind(id.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| TopicError::DatabaseError(e.to_string()))?;

        Ok(row.map(Topic::from))
    }

    async fn list_all(&self) -> Result<Vec<Topic>, TopicError> {
        let rows: Vec<TopicRow> =
            sqlx::query_as("SELECT id, title, description FROM topics ORDER BY title")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| TopicError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Topic::from).collect())
    }
}
