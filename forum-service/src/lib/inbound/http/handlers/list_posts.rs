use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::Post;
use crate::inbound::http::router::AppState;

pub async fn list_posts(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<PostData>>, ApiError> {
    state
        .post_service
        .list_posts()
        .await
        .map_err(ApiError::from)
        .map(|posts| {
            ApiSuccess::new(StatusCode::OK, posts.iter().map(PostData::from).collect())
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostData {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub topic_id: String,
    pub topic_title: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title.clone(),
            content: post.content.clone(),
            author: post.author.as_str().to_string(),
            topic_id: post.topic_id.to_string(),
            topic_title: post.topic_title.clone(),
            created_at: post.created_at,
        }
    }
}
