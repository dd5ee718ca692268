use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::list_posts::PostData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::Comment;
use crate::domain::post::models::PostId;
use crate::inbound::http::router::AppState;

pub async fn get_post(
    State(state): State<AppState>,
    Path(post_id): Path<String>,
) -> Result<ApiSuccess<PostDetailData>, ApiError> {
    let post_id =
        PostId::from_string(&post_id).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    let (post, comments) = state.post_service.get_post(&post_id).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        PostDetailData {
            post: (&post).into(),
            comments: comments.iter().map(CommentData::from).collect(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDetailData {
    pub post: PostData,
    pub comments: Vec<CommentData>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentData {
    pub id: String,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Comment> for CommentData {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            author: comment.author.as_str().to_string(),
            content: comment.content.clone(),
            created_at: comment.created_at,
        }
    }
}
