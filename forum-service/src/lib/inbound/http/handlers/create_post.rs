use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::list_posts::PostData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::CreatePostCommand;
use crate::domain::topic::models::TopicId;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::topic::errors::TopicIdError;

pub async fn create_post(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(body): Json<CreatePostRequestBody>,
) -> Result<ApiSuccess<PostData>, ApiError> {
    state
        .post_service
        .create_post(body.try_into_command()?, &current_user.username)
        .await
        .map_err(ApiError::from)
        .map(|ref post| ApiSuccess::new(StatusCode::CREATED, post.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatePostRequestBody {
    title: String,
    content: String,
    topic_id: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreatePostRequestError {
    #[error("Invalid topic ID: {0}")]
    TopicId(#[from] TopicIdError),

    #[error("Title must not be empty")]
    EmptyTitle,

    #[error("Content must not be empty")]
    EmptyContent,
}

impl CreatePostRequestBody {
    fn try_into_command(self) -> Result<CreatePostCommand, ParseCreatePostRequestError> {
        if self.title.trim().is_empty() {
            return Err(ParseCreatePostRequestError::EmptyTitle);
        }
        if self.content.trim().is_empty() {
            return Err(ParseCreatePostRequestError::EmptyContent);
        }
        let topic_id = TopicId::from_string(&self.topic_id)?;
        Ok(CreatePostCommand {
            title: self.title,
            content: self.content,
            topic_id,
        })
    }
}

impl From<ParseCreatePostRequestError> for ApiError {
    fn from(err: ParseCreatePostRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
