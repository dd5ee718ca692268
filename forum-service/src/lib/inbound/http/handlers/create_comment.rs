use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::get_post::CommentData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::post::models::CreateCommentCommand;
use crate::domain::post::models::PostId;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn create_comment(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(post_id): Path<String>,
    Json(body): Json<CreateCommentRequestBody>,
) -> Result<ApiSuccess<CommentData>, ApiError> {
    let post_id =
        PostId::from_string(&post_id).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    if body.content.trim().is_empty() {
        return Err(ApiError::UnprocessableEntity(
            "Content must not be empty".to_string(),
        ));
    }

    let command = CreateCommentCommand {
        post_id,
        content: body.content,
    };

    state
        .post_service
        .add_comment(command, &current_user.username)
        .await
        .map_err(ApiError::from)
        .map(|ref comment| ApiSuccess::new(StatusCode::CREATED, comment.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateCommentRequestBody {
    content: String,
}
