use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::list_posts::PostData;
use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// The authenticated user's feed: posts from subscribed topics, newest
/// first. No subscriptions means an empty feed.
pub async fn get_feed(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<ApiSuccess<Vec<PostData>>, ApiError> {
    state
        .post_service
        .get_feed(&current_user.username)
        .await
        .map_err(ApiError::from)
        .map(|posts| {
            ApiSuccess::new(StatusCode::OK, posts.iter().map(PostData::from).collect())
        })
}
