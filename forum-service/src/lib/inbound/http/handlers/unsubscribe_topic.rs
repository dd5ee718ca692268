use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::subscribe_topic::SubscriptionData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::topic::models::TopicId;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// Unsubscribe the authenticated user from a topic. Unsubscribing from a
/// topic the user never followed succeeds, but the topic itself must exist.
pub async fn unsubscribe_topic(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(topic_id): Path<String>,
) -> Result<ApiSuccess<SubscriptionData>, ApiError> {
    let topic_id = TopicId::from_string(&topic_id)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state
        .topic_service
        .unsubscribe(&topic_id, &current_user.username)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SubscriptionData {
            message: "Unsubscribed".to_string(),
        },
    ))
}
