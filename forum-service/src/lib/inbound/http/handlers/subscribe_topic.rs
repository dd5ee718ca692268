use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::topic::models::TopicId;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

/// Subscribe the authenticated user to a topic. Subscribing twice is a
/// no-op and still succeeds.
pub async fn subscribe_topic(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(topic_id): Path<String>,
) -> Result<ApiSuccess<SubscriptionData>, ApiError> {
    let topic_id = TopicId::from_string(&topic_id)
        .map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;

    state
        .topic_service
        .subscribe(&topic_id, &current_user.username)
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        SubscriptionData {
            message: "Subscribed".to_string(),
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionData {
    pub message: String,
}
