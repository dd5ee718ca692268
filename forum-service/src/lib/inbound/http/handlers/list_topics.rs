use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::topic::models::Topic;
use crate::inbound::http::router::AppState;

pub async fn list_topics(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<TopicData>>, ApiError> {
    state
        .topic_service
        .list_topics()
        .await
        .map_err(ApiError::from)
        .map(|topics| {
            ApiSuccess::new(
                StatusCode::OK,
                topics.iter().map(TopicData::from).collect(),
            )
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopicData {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl From<&Topic> for TopicData {
    fn from(topic: &Topic) -> Self {
        Self {
            id: topic.id.to_string(),
            title: topic.title.clone(),
            description: topic.description.clone(),
        }
    }
}
