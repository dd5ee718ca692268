use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::User;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn get_me(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<ApiSuccess<UserProfileData>, ApiError> {
    state
        .user_service
        .get_by_username(&current_user.username)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::OK, user.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfileData {
    pub id: String,
    pub username: String,
    pub email: String,
    pub subscriptions: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserProfileData {
    fn from(user: &User) -> Self {
        let mut subscriptions: Vec<String> = user
            .subscriptions
            .iter()
            .map(ToString::to_string)
            .collect();
        subscriptions.sort();

        Self {
            id: user.id.to_string(),
            username: user.username.as_str().to_string(),
            email: user.email.as_str().to_string(),
            subscriptions,
            created_at: user.created_at,
        }
    }
}
