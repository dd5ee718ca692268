use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::get_me::UserProfileData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::Username;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::EmailError;
use crate::user::errors::UsernameError;

/// Update the authenticated user's profile.
///
/// A fresh token is issued with the response. The username may have changed
/// and the old token's subject would stop resolving.
pub async fn update_me(
    State(state): State<AppState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(body): Json<UpdateMeRequestBody>,
) -> Result<ApiSuccess<UpdateMeResponseData>, ApiError> {
    let user = state
        .user_service
        .update_profile(&current_user.username, body.try_into_command()?)
        .await?;

    let claims = auth::Claims::for_subject(user.username.as_str(), state.jwt_expiration_hours);
    let token = state
        .authenticator
        .generate_token(&claims)
        .map_err(|e| ApiError::InternalServerError(format!("Token generation failed: {}", e)))?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        UpdateMeResponseData {
            user: (&user).into(),
            token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateMeRequestBody {
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

#[derive(Debug, Clone, Error)]
enum ParseUpdateMeRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl UpdateMeRequestBody {
    fn try_into_command(self) -> Result<UpdateProfileCommand, ParseUpdateMeRequestError> {
        let username = self.username.map(Username::new).transpose()?;
        let email = self.email.map(EmailAddress::new).transpose()?;
        Ok(UpdateProfileCommand {
            username,
            email,
            password: self.password,
        })
    }
}

impl From<ParseUpdateMeRequestError> for ApiError {
    fn from(err: ParseUpdateMeRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateMeResponseData {
    pub user: UserProfileData,
    pub token: String,
}
