use axum::extract::Request;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::StatusCode;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::user::models::Username;

/// Extension type holding the resolved identity of the request's caller.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub username: Username,
}

/// Middleware that resolves a bearer token to a [`CurrentUser`] extension.
///
/// Resolution never rejects the request. A missing header, a bad token, or
/// a token whose subject no longer exists all leave the request without an
/// identity and let routing decide whether that matters.
pub async fn resolve_identity(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    if let Some(token) = bearer_token(req.headers()) {
        match resolve_token(&state, &token).await {
            Ok(current_user) => {
                req.extensions_mut().insert(current_user);
            }
            Err(reason) => {
                tracing::warn!("Identity resolution failed: {}", reason);
            }
        }
    }

    next.run(req).await
}

/// Middleware that rejects requests carrying no resolved identity.
///
/// Layered after [`resolve_identity`] on every protected route.
pub async fn require_authentication(req: Request, next: Next) -> Result<Response, Response> {
    if req.extensions().get::<CurrentUser>().is_none() {
        return Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "Authentication required"
            })),
        )
            .into_response());
    }

    Ok(next.run(req).await)
}

async fn resolve_token(state: &AppState, token: &str) -> Result<CurrentUser, String> {
    let claims: auth::Claims = state
        .authenticator
        .validate_token(token)
        .map_err(|e| format!("token rejected: {}", e))?;

    let username =
        Username::new(claims.sub).map_err(|e| format!("invalid token subject: {}", e))?;

    // A valid signature is not enough; the subject must still exist.
    let user = state
        .user_service
        .get_by_username(&username)
        .await
        .map_err(|e| format!("token subject not resolvable: {}", e))?;

    Ok(CurrentUser {
        user_id: user.id,
        username: user.username,
    })
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get(http::header::AUTHORIZATION)?;
    let auth_str = auth_header.to_str().ok()?;
    auth_str
        .strip_prefix("Bearer ")
        .map(|token| token.to_string())
}
