use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;

pub async fn healthcheck() -> Result<ApiSuccess<String>, ApiError> {
    Ok(ApiSuccess::new(
        StatusCode::OK,
        "API is up and running !".to_string(),
    ))
}
