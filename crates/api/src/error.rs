//! Error rendering for API responses.
//!
//! Every failure leaves the API as `{ "error": { "message": "..." } }`.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dompet_shared::{AppError, config::Environment};
use serde_json::json;
use tracing::error;

use crate::AppState;

/// Message sent in place of 500 details in production.
pub const HIDDEN_SERVER_ERROR: &str = "Server error";

/// Handler error wrapping [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Shorthand for a 400 with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::Validation(message.into()))
    }
}

impl<E> From<E> for ApiError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Builds an error envelope response.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": { "message": message } }))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.0.is_server_error() {
            error!(error_code = self.0.error_code(), error = %self.0, "Request failed");
        }

        error_response(status, self.0.message())
    }
}

/// Replaces 500 bodies with a generic message in production.
pub async fn hide_server_errors(State(state): State<AppState>, response: Response) -> Response {
    if state.environment == Environment::Production && response.status().is_server_error() {
        return error_response(response.status(), HIDDEN_SERVER_ERROR);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[rstest]
    #[case(AppError::Validation("bad".into()), StatusCode::BAD_REQUEST)]
    #[case(AppError::Conflict("bad".into()), StatusCode::BAD_REQUEST)]
    #[case(AppError::Unauthorized("bad".into()), StatusCode::UNAUTHORIZED)]
    #[case(AppError::NotFound("bad".into()), StatusCode::NOT_FOUND)]
    #[case(AppError::Database("bad".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    #[tokio::test]
    async fn test_status_and_envelope(#[case] err: AppError, #[case] status: StatusCode) {
        let response = ApiError(err).into_response();

        assert_eq!(response.status(), status);
        assert_eq!(
            body_json(response).await,
            json!({ "error": { "message": "bad" } })
        );
    }
}
