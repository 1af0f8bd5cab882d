//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use gradebook_domain::error::GradebookError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`GradebookError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(GradebookError);

impl From<GradebookError> for ApiError {
    fn from(err: GradebookError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            GradebookError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            GradebookError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            GradebookError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
