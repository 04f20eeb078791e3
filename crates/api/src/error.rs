//! Mapping of application errors to HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use hopfx_shared::AppError;
use serde_json::json;
use tracing::warn;

/// Handler error wrapper rendering `{error, detail}` bodies.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl<E> From<E> for ApiError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        warn!(status = %status, error = %self.0, "Request failed");

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "detail": self.0.to_string(),
            })),
        )
            .into_response()
    }
}
