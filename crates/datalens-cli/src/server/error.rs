//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use datalens::DatalensError;
use serde::Serialize;
use tracing::warn;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from client.
    BadRequest(String),
    /// Error from the datalens library.
    Datalens(DatalensError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Datalens(e) => match e {
                DatalensError::UnknownSample(_) => StatusCode::NOT_FOUND,
                DatalensError::Io { .. } | DatalensError::Json(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                _ => StatusCode::BAD_REQUEST,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, message) = match self {
            ApiError::BadRequest(msg) => ("bad_request", msg),
            ApiError::Datalens(e) => {
                if status.is_server_error() {
                    warn!(error = %e, "request failed");
                }
                ("datalens_error", e.to_string())
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<DatalensError> for ApiError {
    fn from(err: DatalensError) -> Self {
        ApiError::Datalens(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Datalens(e) => write!(f, "Datalens error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(DatalensError::UnknownSample("x".into())).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(DatalensError::UnsupportedFormat("x".into())).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::BadRequest("x".into()).to_string(), "Bad request: x");
    }
}
