//! API error type with `{"detail": ...}` JSON bodies.

use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use abom_core::{emit_request_rejected, AbomError, METRICS};

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// API-level errors with HTTP status mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Map a scoring error, prefixing internal failures with `context`.
    pub fn from_abom(err: AbomError, context: &str) -> Self {
        if !err.is_client_error() {
            return ApiError::Internal(format!("{context}: {err}"));
        }
        match err {
            AbomError::MalformedDocument(e) => {
                ApiError::BadRequest(format!("Invalid JSON format: {e}"))
            }
            e => ApiError::BadRequest(e.to_string()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<MultipartError> for ApiError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(format!("Upload too large: {}", err.body_text()))
        } else {
            ApiError::BadRequest(format!("Invalid upload: {}", err.body_text()))
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(detail = %self, "request failed");
        }
        emit_request_rejected(status.as_u16(), &self);
        METRICS.record_rejection(status.as_u16());

        let body = ErrorBody {
            detail: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
