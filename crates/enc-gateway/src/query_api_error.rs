//! Error envelope returned by the query API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub(crate) const INVALID_MODEL_MESSAGE: &str = "Invalid model";
pub(crate) const JSON_NOT_FOUND_MESSAGE: &str = "JSON not found";
pub(crate) const FILE_NOT_FOUND_MESSAGE: &str = "File not found";

/// Error payload rendered as `{"error": "<message>"}`.
#[derive(Debug)]
pub(crate) struct QueryApiError {
    pub(crate) status: StatusCode,
    pub(crate) message: String,
}

impl QueryApiError {
    pub(crate) fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_model() -> Self {
        Self::new(StatusCode::NOT_FOUND, INVALID_MODEL_MESSAGE)
    }

    pub(crate) fn json_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, JSON_NOT_FOUND_MESSAGE)
    }

    pub(crate) fn file_not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, FILE_NOT_FOUND_MESSAGE)
    }

    pub(crate) fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl IntoResponse for QueryApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::warn!(status = %self.status, error = %self.message, "query request failed");
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}
