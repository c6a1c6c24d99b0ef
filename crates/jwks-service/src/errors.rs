use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::path::PathBuf;
use thiserror::Error;

/// Request-level failures of the key set endpoint.
///
/// Per-file problems never show up here; they are [`crate::crypto::KeyParseError`]s
/// recovered inside the service. Filesystem paths stay in the server log and
/// are never echoed to clients.
#[derive(Debug, Error)]
pub enum JwksError {
    #[error("Key directory not found: {}", .0.display())]
    KeyDirectoryNotFound(PathBuf),

    #[error("Key directory unreadable: {0}")]
    KeyDirectoryUnreadable(String),
}

impl JwksError {
    /// HTTP status code for this error (for metrics recording).
    pub fn status_code(&self) -> StatusCode {
        match self {
            JwksError::KeyDirectoryNotFound(_) => StatusCode::NOT_FOUND,
            JwksError::KeyDirectoryUnreadable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for JwksError {
    fn into_response(self) -> Response {
        let message = match &self {
            JwksError::KeyDirectoryNotFound(_) => "Key directory not found.",
            JwksError::KeyDirectoryUnreadable(_) => "An internal error occurred.",
        };

        (self.status_code(), message).into_response()
    }
}
