//! Error types for templyk-api.
//!
//! Wraps the core error taxonomy and maps it onto HTTP status codes:
//! schema and parse failures are the caller's to fix (422), a missing
//! template is 404, explicit feature gaps are 501, and everything else
//! is a 500. Every error body is `{"error": "<message>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use templyk_core::Error as CoreError;
use thiserror::Error;

/// Result type alias for templyk-api operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in templyk-api.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from templyk-core (and the crates that share its taxonomy).
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl Error {
    fn status(&self) -> StatusCode {
        let Error::Core(err) = self;
        match err {
            CoreError::Schema { .. } | CoreError::Parse { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            CoreError::TemplateNotFound { .. } => StatusCode::NOT_FOUND,
            CoreError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {self}");
        } else {
            tracing::debug!("request rejected: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
