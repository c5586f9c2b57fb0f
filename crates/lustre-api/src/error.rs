//! Error types for lustre-api.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use lustre_auth::AuthError;
use serde_json::json;
use thiserror::Error;

/// Result type alias for lustre-api operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Generic body for failures the caller cannot act on.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Errors that can occur in lustre-api.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from lustre-core / lustre-search.
    #[error("Core error: {0}")]
    Core(#[from] lustre_core::Error),

    /// Error from lustre-auth.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// The request is malformed; the message is shown to the caller.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The caller is not authenticated; the message is shown to the caller.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Server startup or I/O failure.
    #[error("Server error: {0}")]
    Server(String),
}

impl Error {
    /// Status code and caller-facing message.
    ///
    /// Server-side failures never expose their detail.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            Error::Core(e) if e.is_client_error() => (StatusCode::BAD_REQUEST, client_message(e)),
            Error::Auth(e) if e.is_client_error() => (e.status(), e.public_message().to_string()),
            Error::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                INTERNAL_ERROR_MESSAGE.to_string(),
            ),
        }
    }
}

fn client_message(e: &lustre_core::Error) -> String {
    match e {
        lustre_core::Error::InvalidInput(msg) => msg.clone(),
        other => other.to_string(),
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            tracing::error!(error = ?self, "request failed: {self}");
        } else {
            tracing::debug!(%status, "request rejected: {self}");
        }
        (status, Json(json!({ "message": message }))).into_response()
    }
}
