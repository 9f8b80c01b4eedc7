//! Error types for the HTTP server.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_store::StoreError;
use serde_json::json;

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No document at the requested path.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// Content store failure.
    #[error("Content store error: {0}")]
    Store(#[from] StoreError),

    /// Blocking fetch task panicked or was cancelled.
    #[error("Fetch task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Response serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid bind address.
    #[error("Invalid address: {0}")]
    Address(#[from] std::net::AddrParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::PageNotFound(path) => (
                StatusCode::NOT_FOUND,
                json!({"error": "Page not found", "path": path}),
            ),
            Self::Store(err) => {
                tracing::error!(error = ?err, "Content store request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({"error": "Content temporarily unavailable"}),
                )
            }
            _ => {
                tracing::error!(error = %self, "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "Internal server error"}),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
