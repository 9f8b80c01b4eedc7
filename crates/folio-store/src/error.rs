//! Error types for content store access.

/// Error from a content store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// HTTP request failed (network error, timeout, etc).
    #[error("HTTP request failed")]
    HttpRequest(#[from] ureq::Error),

    /// HTTP response error (server returned error status).
    #[error("HTTP error: {status} - {body}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Response body (may contain error details).
        body: String,
    },

    /// JSON decoding error (response or projection shape).
    #[error("JSON error")]
    Json(#[from] serde_json::Error),

    /// I/O error reading a dataset export.
    #[error("I/O error")]
    Io(#[from] std::io::Error),

    /// A dataset export line is not a JSON document.
    #[error("invalid document on line {line} of dataset export")]
    ExportParse {
        /// 1-based line number.
        line: usize,
        /// Parse error.
        #[source]
        source: serde_json::Error,
    },

    /// No canned response for a query (mock store only).
    #[error("no response for query {0}")]
    Unmocked(&'static str),
}
