//! HTTP request handlers.

pub(crate) mod blogs;
pub(crate) mod projects;
pub(crate) mod site;

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use folio_store::{Fetcher, StoreError};
use md5::{Digest, Md5};
use serde::Serialize;

use crate::error::ServerError;
use crate::state::AppState;

/// Run a blocking store call off the async runtime.
pub(crate) async fn fetch<T, F>(state: &Arc<AppState>, f: F) -> Result<T, ServerError>
where
    T: Send + 'static,
    F: FnOnce(&Fetcher) -> Result<T, StoreError> + Send + 'static,
{
    let state = Arc::clone(state);
    let result = tokio::task::spawn_blocking(move || f(&state.fetcher)).await?;
    Ok(result?)
}

/// Serialize a payload as JSON with an `ETag`, or answer 304 when the
/// client already has it.
pub(crate) fn json_response<T: Serialize>(
    state: &AppState,
    headers: &HeaderMap,
    payload: &T,
) -> Result<Response, ServerError> {
    let body = serde_json::to_string(payload)?;
    let etag = compute_etag(&state.version, &body);

    if let Some(if_none_match) = headers.get(header::IF_NONE_MATCH)
        && if_none_match.as_bytes() == etag.as_bytes()
    {
        return Ok((StatusCode::NOT_MODIFIED, [(header::ETAG, etag)]).into_response());
    }

    Ok((
        [
            (header::ETAG, etag),
            (header::CONTENT_TYPE, "application/json".to_owned()),
            (header::CACHE_CONTROL, "public, max-age=60".to_owned()),
        ],
        body,
    )
        .into_response())
}

/// Log render warnings for a page.
pub(crate) fn log_warnings(path: &str, warnings: &[String]) {
    for warning in warnings {
        tracing::warn!(path = %path, warning = %warning, "Render warning");
    }
}

/// Compute `ETag` from version and content.
///
/// Uses MD5 hash truncated to 64 bits (16 hex chars).
fn compute_etag(version: &str, content: &str) -> String {
    let hash = Md5::digest(format!("{version}:{content}").as_bytes());
    format!("\"{}\"", &hex::encode(hash)[..16])
}
