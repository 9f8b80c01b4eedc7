//! Project endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use folio_portable_text::TocEntry;
use folio_store::types::Project;
use serde::Serialize;

use super::{fetch, json_response, log_warnings};
use crate::error::ServerError;
use crate::state::AppState;

#[derive(Serialize)]
struct ProjectListResponse {
    projects: Vec<Project>,
}

/// Response for GET /projects/{slug}.
#[derive(Serialize)]
struct ProjectResponse {
    project: Project,
    toc: Vec<TocEntry>,
    content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

/// Handle GET /projects.
pub(crate) async fn list_projects(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let projects = fetch(&state, |fetcher| fetcher.projects()).await?;
    json_response(&state, &headers, &ProjectListResponse { projects })
}

/// Handle GET /projects/{slug}.
///
/// The overview TOC is always extracted; projects have no opt-in flag.
pub(crate) async fn get_project(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let path = format!("/projects/{slug}");
    let project = fetch(&state, move |fetcher| fetcher.project(&slug))
        .await?
        .ok_or_else(|| ServerError::PageNotFound(path.clone()))?;

    let rendered = state.renderer.render(&project.overview);
    log_warnings(&path, &rendered.warnings);

    let response = ProjectResponse {
        toc: folio_portable_text::extract_toc(&project.overview),
        content: rendered.html(),
        warnings: state.visible_warnings(rendered.warnings),
        project,
    };
    json_response(&state, &headers, &response)
}
