//! Homepage, about page and site settings endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use folio_store::types::{AboutPage, BlogPostSummary, Homepage, ProjectSummary, SiteSettings};
use serde::Serialize;

use super::{fetch, json_response, log_warnings};
use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HomepageResponse {
    /// `null` when no homepage document exists.
    homepage: Option<Homepage>,
    /// Rendered about section HTML.
    about_content: String,
    latest_posts: Vec<BlogPostSummary>,
    featured_projects: Vec<ProjectSummary>,
}

#[derive(Serialize)]
struct AboutResponse {
    about: AboutPage,
    /// Rendered bio HTML.
    content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

#[derive(Serialize)]
struct SiteResponse {
    settings: SiteSettings,
}

/// Handle GET /.
///
/// Listings are fetched only for sections the homepage shows.
pub(crate) async fn get_homepage(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let latest_limit = state.latest_posts_limit;
    let featured_limit = state.featured_projects_limit;
    let (homepage, latest_posts, featured_projects) = fetch(&state, move |fetcher| {
        let homepage = fetcher.homepage()?;
        let show_posts = homepage.as_ref().is_none_or(|h| h.show_latest_blogs);
        let show_projects = homepage.as_ref().is_none_or(|h| h.show_featured_projects);
        let posts = if show_posts {
            fetcher.latest_blog_posts(latest_limit)?
        } else {
            Vec::new()
        };
        let projects = if show_projects {
            fetcher.featured_projects(featured_limit)?
        } else {
            Vec::new()
        };
        Ok((homepage, posts, projects))
    })
    .await?;

    let rendered = homepage
        .as_ref()
        .map(|h| state.renderer.render(&h.about_text))
        .unwrap_or_default();
    log_warnings("/", &rendered.warnings);

    let response = HomepageResponse {
        homepage,
        about_content: rendered.html(),
        latest_posts,
        featured_projects,
    };
    json_response(&state, &headers, &response)
}

/// Handle GET /about.
pub(crate) async fn get_about(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let about = fetch(&state, |fetcher| fetcher.about_page())
        .await?
        .ok_or_else(|| ServerError::PageNotFound("/about".to_owned()))?;

    let rendered = state.renderer.render(&about.bio);
    log_warnings("/about", &rendered.warnings);

    let response = AboutResponse {
        content: rendered.html(),
        warnings: state.visible_warnings(rendered.warnings),
        about,
    };
    json_response(&state, &headers, &response)
}

/// Handle GET /api/site.
pub(crate) async fn get_site_settings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let settings = fetch(&state, |fetcher| fetcher.site_settings())
        .await?
        .ok_or_else(|| ServerError::PageNotFound("/api/site".to_owned()))?;
    json_response(&state, &headers, &SiteResponse { settings })
}
