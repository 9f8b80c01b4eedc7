//! Blog endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use folio_portable_text::TocEntry;
use folio_store::types::{BlogPost, BlogPostSummary};
use serde::Serialize;

use super::{fetch, json_response, log_warnings};
use crate::error::ServerError;
use crate::state::AppState;

/// Response for GET /blogs.
#[derive(Serialize)]
struct BlogListResponse {
    posts: Vec<BlogPostSummary>,
}

/// Response for GET /blogs/category/{categorySlug}.
#[derive(Serialize)]
struct CategoryResponse {
    category: String,
    posts: Vec<BlogPostSummary>,
}

/// Response for GET /blogs/{slug}.
#[derive(Serialize)]
struct BlogPostResponse {
    post: BlogPost,
    /// Empty unless the post enables a table of contents.
    toc: Vec<TocEntry>,
    /// Rendered body HTML.
    content: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    warnings: Vec<String>,
}

/// Handle GET /blogs.
pub(crate) async fn list_blogs(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let posts = fetch(&state, |fetcher| fetcher.blog_posts()).await?;
    let response = BlogListResponse {
        posts: posts.iter().map(BlogPost::summary).collect(),
    };
    json_response(&state, &headers, &response)
}

/// Handle GET /blogs/{slug}.
pub(crate) async fn get_blog(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let path = format!("/blogs/{slug}");
    let post = fetch(&state, move |fetcher| fetcher.blog_post(&slug))
        .await?
        .ok_or_else(|| ServerError::PageNotFound(path.clone()))?;

    let rendered = state.renderer.render(&post.body);
    log_warnings(&path, &rendered.warnings);

    let toc = post.table_of_contents();
    let content = rendered.html();
    let response = BlogPostResponse {
        post,
        toc,
        content,
        warnings: state.visible_warnings(rendered.warnings),
    };
    json_response(&state, &headers, &response)
}

/// Handle GET /blogs/category/{categorySlug}.
pub(crate) async fn list_category(
    Path(category_slug): Path<String>,
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, ServerError> {
    let category = category_slug.clone();
    let posts = fetch(&state, move |fetcher| {
        fetcher.blog_posts_by_category(&category_slug)
    })
    .await?;
    json_response(&state, &headers, &CategoryResponse { category, posts })
}
