//! Router construction.
//!
//! Builds the axum router with all routes and middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use crate::handlers;
use crate::middleware::security;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let routes = Router::new()
        .route("/", get(handlers::site::get_homepage))
        .route("/about", get(handlers::site::get_about))
        .route("/api/site", get(handlers::site::get_site_settings))
        .route("/blogs", get(handlers::blogs::list_blogs))
        .route("/blogs/{slug}", get(handlers::blogs::get_blog))
        .route(
            "/blogs/category/{category_slug}",
            get(handlers::blogs::list_category),
        )
        .route("/projects", get(handlers::projects::list_projects))
        .route("/projects/{slug}", get(handlers::projects::get_project));
    security::with_security_headers(routes).with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use folio_portable_text::PortableTextRenderer;
    use folio_store::{ContentStore, ExportStore, Fetcher, MockStore, Query};
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    fn router_with(store: Arc<dyn ContentStore>, verbose: bool) -> Router {
        create_router(Arc::new(AppState {
            fetcher: Fetcher::new(store),
            renderer: PortableTextRenderer::new(),
            verbose,
            version: "test".to_owned(),
            latest_posts_limit: 6,
            featured_projects_limit: 6,
        }))
    }

    fn export_router() -> Router {
        let documents = vec![
            json!({"_id": "author-1", "_type": "blogAuthor", "name": "Ada"}),
            json!({"_id": "cat-rust", "_type": "blogCategory", "title": "Rust", "slug": {"current": "rust"}}),
            json!({"_id": "post-1", "_type": "blog", "_createdAt": "2025-01-01T00:00:00Z",
                   "title": "Hello", "slug": {"current": "hello"},
                   "author": {"_ref": "author-1"}, "category": {"_ref": "cat-rust"},
                   "enableTableOfContents": true,
                   "content": [
                       {"_type": "block", "style": "h1", "children": [{"_type": "span", "text": "A"}]},
                       {"_type": "youtube", "url": "https://youtu.be/x"},
                       {"_type": "block", "children": [{"_type": "span", "text": "x"}]}
                   ]}),
            json!({"_id": "project-1", "_type": "project", "title": "Folio", "slug": {"current": "folio"},
                   "overview": [{"_type": "block", "style": "h2", "children": [{"_type": "span", "text": "Goals"}]}]}),
            json!({"_id": "home", "_type": "homepage", "heroTitle": "Hi", "showFeaturedProjects": false}),
        ];
        router_with(
            Arc::new(ExportStore::from_documents(documents, "abc", "production")),
            true,
        )
    }

    async fn send(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Value) {
        let req = Request::get(uri).body(Body::empty()).unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let headers = res.headers().clone();
        let body = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, headers, value)
    }

    #[tokio::test]
    async fn test_blog_detail() {
        let (status, headers, body) = send(export_router(), "/blogs/hello").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["post"]["slug"], "hello");
        assert_eq!(body["post"]["author"]["name"], "Ada");
        assert_eq!(body["toc"], json!([{"id": "heading-0", "text": "A", "level": 1}]));
        assert_eq!(
            body["content"],
            r#"<h1 id="heading-0">A</h1><p>x</p>"#
        );
        assert_eq!(body["warnings"].as_array().unwrap().len(), 1);
        assert!(headers.contains_key(header::ETAG));
        assert_eq!(headers["x-frame-options"], "DENY");
        assert_eq!(headers["x-content-type-options"], "nosniff");
        assert!(headers.contains_key("content-security-policy"));
        assert_eq!(headers["referrer-policy"], "no-referrer");
    }

    #[tokio::test]
    async fn test_missing_slug_is_404() {
        let (status, headers, body) = send(export_router(), "/blogs/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["path"], "/blogs/missing");
        assert_eq!(headers["x-frame-options"], "DENY");

        let (status, _, _) = send(export_router(), "/projects/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_if_none_match_returns_304() {
        let (_, headers, _) = send(export_router(), "/projects/folio").await;
        let etag = headers[header::ETAG].clone();

        let req = Request::get("/projects/folio")
            .header(header::IF_NONE_MATCH, etag)
            .body(Body::empty())
            .unwrap();
        let res = export_router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_MODIFIED);
    }

    #[tokio::test]
    async fn test_project_detail_has_toc() {
        let (status, _, body) = send(export_router(), "/projects/folio").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["project"]["title"], "Folio");
        assert_eq!(body["toc"][0]["id"], "heading-0");
        assert_eq!(body.get("warnings"), None);
    }

    #[tokio::test]
    async fn test_category_listing() {
        let (status, _, body) = send(export_router(), "/blogs/category/rust").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "rust");
        assert_eq!(body["posts"][0]["slug"], "hello");

        let (_, _, body) = send(export_router(), "/blogs/category/none").await;
        assert!(body["posts"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_homepage_respects_section_flags() {
        let (status, _, body) = send(export_router(), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["homepage"]["heroTitle"], "Hi");
        assert_eq!(body["latestPosts"].as_array().unwrap().len(), 1);
        assert!(body["featuredProjects"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_singletons_are_404() {
        let (status, _, _) = send(export_router(), "/about").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _, _) = send(export_router(), "/api/site").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_store_failure_is_502_without_details() {
        let (status, _, body) = send(router_with(Arc::new(MockStore::new()), false), "/blogs").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, json!({"error": "Content temporarily unavailable"}));
    }

    #[tokio::test]
    async fn test_warnings_hidden_unless_verbose() {
        let store = MockStore::new().with_response(
            Query::BlogPostBySlug {
                slug: "hello".to_owned(),
            },
            json!({"_id": "p1", "slug": "hello", "title": "Hello",
                   "content": [{"_type": "widget"}]}),
        );
        let (status, _, body) = send(router_with(Arc::new(store), false), "/blogs/hello").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["content"], "");
        assert_eq!(body.get("warnings"), None);
    }
}
