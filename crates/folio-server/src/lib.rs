//! HTTP server for Folio.
//!
//! Serves page data as JSON: typed documents from the content store plus
//! rendered rich-text HTML and tables of contents.
//!
//! # Routes
//!
//! | Route | Payload |
//! |-------|---------|
//! | `GET /` | homepage, latest posts, featured projects |
//! | `GET /about` | about page with rendered bio |
//! | `GET /api/site` | site settings |
//! | `GET /blogs` | post summaries, newest first |
//! | `GET /blogs/{slug}` | `{ post, toc, content, warnings? }` |
//! | `GET /blogs/category/{categorySlug}` | post summaries in a category |
//! | `GET /projects` | projects, newest first |
//! | `GET /projects/{slug}` | `{ project, toc, content, warnings? }` |
//!
//! Store calls are blocking and run on tokio's blocking pool. Responses carry
//! an `ETag` and honour `If-None-Match`.
//!
//! # Quick Start
//!
//! ```ignore
//! use folio_config::StoreConfig;
//! use folio_server::{ServerConfig, run_server};
//! use folio_store::Fetcher;
//!
//! #[tokio::main]
//! async fn main() {
//!     let fetcher = Fetcher::from_config(&StoreConfig::new("l471ihxj", "production")).unwrap();
//!     run_server(ServerConfig::default(), fetcher).await.unwrap();
//! }
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use folio_portable_text::PortableTextRenderer;
use folio_store::Fetcher;
use state::AppState;

pub use error::ServerError;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Include render warnings in responses.
    pub verbose: bool,
    /// Application version (for cache invalidation).
    pub version: String,
    /// Posts in the homepage "latest" listing.
    pub latest_posts_limit: usize,
    /// Projects in the homepage "featured" listing.
    pub featured_projects_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 7979,
            verbose: false,
            version: String::new(),
            latest_posts_limit: 6,
            featured_projects_limit: 6,
        }
    }
}

impl ServerConfig {
    /// Create server configuration from Folio config.
    #[must_use]
    pub fn from_config(config: &folio_config::Config, version: String, verbose: bool) -> Self {
        Self {
            host: config.server.host.clone(),
            port: config.server.port,
            verbose,
            version,
            latest_posts_limit: config.content.latest_posts_limit,
            featured_projects_limit: config.content.featured_projects_limit,
        }
    }
}

/// Run the server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the address is invalid or the listener fails.
pub async fn run_server(config: ServerConfig, fetcher: Fetcher) -> Result<(), ServerError> {
    let backend = fetcher.backend();
    let state = Arc::new(AppState {
        fetcher,
        renderer: PortableTextRenderer::new(),
        verbose: config.verbose,
        version: config.version.clone(),
        latest_posts_limit: config.latest_posts_limit,
        featured_projects_limit: config.featured_projects_limit,
    });

    let app = app::create_router(state);

    let addr = SocketAddr::from_str(&format!("{}:{}", config.host, config.port))?;
    tracing::info!(address = %addr, backend, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for shutdown signal (Ctrl-C).
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server...");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_from_config() {
        let mut config = folio_config::Config::default();
        config.server.port = 9000;
        config.content.latest_posts_limit = 3;

        let server = ServerConfig::from_config(&config, "1.2.3".to_owned(), true);

        assert_eq!(server.host, "127.0.0.1");
        assert_eq!(server.port, 9000);
        assert_eq!(server.latest_posts_limit, 3);
        assert_eq!(server.featured_projects_limit, 6);
        assert_eq!(server.version, "1.2.3");
        assert!(server.verbose);
    }
}
