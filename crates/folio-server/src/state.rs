//! Application state.
//!
//! Shared state for all request handlers.

use folio_portable_text::PortableTextRenderer;
use folio_store::Fetcher;

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Typed content store access.
    pub(crate) fetcher: Fetcher,
    /// Rich text renderer with the default HTML components.
    pub(crate) renderer: PortableTextRenderer,
    /// Include render warnings in responses.
    pub(crate) verbose: bool,
    /// Application version for cache invalidation.
    pub(crate) version: String,
    /// Posts in the homepage "latest" listing.
    pub(crate) latest_posts_limit: usize,
    /// Projects in the homepage "featured" listing.
    pub(crate) featured_projects_limit: usize,
}

impl AppState {
    /// Render warnings to expose in a response (verbose mode only).
    pub(crate) fn visible_warnings(&self, warnings: Vec<String>) -> Vec<String> {
        if self.verbose { warnings } else { Vec::new() }
    }
}
