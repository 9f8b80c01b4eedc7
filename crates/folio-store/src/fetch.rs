//! Typed fetch adapter.
//!
//! One method per query. Each call is a single round trip to the backend;
//! there is no caching and no retry. Single-document lookups return `None`
//! when nothing matches.

use std::sync::Arc;
use std::time::Instant;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;

use folio_config::StoreConfig;

use crate::client::HttpStore;
use crate::error::StoreError;
use crate::export::ExportStore;
use crate::query::Query;
use crate::store::ContentStore;
use crate::types::{
    AboutPage, BlogPost, BlogPostSummary, Homepage, Project, ProjectSummary, RawBlogPost,
    RawBlogPostSummary, RawProject, RawProjectSummary, SiteSettings,
};

/// Typed access to a [`ContentStore`].
#[derive(Clone)]
pub struct Fetcher {
    store: Arc<dyn ContentStore>,
}

impl Fetcher {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self { store }
    }

    /// Build the backend selected by configuration: the dataset export when
    /// `export_file` is set, the remote API otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the export cannot be loaded.
    pub fn from_config(config: &StoreConfig) -> Result<Self, StoreError> {
        let store: Arc<dyn ContentStore> = match &config.export_file {
            Some(path) => Arc::new(ExportStore::open(
                path,
                &config.project_id,
                &config.dataset,
            )?),
            None => Arc::new(HttpStore::new(config)),
        };
        Ok(Self::new(store))
    }

    /// Backend identifier.
    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }

    fn run(&self, query: &Query) -> Result<Value, StoreError> {
        let start = Instant::now();
        let result = self.store.query(query);
        info!(
            query = query.name(),
            backend = self.store.backend(),
            elapsed = ?start.elapsed(),
            ok = result.is_ok(),
            "Fetched"
        );
        result
    }

    fn fetch_list<R, T>(&self, query: &Query) -> Result<Vec<T>, StoreError>
    where
        R: DeserializeOwned,
        T: From<R>,
    {
        let value = self.run(query)?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        let raw: Vec<R> = serde_json::from_value(value)?;
        Ok(raw.into_iter().map(T::from).collect())
    }

    fn fetch_one<R, T>(&self, query: &Query) -> Result<Option<T>, StoreError>
    where
        R: DeserializeOwned,
        T: From<R>,
    {
        let raw: Option<R> = serde_json::from_value(self.run(query)?)?;
        Ok(raw.map(T::from))
    }

    /// All blog posts, newest first.
    pub fn blog_posts(&self) -> Result<Vec<BlogPost>, StoreError> {
        self.fetch_list::<RawBlogPost, _>(&Query::AllBlogPosts)
    }

    /// Blog post with this exact slug.
    pub fn blog_post(&self, slug: &str) -> Result<Option<BlogPost>, StoreError> {
        self.fetch_one::<RawBlogPost, _>(&Query::BlogPostBySlug {
            slug: slug.to_owned(),
        })
    }

    /// Posts in a category, newest first.
    pub fn blog_posts_by_category(
        &self,
        category_slug: &str,
    ) -> Result<Vec<BlogPostSummary>, StoreError> {
        self.fetch_list::<RawBlogPostSummary, _>(&Query::BlogPostsByCategory {
            category_slug: category_slug.to_owned(),
        })
    }

    /// The `limit` newest posts.
    pub fn latest_blog_posts(&self, limit: usize) -> Result<Vec<BlogPostSummary>, StoreError> {
        self.fetch_list::<RawBlogPostSummary, _>(&Query::LatestBlogPosts { limit })
    }

    /// All projects, newest first.
    pub fn projects(&self) -> Result<Vec<Project>, StoreError> {
        self.fetch_list::<RawProject, _>(&Query::AllProjects)
    }

    /// Project with this exact slug.
    pub fn project(&self, slug: &str) -> Result<Option<Project>, StoreError> {
        self.fetch_one::<RawProject, _>(&Query::ProjectBySlug {
            slug: slug.to_owned(),
        })
    }

    /// The `limit` newest projects.
    pub fn featured_projects(&self, limit: usize) -> Result<Vec<ProjectSummary>, StoreError> {
        self.fetch_list::<RawProjectSummary, _>(&Query::FeaturedProjects { limit })
    }

    pub fn site_settings(&self) -> Result<Option<SiteSettings>, StoreError> {
        self.fetch_one::<SiteSettings, _>(&Query::SiteSettings)
    }

    pub fn homepage(&self) -> Result<Option<Homepage>, StoreError> {
        self.fetch_one::<Homepage, _>(&Query::Homepage)
    }

    pub fn about_page(&self) -> Result<Option<AboutPage>, StoreError> {
        self.fetch_one::<AboutPage, _>(&Query::AboutPage)
    }
}
