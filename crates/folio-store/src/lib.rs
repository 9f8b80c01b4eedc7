//! Content store access for Folio.
//!
//! Queries are a closed set ([`Query`]) evaluated by a [`ContentStore`]
//! backend:
//!
//! - [`HttpStore`]: the remote query API over HTTPS
//! - [`ExportStore`]: an NDJSON dataset export held in memory
//! - `MockStore` (feature `mock`): canned responses for tests
//!
//! [`Fetcher`] wraps a backend and decodes results into typed page data.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use folio_store::{ExportStore, Fetcher};
//! use serde_json::json;
//!
//! let store = ExportStore::from_documents(
//!     vec![json!({
//!         "_id": "p1",
//!         "_type": "project",
//!         "title": "Folio",
//!         "slug": {"current": "folio"}
//!     })],
//!     "abc",
//!     "production",
//! );
//! let fetcher = Fetcher::new(Arc::new(store));
//!
//! let project = fetcher.project("folio").unwrap().unwrap();
//! assert_eq!(project.title, "Folio");
//! assert!(fetcher.project("missing").unwrap().is_none());
//! ```

mod client;
mod error;
mod export;
mod fetch;
#[cfg(feature = "mock")]
mod mock;
mod projection;
pub mod query;
mod store;
pub mod types;

pub use client::HttpStore;
pub use error::StoreError;
pub use export::{ExportStore, parse_export, read_export};
pub use fetch::Fetcher;
#[cfg(feature = "mock")]
pub use mock::MockStore;
pub use projection::Dataset;
pub use query::Query;
pub use store::ContentStore;
