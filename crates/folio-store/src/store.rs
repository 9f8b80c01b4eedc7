//! Content store abstraction.

use serde_json::Value;

use crate::error::StoreError;
use crate::query::Query;

/// A backend that evaluates [`Query`]s.
///
/// Implementations return the query's JSON result: an array for list
/// queries, an object or `null` for single-document queries.
pub trait ContentStore: Send + Sync {
    /// Evaluate a query.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the backend cannot be reached or its
    /// response cannot be decoded.
    fn query(&self, query: &Query) -> Result<Value, StoreError>;

    /// Backend identifier for logs (e.g. "http", "export").
    fn backend(&self) -> &'static str;
}
