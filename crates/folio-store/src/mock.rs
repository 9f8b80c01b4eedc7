//! Mock content store for testing.
//!
//! Returns canned JSON per query. Queries without a response fail with
//! [`StoreError::Unmocked`].

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::error::StoreError;
use crate::query::Query;
use crate::store::ContentStore;

/// Content store returning canned responses.
///
/// Exact queries take precedence over responses registered by query name.
#[derive(Debug, Default)]
pub struct MockStore {
    exact: RwLock<HashMap<Query, Value>>,
    by_name: RwLock<HashMap<&'static str, Value>>,
    calls: RwLock<Vec<Query>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to this exact query.
    #[must_use]
    pub fn with_response(self, query: Query, response: Value) -> Self {
        self.exact.write().unwrap().insert(query, response);
        self
    }

    /// Respond to every query with this name (see [`Query::name`]).
    #[must_use]
    pub fn with_named_response(self, name: &'static str, response: Value) -> Self {
        self.by_name.write().unwrap().insert(name, response);
        self
    }

    /// Queries received so far, in order.
    pub fn calls(&self) -> Vec<Query> {
        self.calls.read().unwrap().clone()
    }
}

impl ContentStore for MockStore {
    fn query(&self, query: &Query) -> Result<Value, StoreError> {
        self.calls.write().unwrap().push(query.clone());

        if let Some(response) = self.exact.read().unwrap().get(query) {
            return Ok(response.clone());
        }
        self.by_name
            .read()
            .unwrap()
            .get(query.name())
            .cloned()
            .ok_or(StoreError::Unmocked(query.name()))
    }

    fn backend(&self) -> &'static str {
        "mock"
    }
}
