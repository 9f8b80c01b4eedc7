//! Dataset export backend.
//!
//! Loads an NDJSON export (one document per line) into memory and evaluates
//! queries in process.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::error::StoreError;
use crate::projection::Dataset;
use crate::query::Query;
use crate::store::ContentStore;

/// Parse NDJSON export text, skipping blank lines.
///
/// # Errors
///
/// Returns [`StoreError::ExportParse`] with the 1-based line number of the
/// first line that is not valid JSON.
pub fn parse_export(content: &str) -> Result<Vec<Value>, StoreError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|source| StoreError::ExportParse {
                line: index + 1,
                source,
            })
        })
        .collect()
}

/// Read and parse an NDJSON export file, drafts included.
pub fn read_export(path: &Path) -> Result<Vec<Value>, StoreError> {
    let content = std::fs::read_to_string(path)?;
    parse_export(&content)
}

/// Content store backed by a dataset export.
#[derive(Debug)]
pub struct ExportStore {
    dataset: Dataset,
}

impl ExportStore {
    /// Load an export file.
    ///
    /// `project_id` and `dataset` are used to derive asset URLs for assets
    /// not present in the export.
    pub fn open(path: &Path, project_id: &str, dataset: &str) -> Result<Self, StoreError> {
        let documents = read_export(path)?;
        let store = Self::from_documents(documents, project_id, dataset);
        debug!(
            path = %path.display(),
            documents = store.dataset.len(),
            "Loaded dataset export"
        );
        Ok(store)
    }

    /// Create a store from already parsed documents.
    pub fn from_documents(documents: Vec<Value>, project_id: &str, dataset: &str) -> Self {
        Self {
            dataset: Dataset::new(documents, project_id, dataset),
        }
    }

    /// The loaded published documents.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}

impl ContentStore for ExportStore {
    fn query(&self, query: &Query) -> Result<Value, StoreError> {
        Ok(self.dataset.evaluate(query))
    }

    fn backend(&self) -> &'static str {
        "export"
    }
}
