//! Mock storage implementation for testing.
//!
//! Provides [`MockStorage`] for unit testing without filesystem access.

use std::collections::HashSet;

use crate::storage::Storage;

/// Mock storage for testing.
///
/// Holds a set of document paths in memory. Use the builder methods to
/// configure the mock with test data.
///
/// # Example
///
/// ```ignore
/// use docnav_storage::{MockStorage, Storage};
///
/// let storage = MockStorage::new()
///     .with_document("README.md")
///     .with_document("guide/install.md");
///
/// assert!(storage.exists("guide/install.md"));
/// ```
#[derive(Debug, Default)]
pub struct MockStorage {
    documents: HashSet<String>,
}

impl MockStorage {
    /// Create a new empty mock storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document at the given path.
    #[must_use]
    pub fn with_document(mut self, path: impl Into<String>) -> Self {
        let path: String = path.into();
        self.documents
            .insert(path.trim_start_matches('/').to_owned());
        self
    }

    /// Add several documents at once.
    #[must_use]
    pub fn with_documents<I, S>(self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        paths
            .into_iter()
            .fold(self, |storage, path| storage.with_document(path))
    }
}

impl Storage for MockStorage {
    fn exists(&self, path: &str) -> bool {
        self.documents.contains(path.trim_start_matches('/'))
    }
}
