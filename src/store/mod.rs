//! The memory store contract consumed by the action registry.
//!
//! A store keeps text documents with JSON metadata, grouped by category. The registry
//! only ever talks to it through [`MemoryStore`]; ranking and indexing belong to the
//! backend. [`sqlite::SqliteStore`] is the bundled adapter.

pub mod sqlite;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub use sqlite::SqliteStore;

/// JSON object attached to every stored document.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// A document as returned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRecord {
    /// Caller-supplied key, or a generated UUID v7.
    pub id: String,
    pub category: String,
    /// Searchable text.
    pub document: String,
    pub metadata: Metadata,
    /// RFC 3339 timestamp of the write.
    pub created_at: String,
}

/// Category-addressed document storage with ranked text search.
///
/// All methods are synchronous. Failures are returned as-is; callers decide
/// whether to wrap or propagate them.
pub trait MemoryStore {
    /// Store a document. When `id` names an existing document in `category`, that
    /// document is replaced. Returns the id of the stored document.
    fn create(
        &self,
        category: &str,
        document: &str,
        metadata: &Metadata,
        id: Option<&str>,
    ) -> Result<String>;

    /// Delete one document. Returns `false` if nothing matched.
    fn delete(&self, category: &str, id: &str) -> Result<bool>;

    /// Fetch a single document by id.
    fn get(&self, category: &str, id: &str) -> Result<Option<MemoryRecord>>;

    /// Up to `n` documents, most recently written first.
    fn list_recent(&self, category: &str, n: usize) -> Result<Vec<MemoryRecord>>;

    /// Up to `n` documents matching `query`, best match first.
    fn search(&self, category: &str, query: &str, n: usize) -> Result<Vec<MemoryRecord>>;

    /// Remove every document in `category`.
    fn wipe(&self, category: &str) -> Result<()>;

    /// Number of documents in `category`.
    fn count(&self, category: &str) -> Result<usize>;
}

impl<T: MemoryStore + ?Sized> MemoryStore for &T {
    fn create(
        &self,
        category: &str,
        document: &str,
        metadata: &Metadata,
        id: Option<&str>,
    ) -> Result<String> {
        (**self).create(category, document, metadata, id)
    }

    fn delete(&self, category: &str, id: &str) -> Result<bool> {
        (**self).delete(category, id)
    }

    fn get(&self, category: &str, id: &str) -> Result<Option<MemoryRecord>> {
        (**self).get(category, id)
    }

    fn list_recent(&self, category: &str, n: usize) -> Result<Vec<MemoryRecord>> {
        (**self).list_recent(category, n)
    }

    fn search(&self, category: &str, query: &str, n: usize) -> Result<Vec<MemoryRecord>> {
        (**self).search(category, query, n)
    }

    fn wipe(&self, category: &str) -> Result<()> {
        (**self).wipe(category)
    }

    fn count(&self, category: &str) -> Result<usize> {
        (**self).count(category)
    }
}
