//! In-memory storage backend.
//!
//! Thread-safe in-memory implementation of [`DocumentStore`]. Intended for
//! embedded usage, tests, and as a reference implementation. Documents keep
//! their insertion order, which is the store's natural order.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use crate::storage::traits::{Document, DocumentStore, NameFilter, StorageError};

fn lock_err(context: &'static str) -> StorageError {
    StorageError::BackendError(format!("poisoned lock: {context}"))
}

/// Thread-safe in-memory document store.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<Document>>>,
}

impl InMemoryDocumentStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a document to `collection`, creating the collection if needed.
    ///
    /// # Errors
    /// Returns `BackendError` if the lock is poisoned.
    pub fn insert(&self, collection: &str, document: Document) -> Result<(), StorageError> {
        let mut collections = self.collections.write().map_err(|_| lock_err("insert"))?;
        collections
            .entry(collection.to_string())
            .or_default()
            .push(document);
        Ok(())
    }

    /// Appends a JSON value, which must be an object.
    ///
    /// # Errors
    /// Returns `SerializationError` for non-object values.
    pub fn insert_json(&self, collection: &str, value: Value) -> Result<(), StorageError> {
        match value {
            Value::Object(document) => self.insert(collection, document),
            other => Err(StorageError::SerializationError(format!(
                "expected a JSON object for '{collection}', got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Number of documents in `collection`.
    ///
    /// # Errors
    /// Returns `BackendError` if the lock is poisoned.
    pub fn count(&self, collection: &str) -> Result<usize, StorageError> {
        let collections = self.collections.read().map_err(|_| lock_err("count"))?;
        Ok(collections.get(collection).map_or(0, Vec::len))
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn find_one(
        &self,
        collection: &str,
        filter: &NameFilter,
    ) -> Result<Option<Document>, StorageError> {
        let collections = self.collections.read().map_err(|_| lock_err("find_one"))?;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)))
            .cloned())
    }

    fn find_all(&self, collection: &str) -> Result<Vec<Document>, StorageError> {
        let collections = self.collections.read().map_err(|_| lock_err("find_all"))?;
        Ok(collections.get(collection).cloned().unwrap_or_default())
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
