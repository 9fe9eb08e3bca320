//! Abstract document-store contract.
//!
//! Content records live in an external document database that the site's
//! admin tooling writes to. This layer only reads from it, through the
//! two queries below. Implementations include:
//! - An in-memory backend for tests and embedded use
//! - A read-only directory of JSON collection exports
//! - Adapters over a real database driver, using [`NameFilter::to_mongo_filter`]

use serde_json::{json, Value};
use thiserror::Error;

/// A stored document: a JSON object.
pub type Document = serde_json::Map<String, Value>;

/// Errors that can occur while talking to the document store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store could not be reached.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The store rejected or failed the query.
    #[error("Storage backend error: {0}")]
    BackendError(String),

    /// The store returned something that is not a document collection.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Case-insensitive, fully anchored literal match across a set of fields.
///
/// A document matches when any listed field holds a string equal to the
/// query, ignoring case. Fields are dotted paths into nested objects.
///
/// In-process backends compare case-folded text directly, so query length
/// is never limited by a compiled automaton. The equivalent escaped regex is
/// kept for backends that evaluate the match server-side.
#[derive(Debug, Clone)]
pub struct NameFilter {
    fields: Vec<String>,
    name: String,
    pattern: String,
}

impl NameFilter {
    /// Builds the filter for `name`, which must already be trimmed.
    ///
    /// Every regex metacharacter in `name` is escaped in [`Self::pattern`],
    /// so `"a.b"` only ever matches the literal text `a.b`.
    #[must_use]
    pub fn exact<S: AsRef<str>>(fields: &[S], name: &str) -> Self {
        Self {
            fields: fields.iter().map(|f| f.as_ref().to_string()).collect(),
            name: name.to_string(),
            pattern: format!("^{}$", regex::escape(name)),
        }
    }

    /// Field paths the filter is OR-combined across.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Anchored, escaped pattern text (without flags).
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns true if `value` equals the query, ignoring case.
    #[must_use]
    pub fn is_match(&self, value: &str) -> bool {
        fold_case(value).eq(fold_case(&self.name))
    }

    /// Returns true if any filtered field of `document` holds a matching string.
    #[must_use]
    pub fn matches(&self, document: &Document) -> bool {
        self.fields
            .iter()
            .filter_map(|path| value_at_path(document, path))
            .filter_map(Value::as_str)
            .any(|value| self.is_match(value))
    }

    /// Renders the filter as a MongoDB query document.
    #[must_use]
    pub fn to_mongo_filter(&self) -> Value {
        let clauses: Vec<Value> = self
            .fields
            .iter()
            .map(|field| json!({ field: { "$regex": self.pattern, "$options": "i" } }))
            .collect();
        json!({ "$or": clauses })
    }
}

// Per-char lowering, so `Σ` folds the same wherever it appears.
fn fold_case(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

/// Follows a dotted path (`name.name_en`) through nested objects.
#[must_use]
pub fn value_at_path<'a>(document: &'a Document, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = document.get(segments.next()?)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Read-only access to the content collections.
///
/// Implementations must be safe to share across threads; every call is an
/// independent read with no ordering guarantee relative to other calls.
pub trait DocumentStore: Send + Sync {
    /// Returns the first document in `collection` matching `filter`, in the
    /// store's natural order.
    fn find_one(&self, collection: &str, filter: &NameFilter)
        -> Result<Option<Document>, StorageError>;

    /// Returns every document in `collection`, in the store's natural order.
    ///
    /// A collection that does not exist is empty.
    fn find_all(&self, collection: &str) -> Result<Vec<Document>, StorageError>;
}
