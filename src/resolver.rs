//! Name resolution against the document store.
//!
//! Free-text names are matched literally, case-insensitively, and anchored
//! at both ends: "AESPA" finds "aespa", "aesp" does not. Blank input never
//! reaches the store.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::category::Category;
use crate::error::LookupResult;
use crate::record::ContentRecord;
use crate::storage::{DocumentStore, NameFilter};

/// Resolves names to canonical records, one category at a time.
///
/// Every call round-trips to the store; nothing is cached.
#[derive(Clone)]
pub struct NameResolver {
    store: Arc<dyn DocumentStore>,
}

impl std::fmt::Debug for NameResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameResolver").finish_non_exhaustive()
    }
}

impl NameResolver {
    /// Creates a resolver over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Finds the record in `category` whose name equals `raw_name`, ignoring
    /// case and surrounding whitespace.
    ///
    /// Returns `Ok(None)` for blank input or when nothing matches. When
    /// several records match, the store's first is returned.
    ///
    /// # Errors
    /// - [`LookupError::Store`](crate::LookupError::Store) if the store cannot answer
    /// - [`LookupError::Decode`](crate::LookupError::Decode) if the matched
    ///   document has no usable `name`
    pub fn find_by_name(
        &self,
        category: Category,
        raw_name: &str,
    ) -> LookupResult<Option<ContentRecord>> {
        let name = raw_name.trim();
        if name.is_empty() {
            return Ok(None);
        }

        let filter = NameFilter::exact(category.name_fields(), name);
        let collection = category.collection();
        debug!(%category, collection, pattern = filter.pattern(), "find_by_name");

        let Some(document) = self.store.find_one(collection, &filter)? else {
            return Ok(None);
        };
        Ok(Some(ContentRecord::from_document(category, &document)?))
    }

    /// Returns every record in `category`, in store order.
    ///
    /// Documents without a usable `name` are skipped with a warning.
    ///
    /// # Errors
    /// Returns [`LookupError::Store`](crate::LookupError::Store) if the store
    /// cannot answer.
    pub fn find_all(&self, category: Category) -> LookupResult<Vec<ContentRecord>> {
        let collection = category.collection();
        let documents = self.store.find_all(collection)?;
        debug!(%category, collection, count = documents.len(), "find_all");

        let records = documents
            .iter()
            .filter_map(|doc| match ContentRecord::from_document(category, doc) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(%category, error = %e, "skipping undecodable document");
                    None
                }
            })
            .collect();
        Ok(records)
    }

    /// Tries every category in [`Category::ALL`] order and returns the first match.
    ///
    /// # Errors
    /// Stops at the first store or decode failure.
    pub fn find_by_name_in_any(&self, raw_name: &str) -> LookupResult<Option<ContentRecord>> {
        if raw_name.trim().is_empty() {
            return Ok(None);
        }
        for category in Category::ALL {
            if let Some(record) = self.find_by_name(category, raw_name)? {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }
}
