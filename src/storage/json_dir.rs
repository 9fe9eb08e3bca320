//! Read-only store over a directory of collection exports.
//!
//! Each collection is a file named `<collection>.json` holding either a JSON
//! array of documents (`mongoexport --jsonArray`) or one document per line
//! (plain `mongoexport`). Files are re-read on every call.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::storage::memory::json_kind;
use crate::storage::traits::{Document, DocumentStore, NameFilter, StorageError};

/// Document store backed by `<root>/<collection>.json` files.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    /// Opens a store rooted at `root`. The directory is checked on each call,
    /// not here.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the collection files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.root.join(format!("{collection}.json"))
    }

    fn load(&self, collection: &str) -> Result<Vec<Document>, StorageError> {
        if !self.root.is_dir() {
            return Err(StorageError::ConnectionError(format!(
                "data directory {} is not accessible",
                self.root.display()
            )));
        }

        let path = self.collection_path(collection);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(collection, path = %path.display(), "collection file missing; treating as empty");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StorageError::ConnectionError(format!(
                    "cannot read {}: {e}",
                    path.display()
                )))
            }
        };

        let values = parse_documents(&text).map_err(|e| {
            StorageError::SerializationError(format!("{}: {e}", path.display()))
        })?;

        values
            .into_iter()
            .enumerate()
            .map(|(index, value)| match value {
                Value::Object(doc) => Ok(doc),
                other => Err(StorageError::SerializationError(format!(
                    "{} entry {index}: expected an object, got {}",
                    path.display(),
                    json_kind(&other)
                ))),
            })
            .collect()
    }
}

fn parse_documents(text: &str) -> Result<Vec<Value>, serde_json::Error> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed);
    }
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(serde_json::from_str::<Value>)
        .collect()
}

impl DocumentStore for JsonDirStore {
    fn find_one(
        &self,
        collection: &str,
        filter: &NameFilter,
    ) -> Result<Option<Document>, StorageError> {
        Ok(self
            .load(collection)?
            .into_iter()
            .find(|doc| filter.matches(doc)))
    }

    fn find_all(&self, collection: &str) -> Result<Vec<Document>, StorageError> {
        self.load(collection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_documents_array_and_lines() {
        let array = parse_documents(r#"[{"name":"IVE"},{"name":"aespa"}]"#).unwrap();
        assert_eq!(array.len(), 2);

        let lines = parse_documents("{\"name\":\"IVE\"}\n\n  {\"name\":\"aespa\"}\n").unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1]["name"], "aespa");

        assert!(parse_documents("   \n").unwrap().is_empty());
        assert!(parse_documents("{not json").is_err());
    }

    #[test]
    fn test_missing_root_is_connection_error() {
        let store = JsonDirStore::new("/definitely/not/a/kcontent/dir");
        assert!(matches!(
            store.find_all("kpops"),
            Err(StorageError::ConnectionError(_))
        ));
    }
}
