use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use kcontent::{
    select, BilingualField, Category, ContentQuery, Document, DocumentStore, InMemoryDocumentStore,
    Locale, LogoMapper, LookupError, NameFilter, NameResolver, StorageError,
};
use serde_json::json;

/// Fails the test if it is ever queried.
struct UnreachableStore;

impl DocumentStore for UnreachableStore {
    fn find_one(&self, collection: &str, _: &NameFilter) -> Result<Option<Document>, StorageError> {
        panic!("store queried for find_one on {collection}");
    }

    fn find_all(&self, collection: &str) -> Result<Vec<Document>, StorageError> {
        panic!("store queried for find_all on {collection}");
    }
}

/// Simulates a store that is down, counting attempts.
#[derive(Default)]
struct DownStore {
    calls: AtomicUsize,
}

impl DocumentStore for DownStore {
    fn find_one(&self, _: &str, _: &NameFilter) -> Result<Option<Document>, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::ConnectionError("connection refused".to_string()))
    }

    fn find_all(&self, _: &str) -> Result<Vec<Document>, StorageError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::ConnectionError("connection refused".to_string()))
    }
}

/// Records the filter it was handed.
#[derive(Default)]
struct RecordingStore {
    seen: std::sync::Mutex<Vec<(String, String, Vec<String>)>>,
}

impl DocumentStore for RecordingStore {
    fn find_one(&self, collection: &str, filter: &NameFilter) -> Result<Option<Document>, StorageError> {
        self.seen.lock().unwrap().push((
            collection.to_string(),
            filter.pattern().to_string(),
            filter.fields().to_vec(),
        ));
        Ok(None)
    }

    fn find_all(&self, _: &str) -> Result<Vec<Document>, StorageError> {
        Ok(Vec::new())
    }
}

#[test]
fn ive_end_to_end() {
    let store = InMemoryDocumentStore::new();
    store
        .insert_json("kpops", json!({ "name": { "name_en": "IVE", "name_ko": "아이브" } }))
        .unwrap();
    let resolver = NameResolver::new(Arc::new(store));

    let record = resolver.find_by_name(Category::Kpop, "ive").unwrap().unwrap();
    assert_eq!(select(&record.name, Locale::Ko), "아이브");
    assert_eq!(select(&record.name, Locale::En), "IVE");
    assert_eq!(
        LogoMapper::builtin().resolve_logo_filename("ive"),
        Some("ive_logo.svg")
    );
}

#[test]
fn blank_names_never_reach_the_store() {
    let resolver = NameResolver::new(Arc::new(UnreachableStore));
    for category in Category::ALL {
        assert!(resolver.find_by_name(category, "").unwrap().is_none());
        assert!(resolver.find_by_name(category, "   ").unwrap().is_none());
        assert!(resolver.find_by_name(category, "\t\n").unwrap().is_none());
    }
    assert!(resolver.find_by_name_in_any(" ").unwrap().is_none());
}

#[test]
fn store_failure_is_not_not_found() {
    let store = Arc::new(DownStore::default());
    let resolver = NameResolver::new(store.clone());

    let err = resolver.find_by_name(Category::Kbeauty, "Olive Young").unwrap_err();
    assert!(err.is_store_failure());
    assert!(err.is_retryable());
    assert!(matches!(err, LookupError::Store(StorageError::ConnectionError(_))));

    assert!(resolver.find_all(Category::Poi).unwrap_err().is_store_failure());
    assert_eq!(store.calls.load(Ordering::SeqCst), 2);
}

#[test]
fn query_surface_propagates_store_failure() {
    let resolver = NameResolver::new(Arc::new(DownStore::default()));
    let err = ContentQuery::new(Some("kfood"), None)
        .execute(&resolver)
        .unwrap_err();
    assert!(err.is_store_failure());
}

#[test]
fn resolver_sends_trimmed_escaped_anchored_pattern() {
    let store = Arc::new(RecordingStore::default());
    let resolver = NameResolver::new(store.clone());

    assert!(resolver.find_by_name(Category::Kpop, "  (G)I-DLE ").unwrap().is_none());
    assert!(resolver.find_by_name(Category::Package, "Seoul 3 days").unwrap().is_none());

    let seen = store.seen.lock().unwrap();
    assert_eq!(seen.len(), 2);

    let (collection, pattern, fields) = &seen[0];
    assert_eq!(collection, "kpops");
    assert!(pattern.starts_with('^') && pattern.ends_with('$'));
    assert!(pattern.contains(r"\(G\)I"));
    assert_eq!(fields, &["name.name_en", "name.name_ko", "name"]);

    let (collection, pattern, fields) = &seen[1];
    assert_eq!(collection, "packages");
    assert_eq!(pattern, "^Seoul 3 days$");
    assert!(fields.contains(&"name_ko".to_string()));
}

#[test]
fn legacy_names_surface_in_canonical_shape() {
    let store = InMemoryDocumentStore::new();
    store.insert_json("kpops", json!({ "name": "NewJeans" })).unwrap();
    let resolver = NameResolver::new(Arc::new(store));

    let all = resolver.find_all(Category::Kpop).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, BilingualField::new("NewJeans", ""));
    assert_eq!(
        serde_json::to_value(&all[0].name).unwrap(),
        json!({ "name_en": "NewJeans", "name_ko": "" })
    );
}

#[test]
fn concurrent_lookups_are_independent() {
    let store = InMemoryDocumentStore::new();
    for name in ["IVE", "aespa", "Stray Kids", "TWICE"] {
        store.insert_json("kpops", json!({ "name": { "name_en": name } })).unwrap();
    }
    let resolver = NameResolver::new(Arc::new(store));

    let handles: Vec<_> = ["ive", "AESPA", "stray kids", "twice"]
        .into_iter()
        .map(|query| {
            let resolver = resolver.clone();
            std::thread::spawn(move || resolver.find_by_name(Category::Kpop, query).unwrap())
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_some());
    }
}
