use std::fs;
use std::sync::Arc;

use kcontent::{
    Category, ContentQuery, DisplayCard, DocumentStore, JsonDirStore, Locale, LogoMapper,
    NameFilter, NameResolver, QueryOutcome, StorageError,
};
use tempfile::TempDir;

fn data_dir() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("kpops.json"),
        r#"[
            { "_id": { "$oid": "6650a1" }, "name": { "name_en": "IVE", "name_ko": "아이브" }, "agency": "Starship" },
            { "_id": { "$oid": "6650a2" }, "name": "NewJeans" },
            { "_id": { "$oid": "6650a3" }, "name": { "name_en": "a.b" } }
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("pois.json"),
        concat!(
            r#"{"_id":"p1","name":"Gwangjang Market","name_ko":"광장시장","description":"Street food","description_ko":"길거리 음식"}"#,
            "\n",
            r#"{"_id":"p2","name":"N Seoul Tower","logoUrl":"https://cdn.example/tower.svg"}"#,
            "\n"
        ),
    )
    .unwrap();
    dir
}

#[test]
fn resolves_from_array_export() {
    let dir = data_dir();
    let resolver = NameResolver::new(Arc::new(JsonDirStore::new(dir.path())));

    let ive = resolver.find_by_name(Category::Kpop, "IVE ").unwrap().unwrap();
    assert_eq!(ive.id.as_deref(), Some("6650a1"));
    assert_eq!(ive.name.select(Locale::Ko), "아이브");

    assert!(resolver.find_by_name(Category::Kpop, "a.b").unwrap().is_some());
    assert!(resolver.find_by_name(Category::Kpop, "aXb").unwrap().is_none());

    let all = resolver.find_all(Category::Kpop).unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[1].name.value_en, "NewJeans");
    assert_eq!(all[1].name.value_ko, "");
}

#[test]
fn resolves_from_line_delimited_export() {
    let dir = data_dir();
    let resolver = NameResolver::new(Arc::new(JsonDirStore::new(dir.path())));

    let market = resolver.find_by_name(Category::Poi, "광장시장").unwrap().unwrap();
    let card = DisplayCard::build(&market, Locale::Ko, &LogoMapper::builtin());
    assert_eq!(card.name, "광장시장");
    assert_eq!(card.description, "길거리 음식");
    assert_eq!(card.logo, None);
    assert_eq!(card.initials, "광");

    let tower = resolver.find_by_name(Category::Poi, "n seoul tower").unwrap().unwrap();
    let card = DisplayCard::build(&tower, Locale::En, &LogoMapper::builtin());
    assert_eq!(card.logo.as_deref(), Some("https://cdn.example/tower.svg"));
    assert_eq!(card.initials, "NS");
}

#[test]
fn missing_collection_file_is_empty() {
    let dir = data_dir();
    let resolver = NameResolver::new(Arc::new(JsonDirStore::new(dir.path())));

    assert!(resolver.find_all(Category::Package).unwrap().is_empty());
    assert!(resolver.find_by_name(Category::Kfestival, "anything").unwrap().is_none());

    let outcome = ContentQuery::default().execute(&resolver).unwrap();
    assert!(matches!(outcome, QueryOutcome::All(ref r) if r.len() == 5));
}

#[test]
fn corrupt_collection_is_store_failure() {
    let dir = data_dir();
    fs::write(dir.path().join("kfoods.json"), "[{\"name\": ").unwrap();
    fs::write(dir.path().join("kbeauties.json"), "[\"Olive Young\"]").unwrap();
    let store = JsonDirStore::new(dir.path());

    assert!(matches!(
        store.find_all("kfoods"),
        Err(StorageError::SerializationError(_))
    ));
    let filter = NameFilter::exact(&["name"], "Olive Young");
    assert!(matches!(
        store.find_one("kbeauties", &filter),
        Err(StorageError::SerializationError(_))
    ));

    let resolver = NameResolver::new(Arc::new(store));
    assert!(resolver
        .find_by_name(Category::Kfood, "Nongshim")
        .unwrap_err()
        .is_store_failure());
}

#[test]
fn removed_data_dir_is_connection_failure() {
    let dir = data_dir();
    let store = JsonDirStore::new(dir.path().join("gone"));
    let resolver = NameResolver::new(Arc::new(store));

    let err = resolver.find_all(Category::Kpop).unwrap_err();
    assert!(err.is_store_failure());
    assert!(err.is_retryable());
}

#[test]
fn null_and_mistyped_fields_do_not_hide_records() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("kpops.json"),
        r#"[
            { "name": { "name_en": "IVE", "name_ko": null }, "social": null },
            { "name": { "name_en": "TWICE" }, "debutYear": "2015", "logoUrl": 3 },
            { "name": "NewJeans", "name_ko": "뉴진스" }
        ]"#,
    )
    .unwrap();
    let resolver = NameResolver::new(Arc::new(JsonDirStore::new(dir.path())));

    let all = resolver.find_all(Category::Kpop).unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|r| r.name.value_ko.is_empty()));

    let twice = resolver.find_by_name(Category::Kpop, "twice").unwrap().unwrap();
    let card = DisplayCard::build(&twice, Locale::Ko, &LogoMapper::builtin());
    assert_eq!(card.name, "TWICE");
    assert_eq!(card.initials, "T");
    assert_eq!(card.logo.as_deref(), Some("/api/logos/twice_logo.svg"));
}
