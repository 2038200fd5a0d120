//! SQLite store persistence tests.

use storage::{KeyValueStore, SqliteStore};

#[tokio::test]
async fn test_values_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("cache.db");

    {
        let store = SqliteStore::open(&path).await.unwrap();
        store.set("cell:881f1d4891fffff", r#"{"x":1}"#).await.unwrap();
        store.set("localized-name:42", "English oak").await.unwrap();
    }

    let reopened = SqliteStore::open(&path).await.unwrap();
    assert_eq!(
        reopened.get("cell:881f1d4891fffff").await.unwrap(),
        Some(r#"{"x":1}"#.to_string())
    );
    assert_eq!(
        reopened.get("localized-name:42").await.unwrap(),
        Some("English oak".to_string())
    );
    assert_eq!(reopened.count().await.unwrap(), 2);
}

#[tokio::test]
async fn test_set_overwrites() {
    let store = SqliteStore::open_memory().await.unwrap();
    store.set("k", "v1").await.unwrap();
    store.set("k", "v2").await.unwrap();

    assert_eq!(store.get("k").await.unwrap(), Some("v2".to_string()));
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_missing_key_is_none() {
    let store = SqliteStore::open_memory().await.unwrap();
    assert_eq!(store.get("absent").await.unwrap(), None);
    assert_eq!(store.backend(), "sqlite");
}

#[tokio::test]
async fn test_empty_string_value_is_distinct_from_missing() {
    let store = SqliteStore::open_memory().await.unwrap();
    store.set("localized-name:7", "").await.unwrap();
    assert_eq!(store.get("localized-name:7").await.unwrap(), Some(String::new()));
}
