//! SQLite store against real files.

mod support;

use std::sync::Arc;
use std::time::Duration;
use support::{sample_output, ScriptedGenerator};
use vocab_info::cache::{
    CacheConfig, CacheKey, CacheStore, SqliteStore, StoreBackendKind, VocabStoreConfig,
};
use vocab_info::structured::ResponseExtractor;
use vocab_info::{VocabCache, VocabInfoRecord, VocabInfoService};

fn record() -> VocabInfoRecord {
    ResponseExtractor::new()
        .unwrap()
        .extract(&sample_output("resilient", "Vietnamese"))
        .unwrap()
}

#[tokio::test]
async fn test_entries_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocab.db");
    let key = CacheKey::normalize("resilient", "Vietnamese");

    {
        let store = SqliteStore::open(&path).unwrap();
        let cache = VocabCache::new(Arc::new(store), CacheConfig::default());
        cache.put(&key, "resilient", "Vietnamese", &record()).await;
    }

    let store = SqliteStore::open(&path).unwrap();
    let cache = VocabCache::new(Arc::new(store), CacheConfig::default());
    assert_eq!(cache.get(&key).await, Some(record()));
}

#[tokio::test]
async fn test_rewrite_keeps_created_at() {
    let dir = tempfile::tempdir().unwrap();
    let store = SqliteStore::open(&dir.path().join("vocab.db")).unwrap();
    let cache = VocabCache::new(Arc::new(store.clone()), CacheConfig::default());
    let key = CacheKey::normalize("resilient", "Vietnamese");

    cache.put(&key, "resilient", "Vietnamese", &record()).await;
    let first = store.find(&key).await.unwrap().unwrap();

    tokio::time::sleep(Duration::from_millis(10)).await;
    cache.put(&key, "Resilient", "Vietnamese", &record()).await;
    let second = store.find(&key).await.unwrap().unwrap();

    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);
    assert_eq!(second.vocab, "Resilient");
}

#[tokio::test]
async fn test_service_over_configured_sqlite() {
    let dir = tempfile::tempdir().unwrap();
    let cache = VocabStoreConfig::default()
        .with_backend(StoreBackendKind::Sqlite)
        .with_sqlite_path(dir.path().join("vocab.db"))
        .connect()
        .await;
    assert_eq!(cache.backend_name(), "sqlite");

    let generator = ScriptedGenerator::new(sample_output("resilient", "Vietnamese"));
    let service = VocabInfoService::new(cache, generator.clone()).unwrap();

    service.fetch("resilient", "Vietnamese").await.unwrap();
    service.fetch("Resilient", "VIETNAMESE").await.unwrap();
    assert_eq!(generator.calls(), 1);
}

#[tokio::test]
async fn test_unwritable_path_degrades_to_no_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache = VocabStoreConfig::default()
        .with_backend(StoreBackendKind::Sqlite)
        .with_sqlite_path(dir.path().join("missing").join("nested").join("vocab.db"))
        .connect()
        .await;
    assert!(!cache.is_available());
}
