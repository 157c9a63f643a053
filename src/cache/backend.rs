//! Cache store trait, persisted document layout, and the in-process store.

use super::key::CacheKey;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use thiserror::Error;

/// Persisted form of one cached record.
///
/// `data` holds the serialized [`VocabInfoRecord`](crate::types::VocabInfoRecord);
/// it is decoded by the cache adapter, not by the stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheDocument {
    #[serde(rename = "_id")]
    pub key: CacheKey,
    pub vocab: String,
    pub language: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Failures raised by a store. Absorbed by [`VocabCache`](super::VocabCache).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// A document store keyed by [`CacheKey`].
///
/// Implementations replace whole documents on `upsert`; they never merge
/// fields.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn find(&self, key: &CacheKey) -> Result<Option<CacheDocument>, StoreError>;
    async fn upsert(&self, document: CacheDocument) -> Result<(), StoreError>;
    fn name(&self) -> &'static str;
}

/// Process-local store. Useful for development and tests; nothing survives a
/// restart.
#[derive(Clone, Default)]
pub struct MemoryStore {
    documents: Arc<RwLock<HashMap<CacheKey, CacheDocument>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.documents.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned() -> StoreError {
    StoreError::Backend("memory store lock poisoned".to_string())
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn find(&self, key: &CacheKey) -> Result<Option<CacheDocument>, StoreError> {
        let documents = self.documents.read().map_err(|_| poisoned())?;
        Ok(documents.get(key).cloned())
    }

    async fn upsert(&self, document: CacheDocument) -> Result<(), StoreError> {
        let mut documents = self.documents.write().map_err(|_| poisoned())?;
        documents.insert(document.key.clone(), document);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(key: &str, data: serde_json::Value) -> CacheDocument {
        let now = Utc::now();
        CacheDocument {
            key: CacheKey::from_raw(key),
            vocab: "run".into(),
            language: "Vietnamese".into(),
            data,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_memory_store_replaces_whole_document() {
        let store = MemoryStore::new();
        store
            .upsert(document("run_vietnamese", serde_json::json!({"a": 1, "b": 2})))
            .await
            .unwrap();
        store
            .upsert(document("run_vietnamese", serde_json::json!({"a": 3})))
            .await
            .unwrap();

        let found = store
            .find(&CacheKey::from_raw("run_vietnamese"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.data, serde_json::json!({"a": 3}));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_miss() {
        let store = MemoryStore::new();
        let found = tokio_test::assert_ok!(tokio_test::block_on(
            store.find(&CacheKey::from_raw("absent_english"))
        ));
        assert!(found.is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_clones_share_documents() {
        let store = MemoryStore::new();
        let handle = store.clone();
        tokio_test::assert_ok!(tokio_test::block_on(
            handle.upsert(document("run_vietnamese", serde_json::json!({"a": 1})))
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_document_layout_uses_id_field() {
        let json = serde_json::to_value(document("run_vietnamese", serde_json::json!({}))).unwrap();
        assert_eq!(json["_id"], "run_vietnamese");
        assert!(json.get("key").is_none());
        assert!(json["created_at"].is_string());
    }
}
