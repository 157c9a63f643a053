//! Fail-open cache adapter.

use super::backend::{CacheDocument, CacheStore, StoreError};
use super::key::CacheKey;
use crate::types::VocabInfoRecord;
use chrono::Utc;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default bound on every individual store call.
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub op_timeout: Duration,
    pub enabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            op_timeout: DEFAULT_OP_TIMEOUT,
            enabled: true,
        }
    }
}

impl CacheConfig {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_op_timeout(mut self, timeout: Duration) -> Self {
        self.op_timeout = timeout;
        self
    }
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub writes: u64,
    /// Store failures absorbed as a miss or a skipped write.
    pub errors: u64,
}

impl CacheStats {
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[derive(Default)]
struct AtomicStats {
    hits: AtomicU64,
    misses: AtomicU64,
    writes: AtomicU64,
    errors: AtomicU64,
}

impl AtomicStats {
    fn to_stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            writes: self.writes.load(Ordering::Relaxed),
            errors: self.errors.load(Ordering::Relaxed),
        }
    }
}

/// Read-through cache adapter over an optional [`CacheStore`].
///
/// Never returns an error: a missing store, a timeout, or any store failure
/// reads as a miss and turns a write into a logged no-op.
#[derive(Clone)]
pub struct VocabCache {
    store: Option<Arc<dyn CacheStore>>,
    config: CacheConfig,
    stats: Arc<AtomicStats>,
}

impl VocabCache {
    pub fn new(store: Arc<dyn CacheStore>, config: CacheConfig) -> Self {
        Self {
            store: Some(store),
            config,
            stats: Arc::new(AtomicStats::default()),
        }
    }

    /// An adapter with no store behind it: every read misses, every write is dropped.
    pub fn unavailable() -> Self {
        Self {
            store: None,
            config: CacheConfig::default(),
            stats: Arc::new(AtomicStats::default()),
        }
    }

    pub fn is_available(&self) -> bool {
        self.config.enabled && self.store.is_some()
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.as_ref().map(|s| s.name()).unwrap_or("none")
    }

    pub fn stats(&self) -> CacheStats {
        self.stats.to_stats()
    }

    fn active_store(&self) -> Option<&Arc<dyn CacheStore>> {
        if self.config.enabled {
            self.store.as_ref()
        } else {
            None
        }
    }

    async fn bounded<T>(
        &self,
        op: impl Future<Output = Result<T, StoreError>>,
    ) -> Result<T, StoreError> {
        match tokio::time::timeout(self.config.op_timeout, op).await {
            Ok(result) => result,
            Err(_) => Err(StoreError::Timeout(self.config.op_timeout)),
        }
    }

    /// Look up a cached record. Cached data is trusted as written and is not
    /// re-validated.
    pub async fn get(&self, key: &CacheKey) -> Option<VocabInfoRecord> {
        let store = match self.active_store() {
            Some(s) => s,
            None => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                return None;
            }
        };

        let document = match self.bounded(store.find(key)).await {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, store = store.name(), "vocab cache miss");
                return None;
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                warn!(key = %key, store = store.name(), error = %e, "vocab cache read failed, treating as miss");
                return None;
            }
        };

        match serde_json::from_value::<VocabInfoRecord>(document.data) {
            Ok(record) => {
                self.stats.hits.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, store = store.name(), "vocab cache hit");
                Some(record)
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                self.stats.misses.fetch_add(1, Ordering::Relaxed);
                warn!(key = %key, error = %e, "cached vocab document is unreadable, treating as miss");
                None
            }
        }
    }

    /// Upsert a record. Keeps the original `created_at` of an existing entry and
    /// always refreshes `updated_at`. Failures are logged and swallowed.
    pub async fn put(&self, key: &CacheKey, vocab: &str, language: &str, record: &VocabInfoRecord) {
        let Some(store) = self.active_store() else {
            return;
        };

        let data = match serde_json::to_value(record) {
            Ok(v) => v,
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                warn!(key = %key, error = %e, "failed to serialize vocab record for cache");
                return;
            }
        };

        let existing = match self.bounded(store.find(key)).await {
            Ok(doc) => doc,
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                warn!(key = %key, store = store.name(), error = %e, "vocab cache lookup before write failed, skipping write");
                return;
            }
        };

        let now = Utc::now();
        let document = CacheDocument {
            key: key.clone(),
            vocab: vocab.to_string(),
            language: language.to_string(),
            data,
            created_at: existing.map(|d| d.created_at).unwrap_or(now),
            updated_at: now,
        };

        match self.bounded(store.upsert(document)).await {
            Ok(()) => {
                self.stats.writes.fetch_add(1, Ordering::Relaxed);
                debug!(key = %key, store = store.name(), "vocab cache write");
            }
            Err(e) => {
                self.stats.errors.fetch_add(1, Ordering::Relaxed);
                warn!(key = %key, store = store.name(), error = %e, "vocab cache write failed");
            }
        }
    }
}
