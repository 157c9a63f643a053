//! Store selection from environment variables.

use super::backend::{CacheStore, MemoryStore};
use super::manager::{CacheConfig, VocabCache, DEFAULT_OP_TIMEOUT};
use super::sqlite_backend::SqliteStore;
use crate::{Error, ErrorContext, Result};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[cfg(feature = "redis")]
use super::redis_backend::{RedisStore, DEFAULT_PREFIX};
#[cfg(not(feature = "redis"))]
const DEFAULT_PREFIX: &str = "vocab_cache:";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackendKind {
    Sqlite,
    Redis,
    Memory,
    None,
}

impl StoreBackendKind {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            "none" | "" => Ok(Self::None),
            other => Err(Error::configuration_with_context(
                format!("unknown cache backend '{}'", other),
                ErrorContext::new()
                    .with_field_path("VOCAB_CACHE_BACKEND")
                    .with_details("expected one of sqlite, redis, memory, none"),
            )),
        }
    }
}

/// Where the vocabulary cache lives.
///
/// Environment variables:
/// - `VOCAB_CACHE_BACKEND`: `sqlite` | `redis` | `memory` | `none`
/// - `VOCAB_CACHE_TIMEOUT_MS`: per-call store bound (default 5000)
/// - `VOCAB_REDIS_URL`, `VOCAB_REDIS_PREFIX`
/// - `VOCAB_SQLITE_PATH`
#[derive(Debug, Clone)]
pub struct VocabStoreConfig {
    pub backend: StoreBackendKind,
    pub op_timeout: Duration,
    pub redis_url: Option<String>,
    pub redis_prefix: String,
    pub sqlite_path: Option<PathBuf>,
}

impl Default for VocabStoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackendKind::None,
            op_timeout: DEFAULT_OP_TIMEOUT,
            redis_url: None,
            redis_prefix: DEFAULT_PREFIX.to_string(),
            sqlite_path: None,
        }
    }
}

impl VocabStoreConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let redis_url = non_empty("VOCAB_REDIS_URL");
        let sqlite_path = non_empty("VOCAB_SQLITE_PATH").map(PathBuf::from);

        let backend = match non_empty("VOCAB_CACHE_BACKEND") {
            Some(v) => StoreBackendKind::parse(&v)?,
            None if redis_url.is_some() => StoreBackendKind::Redis,
            None if sqlite_path.is_some() => StoreBackendKind::Sqlite,
            None => StoreBackendKind::None,
        };

        let op_timeout = match non_empty("VOCAB_CACHE_TIMEOUT_MS") {
            Some(v) => v.trim().parse::<u64>().map(Duration::from_millis).map_err(|_| {
                Error::configuration_with_context(
                    format!("invalid timeout '{}'", v),
                    ErrorContext::new().with_field_path("VOCAB_CACHE_TIMEOUT_MS"),
                )
            })?,
            None => DEFAULT_OP_TIMEOUT,
        };

        Ok(Self {
            backend,
            op_timeout,
            redis_url,
            redis_prefix: non_empty("VOCAB_REDIS_PREFIX")
                .unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            sqlite_path,
        })
    }

    pub fn with_backend(mut self, backend: StoreBackendKind) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_sqlite_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sqlite_path = Some(path.into());
        self
    }

    pub fn with_op_timeout(mut self, timeout: Duration) -> Self {
        self.op_timeout = timeout;
        self
    }

    /// Open the configured store once. Any failure here degrades to an
    /// unavailable cache instead of failing startup.
    pub async fn connect(&self) -> VocabCache {
        let cache_config = CacheConfig::default().with_op_timeout(self.op_timeout);
        match self.open_store().await {
            Ok(Some(store)) => {
                info!(store = store.name(), "vocab cache store ready");
                VocabCache::new(store, cache_config)
            }
            Ok(None) => {
                info!("no vocab cache store configured, caching disabled");
                VocabCache::unavailable()
            }
            Err(e) => {
                warn!(backend = ?self.backend, error = %e, "vocab cache store unavailable, continuing without cache");
                VocabCache::unavailable()
            }
        }
    }

    async fn open_store(&self) -> std::result::Result<Option<Arc<dyn CacheStore>>, String> {
        match self.backend {
            StoreBackendKind::None => Ok(None),
            StoreBackendKind::Memory => Ok(Some(Arc::new(MemoryStore::new()))),
            StoreBackendKind::Sqlite => {
                let path = self
                    .sqlite_path
                    .as_ref()
                    .ok_or_else(|| "VOCAB_SQLITE_PATH is not set".to_string())?;
                let path = path.clone();
                let store = tokio::task::spawn_blocking(move || SqliteStore::open(&path))
                    .await
                    .map_err(|e| e.to_string())?
                    .map_err(|e| e.to_string())?;
                Ok(Some(Arc::new(store)))
            }
            StoreBackendKind::Redis => self.open_redis().await,
        }
    }

    #[cfg(feature = "redis")]
    async fn open_redis(&self) -> std::result::Result<Option<Arc<dyn CacheStore>>, String> {
        let url = self
            .redis_url
            .as_deref()
            .ok_or_else(|| "VOCAB_REDIS_URL is not set".to_string())?;
        let connect = RedisStore::connect(url, self.redis_prefix.clone());
        let store = tokio::time::timeout(self.op_timeout, connect)
            .await
            .map_err(|_| format!("connect timed out after {:?}", self.op_timeout))?
            .map_err(|e| e.to_string())?;
        Ok(Some(Arc::new(store)))
    }

    #[cfg(not(feature = "redis"))]
    async fn open_redis(&self) -> std::result::Result<Option<Arc<dyn CacheStore>>, String> {
        Err("built without the `redis` feature".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_to_no_store() {
        let cfg = VocabStoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.backend, StoreBackendKind::None);
        assert_eq!(cfg.op_timeout, Duration::from_secs(5));
        assert_eq!(cfg.redis_prefix, "vocab_cache:");
    }

    #[test]
    fn test_backend_inferred_from_urls() {
        let cfg = VocabStoreConfig::from_lookup(lookup(&[
            ("VOCAB_REDIS_URL", "redis://localhost:6379"),
            ("VOCAB_SQLITE_PATH", "/tmp/vocab.db"),
        ]))
        .unwrap();
        assert_eq!(cfg.backend, StoreBackendKind::Redis);

        let cfg =
            VocabStoreConfig::from_lookup(lookup(&[("VOCAB_SQLITE_PATH", "/tmp/vocab.db")]))
                .unwrap();
        assert_eq!(cfg.backend, StoreBackendKind::Sqlite);
    }

    #[test]
    fn test_explicit_backend_and_timeout() {
        let cfg = VocabStoreConfig::from_lookup(lookup(&[
            ("VOCAB_CACHE_BACKEND", "Memory"),
            ("VOCAB_CACHE_TIMEOUT_MS", "250"),
        ]))
        .unwrap();
        assert_eq!(cfg.backend, StoreBackendKind::Memory);
        assert_eq!(cfg.op_timeout, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_values_are_configuration_errors() {
        let err = VocabStoreConfig::from_lookup(lookup(&[("VOCAB_CACHE_BACKEND", "mongo")]))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));

        let err = VocabStoreConfig::from_lookup(lookup(&[("VOCAB_CACHE_TIMEOUT_MS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("VOCAB_CACHE_TIMEOUT_MS"));
    }

    #[tokio::test]
    async fn test_connect_memory_store() {
        let cache = VocabStoreConfig::default()
            .with_backend(StoreBackendKind::Memory)
            .connect()
            .await;
        assert!(cache.is_available());
        assert_eq!(cache.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_sqlite_without_path_degrades() {
        let cache = VocabStoreConfig::default()
            .with_backend(StoreBackendKind::Sqlite)
            .connect()
            .await;
        assert!(!cache.is_available());
    }
}
