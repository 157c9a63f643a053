//! Vocabulary cache: key normalization, pluggable stores, and the fail-open
//! adapter that sits in front of generation.
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`VocabCache`] | Timeout-bounded read-through adapter with statistics |
//! | [`CacheStore`] | Trait implemented by every store |
//! | [`MemoryStore`] | Process-local store |
//! | [`SqliteStore`] | Embedded file store |
//! | `RedisStore` | Networked store (feature `redis`) |
//! | [`VocabStoreConfig`] | Store selection from the environment |
//! | [`CacheKey`] | Normalized `(vocab, language)` identity |
//!
//! ```rust
//! use vocab_info::cache::{CacheConfig, CacheKey, MemoryStore, VocabCache};
//! use std::sync::Arc;
//!
//! let cache = VocabCache::new(Arc::new(MemoryStore::new()), CacheConfig::default());
//! assert!(cache.is_available());
//! assert_eq!(CacheKey::normalize(" Run ", "Vietnamese").as_str(), "run_vietnamese");
//! ```

mod backend;
mod config;
mod key;
mod manager;
#[cfg(feature = "redis")]
mod redis_backend;
mod sqlite_backend;

pub use backend::{CacheDocument, CacheStore, MemoryStore, StoreError};
pub use config::{StoreBackendKind, VocabStoreConfig};
pub use key::{normalize, CacheKey, KEY_SEPARATOR};
pub use manager::{CacheConfig, CacheStats, VocabCache, DEFAULT_OP_TIMEOUT};
#[cfg(feature = "redis")]
pub use redis_backend::RedisStore;
pub use sqlite_backend::SqliteStore;
