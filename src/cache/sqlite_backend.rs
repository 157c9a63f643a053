//! Embedded file store backed by SQLite.
//!
//! One row per cache key; rows are replaced whole on upsert. Calls run on the
//! blocking thread pool so a slow disk never parks a runtime worker.

use super::backend::{CacheDocument, CacheStore, StoreError};
use super::key::CacheKey;
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS vocab_cache (
    id TEXT PRIMARY KEY,
    vocab TEXT NOT NULL,
    language TEXT NOT NULL,
    data TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);";

/// SQLite-backed cache store.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the cache database at the given path.
    pub fn open(db_path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(db_path)
            .map_err(|e| StoreError::Connection(format!("failed to open SQLite cache: {e}")))?;

        // WAL mode for concurrent readers while a write is in flight
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
        conn.execute_batch(SCHEMA)?;

        info!(path = %db_path.display(), "SQLite vocab cache opened");
        Ok(Self::from_connection(conn))
    }

    /// Private, non-persistent database. Used by tests and throwaway runs.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    async fn with_conn<T, F>(&self, op: F) -> Result<T, StoreError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection) -> Result<T, StoreError> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let guard = conn
                .lock()
                .map_err(|_| StoreError::Backend("SQLite connection lock poisoned".to_string()))?;
            op(&guard)
        })
        .await
        .map_err(|e| StoreError::Backend(format!("SQLite task failed: {e}")))?
    }
}

fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn parse_ts(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| StoreError::Backend(format!("invalid timestamp {raw:?}: {e}")))
}

#[async_trait]
impl CacheStore for SqliteStore {
    async fn find(&self, key: &CacheKey) -> Result<Option<CacheDocument>, StoreError> {
        let key = key.clone();
        self.with_conn(move |conn| {
            let row = conn
                .query_row(
                    "SELECT vocab, language, data, created_at, updated_at
                     FROM vocab_cache WHERE id = ?1",
                    params![key.as_str()],
                    |row| {
                        Ok((
                            row.get::<_, String>(0)?,
                            row.get::<_, String>(1)?,
                            row.get::<_, String>(2)?,
                            row.get::<_, String>(3)?,
                            row.get::<_, String>(4)?,
                        ))
                    },
                )
                .optional()?;

            let Some((vocab, language, data, created_at, updated_at)) = row else {
                return Ok(None);
            };
            Ok(Some(CacheDocument {
                key,
                vocab,
                language,
                data: serde_json::from_str(&data)?,
                created_at: parse_ts(&created_at)?,
                updated_at: parse_ts(&updated_at)?,
            }))
        })
        .await
    }

    async fn upsert(&self, document: CacheDocument) -> Result<(), StoreError> {
        let data = serde_json::to_string(&document.data)?;
        self.with_conn(move |conn| {
            conn.execute(
                "INSERT OR REPLACE INTO vocab_cache
                 (id, vocab, language, data, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    document.key.as_str(),
                    document.vocab,
                    document.language,
                    data,
                    format_ts(&document.created_at),
                    format_ts(&document.updated_at),
                ],
            )?;
            Ok(())
        })
        .await
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}
