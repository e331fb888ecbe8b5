//! SQLite Database
//!
//! Persistent key-value backend using rusqlite with r2d2 connection pooling.
//! Every key lives in the `settings` table as a JSON text value.

use std::path::Path;

use async_trait::async_trait;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use serde_json::Value;
use tracing::debug;

use promptdeck_core::{CoreError, CoreResult, KeyValueStore};

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::ensure_dir;

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// SQLite-backed key-value store
#[derive(Clone)]
pub struct SqliteStore {
    pool: DbPool,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`
    pub fn open(path: &Path) -> AppResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_dir(parent)?;
            }
        }

        let manager = SqliteConnectionManager::file(path);
        let pool = Pool::builder()
            .max_size(4)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let store = Self { pool };
        store.init_schema()?;
        debug!(path = %path.display(), "opened sqlite store");
        Ok(store)
    }

    /// Create an in-memory database for testing.
    ///
    /// The pool holds a single connection, since every in-memory connection
    /// is its own database.
    pub fn in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let store = Self { pool };
        store.init_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn init_schema(&self) -> AppResult<()> {
        let conn = self.get_connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS settings (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                created_at TEXT DEFAULT CURRENT_TIMESTAMP,
                updated_at TEXT DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        Ok(())
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> AppResult<r2d2::PooledConnection<SqliteConnectionManager>> {
        self.pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))
    }

    /// Check if the database is healthy
    pub fn is_healthy(&self) -> bool {
        if let Ok(conn) = self.pool.get() {
            conn.query_row("SELECT 1", [], |_| Ok(())).is_ok()
        } else {
            false
        }
    }

    /// Run a blocking closure against a pooled connection off the async runtime
    async fn with_connection<T, F>(&self, op: F) -> CoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut rusqlite::Connection) -> CoreResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| CoreError::storage(format!("Failed to get connection: {}", e)))?;
            op(&mut conn)
        })
        .await
        .map_err(|e| CoreError::internal(format!("Task join error: {}", e)))?
    }
}

fn sql_error(e: rusqlite::Error) -> CoreError {
    CoreError::storage(e.to_string())
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> CoreResult<Option<Value>> {
        let key = key.to_string();
        self.with_connection(move |conn| {
            let result = conn.query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            );

            match result {
                Ok(text) => Ok(Some(serde_json::from_str(&text)?)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(sql_error(e)),
            }
        })
        .await
    }

    async fn set(&self, entries: Vec<(String, Value)>) -> CoreResult<()> {
        let keys: Vec<String> = entries.iter().map(|(k, _)| k.clone()).collect();
        self.with_connection(move |conn| {
            let tx = conn.transaction().map_err(sql_error)?;
            for (key, value) in &entries {
                let text = serde_json::to_string(value)?;
                tx.execute(
                    "INSERT INTO settings (key, value, updated_at) VALUES (?1, ?2, CURRENT_TIMESTAMP)
                     ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = CURRENT_TIMESTAMP",
                    params![key, text],
                )
                .map_err(sql_error)?;
            }
            tx.commit().map_err(sql_error)
        })
        .await?;
        debug!(?keys, "store write");
        Ok(())
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        let key = key.to_string();
        self.with_connection(move |conn| {
            conn.execute("DELETE FROM settings WHERE key = ?1", params![key])
                .map_err(sql_error)?;
            Ok(())
        })
        .await
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore")
            .field("pool_size", &self.pool.state().connections)
            .finish()
    }
}
