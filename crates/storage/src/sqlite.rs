//! SQLite-backed store using sqlx.
//!
//! A single `kv` table keyed by string, so cached cells and names survive
//! service restarts.

use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use biodiv_common::{BiodivError, BiodivResult};

use crate::kv::KeyValueStore;

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS kv (
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
"#;

/// Persistent store in a SQLite database file.
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open or create the store database at the given path.
    pub async fn open(path: &Path) -> BiodivResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .map_err(|e| BiodivError::StorageError(format!("Failed to open SQLite database: {}", e)))?;

        let store = Self { pool };
        store.migrate().await?;

        info!(path = %path.display(), "Opened key-value store database");

        Ok(store)
    }

    /// Open an in-memory database (for testing).
    pub async fn open_memory() -> BiodivResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(":memory:")
            .create_if_missing(true);

        // One connection, otherwise each connection gets its own empty database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| BiodivError::StorageError(format!("Failed to open SQLite database: {}", e)))?;

        let store = Self { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> BiodivResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| BiodivError::StorageError(format!("Failed to create kv table: {}", e)))?;
        Ok(())
    }

    /// Number of stored keys.
    pub async fn count(&self) -> BiodivResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM kv")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| BiodivError::StorageError(format!("Count failed: {}", e)))
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> BiodivResult<Option<String>> {
        sqlx::query_scalar::<_, String>("SELECT value FROM kv WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| BiodivError::StorageError(format!("Get '{}' failed: {}", key, e)))
    }

    async fn set(&self, key: &str, value: &str) -> BiodivResult<()> {
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            r#"
            INSERT INTO kv (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(&now)
        .execute(&self.pool)
        .await
        .map_err(|e| BiodivError::StorageError(format!("Set '{}' failed: {}", key, e)))?;

        debug!(key = %key, bytes = value.len(), "Stored value");
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "sqlite"
    }
}
