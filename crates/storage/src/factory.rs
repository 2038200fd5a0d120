//! Backend selection.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use biodiv_common::{BiodivError, BiodivResult};

use crate::kv::KeyValueStore;
use crate::memory::MemoryStore;
use crate::redis_store::RedisStore;
use crate::sqlite::SqliteStore;

/// Which backend to open.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreConfig {
    Memory,
    Sqlite { path: PathBuf },
    Redis { url: String, prefix: String },
}

impl StoreConfig {
    /// Build from a backend name and its location (file path or URL).
    pub fn from_parts(backend: &str, location: Option<&str>) -> BiodivResult<Self> {
        match backend.to_lowercase().as_str() {
            "memory" => Ok(StoreConfig::Memory),
            "sqlite" => {
                let path = location.unwrap_or("data/biodiv-cache.db");
                Ok(StoreConfig::Sqlite {
                    path: PathBuf::from(path),
                })
            }
            "redis" => {
                let url = location.unwrap_or("redis://127.0.0.1:6379");
                Ok(StoreConfig::Redis {
                    url: url.to_string(),
                    prefix: "biodiv".to_string(),
                })
            }
            other => Err(BiodivError::ConfigError(format!(
                "Unknown store backend '{}', expected memory, sqlite or redis",
                other
            ))),
        }
    }
}

/// Open the configured backend.
pub async fn open_store(config: &StoreConfig) -> BiodivResult<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config {
        StoreConfig::Memory => Arc::new(MemoryStore::new()),
        StoreConfig::Sqlite { path } => Arc::new(SqliteStore::open(path).await?),
        StoreConfig::Redis { url, prefix } => Arc::new(RedisStore::connect(url, prefix.clone()).await?),
    };

    info!(backend = store.backend(), "Key-value store ready");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_defaults() {
        assert_eq!(StoreConfig::from_parts("memory", None).unwrap(), StoreConfig::Memory);
        assert_eq!(
            StoreConfig::from_parts("SQLite", Some("/tmp/x.db")).unwrap(),
            StoreConfig::Sqlite {
                path: PathBuf::from("/tmp/x.db")
            }
        );
        assert!(matches!(
            StoreConfig::from_parts("redis", None).unwrap(),
            StoreConfig::Redis { .. }
        ));
    }

    #[test]
    fn test_from_parts_unknown_backend() {
        assert!(matches!(
            StoreConfig::from_parts("etcd", None),
            Err(BiodivError::ConfigError(_))
        ));
    }

    #[tokio::test]
    async fn test_open_memory_store() {
        let store = open_store(&StoreConfig::Memory).await.unwrap();
        assert_eq!(store.backend(), "memory");
    }
}
