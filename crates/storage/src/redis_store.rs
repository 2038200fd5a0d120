//! Redis-backed store.

use async_trait::async_trait;
use redis::{aio::MultiplexedConnection, AsyncCommands, Client};

use biodiv_common::{BiodivError, BiodivResult};

use crate::kv::KeyValueStore;

/// Store keeping every value as a plain Redis string, without expiry.
///
/// Keys are namespaced with a prefix so the database can be shared.
pub struct RedisStore {
    conn: MultiplexedConnection,
    prefix: String,
}

impl RedisStore {
    /// Connect to Redis.
    pub async fn connect(redis_url: &str, prefix: impl Into<String>) -> BiodivResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| BiodivError::StorageError(format!("Redis connection failed: {}", e)))?;

        let conn = client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| BiodivError::StorageError(format!("Redis connection failed: {}", e)))?;

        Ok(Self {
            conn,
            prefix: prefix.into(),
        })
    }

    fn namespaced(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> BiodivResult<Option<String>> {
        let mut conn = self.conn.clone();

        conn.get::<_, Option<String>>(self.namespaced(key))
            .await
            .map_err(|e| BiodivError::StorageError(format!("Cache get failed: {}", e)))
    }

    async fn set(&self, key: &str, value: &str) -> BiodivResult<()> {
        let mut conn = self.conn.clone();

        conn.set::<_, _, ()>(self.namespaced(key), value)
            .await
            .map_err(|e| BiodivError::StorageError(format!("Cache set failed: {}", e)))
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
