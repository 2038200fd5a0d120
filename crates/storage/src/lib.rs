//! Persistent key-value storage for the sync engine.
//!
//! Provides one async get/set interface with three backends:
//! - In-memory map for tests and ephemeral runs
//! - SQLite file that survives restarts
//! - Redis for a shared cache across service instances

pub mod factory;
pub mod kv;
pub mod memory;
pub mod redis_store;
pub mod sqlite;

pub use factory::{open_store, StoreConfig};
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
pub use redis_store::RedisStore;
pub use sqlite::SqliteStore;
