//! The key-value store interface.

use async_trait::async_trait;

use biodiv_common::BiodivResult;

/// String-keyed persistent store. No transactions, no TTL.
///
/// Values are opaque strings; callers own their encoding (JSON cache entries,
/// plain names).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, if any.
    async fn get(&self, key: &str) -> BiodivResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> BiodivResult<()>;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}
