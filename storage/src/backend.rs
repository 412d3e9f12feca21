use async_trait::async_trait;
use errors::CacheError;

/// String key-value store with optional per-key expiry.
///
/// Keys and values are UTF-8 strings; values are JSON-encoded by the caller.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Permanent write; the key lives until explicitly overwritten or deleted.
    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError>;

    /// Write with a TTL in seconds from now.
    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError>;

    async fn del(&self, key: &str) -> Result<(), CacheError>;
}
