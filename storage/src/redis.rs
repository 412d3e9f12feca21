use async_trait::async_trait;
use errors::CacheError;
use redis::AsyncCommands;

use crate::backend::KeyValueStore;

/// Redis-backed key-value store.
///
/// Built on a shared `ConnectionManager`, which reconnects on its own; a
/// failed command surfaces as a `QueryError` and the next call retries over
/// a fresh connection.
pub struct RedisCache {
    connection_manager: redis::aio::ConnectionManager,
}

impl RedisCache {
    pub async fn new(connection_string: &str) -> Result<Self, CacheError> {
        let client =
            redis::Client::open(connection_string).map_err(|e| CacheError::ConnectionError {
                backend: "Redis".to_string(),
                reason: e.to_string(),
            })?;

        let connection_manager =
            client
                .get_connection_manager()
                .await
                .map_err(|e| CacheError::ConnectionError {
                    backend: "Redis".to_string(),
                    reason: e.to_string(),
                })?;

        Ok(Self { connection_manager })
    }
}

#[async_trait]
impl KeyValueStore for RedisCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection_manager.clone();
        conn.get(key).await.map_err(|e| CacheError::QueryError {
            backend: "Redis".to_string(),
            reason: e.to_string(),
        })
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut conn = self.connection_manager.clone();
        conn.set(key, value)
            .await
            .map_err(|e| CacheError::QueryError {
                backend: "Redis".to_string(),
                reason: e.to_string(),
            })
    }

    async fn set_ex(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), CacheError> {
        let mut conn = self.connection_manager.clone();
        conn.set_ex(key, value, ttl_seconds)
            .await
            .map_err(|e| CacheError::QueryError {
                backend: "Redis".to_string(),
                reason: e.to_string(),
            })
    }

    async fn del(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.connection_manager.clone();
        conn.del(key).await.map_err(|e| CacheError::QueryError {
            backend: "Redis".to_string(),
            reason: e.to_string(),
        })
    }
}
