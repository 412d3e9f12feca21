use std::sync::Arc;

use errors::CacheError;
use tracing::warn;

use crate::backend::KeyValueStore;

/// Best-effort cache facade over an optional key-value store.
///
/// An unconfigured store degrades every operation to a no-op. An unreachable
/// store degrades reads to a miss; write and delete failures are returned so
/// the caller decides whether they matter (the suggestion path swallows them,
/// the feedback path surfaces them).
#[derive(Clone)]
pub struct CacheStore {
    store: Option<Arc<dyn KeyValueStore>>,
}

impl CacheStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store: Some(store) }
    }

    /// No store at all; every operation becomes a no-op and every read a miss.
    pub fn unconfigured() -> Self {
        Self { store: None }
    }

    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    /// Read a key, treating an unconfigured or unreachable store as a miss.
    pub async fn read(&self, key: &str) -> Option<String> {
        let store = self.store.as_ref()?;
        match store.get(key).await {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "cache read failed, treating as miss");
                None
            }
        }
    }

    pub async fn write_with_expiry(
        &self,
        key: &str,
        value: &str,
        ttl_seconds: u64,
    ) -> Result<(), CacheError> {
        match &self.store {
            Some(store) => store.set_ex(key, value, ttl_seconds).await,
            None => Ok(()),
        }
    }

    /// Permanent write; used for vocabulary entries.
    pub async fn write(&self, key: &str, value: &str) -> Result<(), CacheError> {
        match &self.store {
            Some(store) => store.set(key, value).await,
            None => Ok(()),
        }
    }

    pub async fn delete(&self, key: &str) -> Result<(), CacheError> {
        match &self.store {
            Some(store) => store.del(key).await,
            None => Ok(()),
        }
    }
}
