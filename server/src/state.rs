use std::sync::Arc;

use storage::{CacheStore, RedisCache};
use suggest::{CompletionClient, KeyRotator};
use tracing::{info, warn};

use crate::Config;

/// Shared per-process state, constructed once at startup and handed to every
/// handler by reference. The rotation cursor and the cache connection live
/// here; there are no ambient globals.
#[derive(Clone)]
pub struct AppState {
    pub cache: CacheStore,
    pub completer: Arc<CompletionClient>,
    pub cache_ttl_secs: u64,
}

impl AppState {
    pub async fn from_config(config: &Config) -> anyhow::Result<Self> {
        let cache = match &config.redis_url {
            Some(url) => match RedisCache::new(url).await {
                Ok(store) => {
                    info!("cache store connected");
                    CacheStore::new(Arc::new(store))
                }
                // Cache is an optimization; an unreachable store must not
                // keep the process from serving suggestions.
                Err(e) => {
                    warn!(error = %e, "cache store unreachable, running without caching");
                    CacheStore::unconfigured()
                }
            },
            None => {
                info!("no cache store configured, running without caching");
                CacheStore::unconfigured()
            }
        };

        if config.api_keys.is_empty() {
            warn!("no upstream credentials configured, all lookups will return zero suggestions");
        }

        let rotator = KeyRotator::new(config.api_keys.clone());
        let completer = CompletionClient::new(
            rotator,
            config.api_base.clone(),
            config.primary_model.clone(),
            config.fallback_model.clone(),
        )
        .map_err(|e| anyhow::anyhow!("completion client: {e}"))?;

        Ok(Self {
            cache,
            completer: Arc::new(completer),
            cache_ttl_secs: config.cache_ttl_secs,
        })
    }
}
