use eyre::Result;
use onetime_moka::{MokaCache, MokaConfig};
use onetime_redis::RedisCache;
use onetime_store::NonceStore;
use std::time::Duration;

use crate::config::CacheProvider;

#[derive(Clone)]
pub enum Cache {
    Redis(RedisCache),
    Moka(MokaCache),
}

impl Cache {
    /// Builds the configured backend, an in-process moka cache when none is
    /// configured.
    pub async fn from_provider(provider: Option<CacheProvider>) -> Result<Self> {
        let cache = match provider {
            Some(CacheProvider::Redis(config)) => Cache::Redis(RedisCache::new(config).await?),
            Some(CacheProvider::Moka(config)) => Cache::Moka(MokaCache::new(config).await?),
            None => Cache::Moka(
                MokaCache::new(MokaConfig {
                    max_capacity: 10_000,
                    ttl: Duration::from_secs(3600),
                })
                .await?,
            ),
        };

        Ok(cache)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Cache::Redis(_) => "redis",
            Cache::Moka(_) => "moka",
        }
    }
}

impl NonceStore for Cache {
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()> {
        match self {
            Cache::Redis(cache) => cache.set(key, value, ttl).await,
            Cache::Moka(cache) => cache.set(key, value, ttl).await,
        }
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            Cache::Redis(cache) => cache.get(key).await,
            Cache::Moka(cache) => cache.get(key).await,
        }
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        match self {
            Cache::Redis(cache) => cache.delete(key).await,
            Cache::Moka(cache) => cache.delete(key).await,
        }
    }

    fn max_ttl(&self) -> Duration {
        match self {
            Cache::Redis(cache) => cache.max_ttl(),
            Cache::Moka(cache) => cache.max_ttl(),
        }
    }
}
