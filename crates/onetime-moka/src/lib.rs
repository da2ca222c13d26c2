use eyre::Result;
use moka::{future::Cache, Expiry};
use onetime_store::NonceStore;
use serde::Deserialize;
use std::time::{Duration, Instant};

#[derive(Clone)]
pub struct MokaCache {
    cache: Cache<String, Entry>,
}

#[derive(Clone, Deserialize)]
pub struct MokaConfig {
    pub max_capacity: u64,
    /// Expiration for entries written without an explicit TTL.
    #[serde(deserialize_with = "onetime_store::duration::deserialize")]
    pub ttl: Duration,
}

#[derive(Clone)]
struct Entry {
    value: String,
    ttl: Option<Duration>,
}

struct EntryExpiry {
    default_ttl: Duration,
}

impl EntryExpiry {
    fn ttl_of(&self, entry: &Entry) -> Option<Duration> {
        Some(entry.ttl.unwrap_or(self.default_ttl))
    }
}

impl Expiry<String, Entry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        entry: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        self.ttl_of(entry)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        entry: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        self.ttl_of(entry)
    }
}

impl MokaCache {
    pub async fn new(config: MokaConfig) -> Result<Self> {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(EntryExpiry {
                default_ttl: config.ttl,
            })
            .build();

        Ok(Self { cache })
    }
}

impl NonceStore for MokaCache {
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()> {
        self.cache.insert(key.to_string(), Entry { value, ttl }).await;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cache.get(key).await.map(|entry| entry.value))
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.cache.remove(key).await.is_some())
    }
}
