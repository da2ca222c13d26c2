use eyre::Result;
use onetime_store::NonceStore;
use redis::{AsyncCommands, Client};
use serde::Deserialize;
use std::time::Duration;

#[derive(Clone)]
pub struct RedisCache {
    client: Client,
    prefix: String,
    default_ttl: Option<Duration>,
}

#[derive(Clone, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub key_prefix: String,
    /// Expiration for entries written without an explicit TTL. Without one
    /// such entries persist until consumed.
    #[serde(default, deserialize_with = "onetime_store::duration::deserialize_option")]
    pub default_ttl: Option<Duration>,
}

impl RedisCache {
    pub async fn new(config: RedisConfig) -> Result<Self> {
        Ok(Self {
            client: Client::open(config.url)?,
            prefix: config.key_prefix,
            default_ttl: config.default_ttl,
        })
    }

    fn format_key(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }
}

impl NonceStore for RedisCache {
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()> {
        let key = self.format_key(key);
        let mut conn = self.client.get_multiplexed_async_connection().await?;

        match ttl.or(self.default_ttl) {
            // PSETEX rejects a zero expiry.
            Some(ttl) => {
                let millis = ttl.as_millis().max(1) as u64;
                conn.pset_ex::<_, _, ()>(key, value, millis).await?
            }
            None => conn.set::<_, _, ()>(key, value).await?,
        }

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let key = self.format_key(key);
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let value: Option<String> = conn.get(&key).await?;
        Ok(value)
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let key = self.format_key(key);
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let removed: usize = conn.del(&key).await?;
        Ok(removed > 0)
    }
}
