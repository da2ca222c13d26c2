use eyre::Result;
use std::time::Duration;

pub mod duration;

/// Largest TTL a store is assumed to accept: the 32-bit signed millisecond
/// boundary.
pub const MAX_TTL: Duration = Duration::from_millis(i32::MAX as u64);

/// Key/value store with per-entry expiration backing a nonce manager.
#[allow(async_fn_in_trait)]
pub trait NonceStore: Send + Sync {
    /// Writes `value` under `key`. With no `ttl` the store's own default
    /// expiration applies.
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()>;

    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Removes `key`, returning whether this call removed an entry.
    ///
    /// Must be atomic: of several concurrent deletes of the same key, at most
    /// one may return `true`.
    async fn delete(&self, key: &str) -> Result<bool>;

    fn max_ttl(&self) -> Duration {
        MAX_TTL
    }
}
