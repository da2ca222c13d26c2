pub mod cache;
pub mod config;
pub mod error;
pub mod nonce;

#[cfg(test)]
mod testing;

pub use cache::Cache;
pub use config::Config;
pub use error::NonceError;
pub use nonce::NonceManager;
pub use onetime_store::{NonceStore, MAX_TTL};

use eyre::Result;
use tracing::info;

/// Builds the configured cache backend and a manager on top of it.
pub async fn setup_manager(config: &Config) -> Result<NonceManager<Cache>> {
    let cache = Cache::from_provider(config.cache.provider.clone()).await?;
    let manager = NonceManager::new(cache, Some(config.nonce.expires_in));

    info!(
        "Nonce manager started (cache: {}, ttl: {:?})",
        manager.store().name(),
        manager.ttl()
    );

    Ok(manager)
}
