use crate::error::NonceError;
use onetime_store::NonceStore;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, error, warn};
use uuid::Uuid;

/// Issues nonces and redeems each of them at most once.
///
/// A nonce is a random id stored in the backing [`NonceStore`] together with
/// a JSON-encoded payload. Using the nonce deletes the entry and hands the
/// payload back; from then on the id reads as [`NonceError::AlreadyUsed`],
/// exactly like an id that expired or was never issued.
///
/// The manager keeps no state of its own besides its TTL, so clones can be
/// shared freely between tasks.
#[derive(Clone)]
pub struct NonceManager<S> {
    store: S,
    ttl: Option<Duration>,
}

impl<S: NonceStore> NonceManager<S> {
    /// With no `ttl` (or a zero one) entries fall back to the store's own
    /// expiration. Anything above [`NonceStore::max_ttl`] is clamped to it.
    pub fn new(store: S, ttl: Option<Duration>) -> Self {
        let max_ttl = store.max_ttl();
        let ttl = ttl
            .filter(|ttl| !ttl.is_zero())
            .map(|ttl| ttl.min(max_ttl));

        Self { store, ttl }
    }

    pub fn ttl(&self) -> Option<Duration> {
        self.ttl
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stores `payload` under a fresh id and returns the id.
    ///
    /// The id is only returned once the store confirmed the write.
    pub async fn create<T>(&self, payload: &T) -> Result<String, NonceError>
    where
        T: Serialize + ?Sized,
    {
        let value =
            serde_json::to_string(payload).map_err(|e| NonceError::CreateFailed(e.into()))?;
        let id = Uuid::new_v4().to_string();

        self.store.set(&id, value, self.ttl).await.map_err(|e| {
            error!("Failed to store nonce: {}", e);
            NonceError::CreateFailed(e)
        })?;

        debug!("Nonce created: {}", id);

        Ok(id)
    }

    /// Consumes the nonce `id` and returns the payload it was created with.
    ///
    /// The payload is only returned after the store confirmed that this call
    /// removed the entry. If the delete fails, or a concurrent call removed
    /// the entry first, the payload is withheld.
    pub async fn use_nonce<T>(&self, id: &str) -> Result<T, NonceError>
    where
        T: DeserializeOwned,
    {
        let value = self
            .store
            .get(id)
            .await
            .map_err(|e| {
                error!("Failed to read nonce: {}", e);
                NonceError::ReadFailed(e)
            })?
            .ok_or_else(|| {
                warn!("Nonce already used or expired");
                NonceError::AlreadyUsed
            })?;

        // Decode before deleting so a type mismatch does not burn the nonce.
        let payload = serde_json::from_str(&value).map_err(|e| NonceError::ReadFailed(e.into()))?;

        match self.store.delete(id).await {
            Ok(true) => {
                debug!("Nonce used: {}", id);
                Ok(payload)
            }
            Ok(false) => {
                warn!("Nonce consumed concurrently: {}", id);
                Err(NonceError::AlreadyUsed)
            }
            Err(e) => {
                error!("Failed to delete nonce: {}", e);
                Err(NonceError::DeleteFailed(e))
            }
        }
    }
}
