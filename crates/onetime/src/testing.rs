//! In-memory store with switchable failures for exercising the manager.

use eyre::{eyre, Result};
use onetime_store::{NonceStore, MAX_TTL};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Default)]
pub struct TestStore {
    inner: Arc<Inner>,
    max_ttl: Option<Duration>,
}

#[derive(Default)]
struct Inner {
    entries: Mutex<HashMap<String, String>>,
    ttls: Mutex<Vec<Option<Duration>>>,
    steal_on_get: Mutex<Option<String>>,
    fail_set: AtomicBool,
    fail_get: AtomicBool,
    fail_delete: AtomicBool,
    delete_calls: AtomicUsize,
}

impl TestStore {
    pub fn with_max_ttl(max_ttl: Duration) -> Self {
        Self {
            max_ttl: Some(max_ttl),
            ..Self::default()
        }
    }

    pub fn fail_set(&self, fail: bool) {
        self.inner.fail_set.store(fail, Ordering::SeqCst);
    }

    pub fn fail_get(&self, fail: bool) {
        self.inner.fail_get.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.inner.fail_delete.store(fail, Ordering::SeqCst);
    }

    /// Makes the next read of `key` return the entry while dropping it, as if
    /// another consumer deleted it right after our read.
    pub fn remove_on_next_get(&self, key: &str) {
        *self.inner.steal_on_get.lock().unwrap() = Some(key.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.entries.lock().unwrap().contains_key(key)
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.entries.lock().unwrap().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.entries.lock().unwrap().len()
    }

    /// TTL passed to the most recent `set`, `None` if nothing was set yet.
    pub fn last_ttl(&self) -> Option<Option<Duration>> {
        self.inner.ttls.lock().unwrap().last().copied()
    }

    pub fn delete_calls(&self) -> usize {
        self.inner.delete_calls.load(Ordering::SeqCst)
    }
}

impl NonceStore for TestStore {
    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> Result<()> {
        if self.inner.fail_set.load(Ordering::SeqCst) {
            return Err(eyre!("set failed: store unavailable"));
        }

        self.inner.ttls.lock().unwrap().push(ttl);
        self.inner
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        if self.inner.fail_get.load(Ordering::SeqCst) {
            return Err(eyre!("get failed: store unavailable"));
        }

        let mut entries = self.inner.entries.lock().unwrap();
        let mut steal = self.inner.steal_on_get.lock().unwrap();
        if steal.as_deref() == Some(key) {
            *steal = None;
            return Ok(entries.remove(key));
        }

        Ok(entries.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        self.inner.delete_calls.fetch_add(1, Ordering::SeqCst);

        if self.inner.fail_delete.load(Ordering::SeqCst) {
            return Err(eyre!("delete failed: store unavailable"));
        }

        Ok(self.inner.entries.lock().unwrap().remove(key).is_some())
    }

    fn max_ttl(&self) -> Duration {
        self.max_ttl.unwrap_or(MAX_TTL)
    }
}
