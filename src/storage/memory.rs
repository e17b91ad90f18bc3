use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
    time::Duration,
};

use serde_json::Value;
use tokio::time::Instant;

use super::Storer;

struct CacheEntry {
    value: Value,
    /// `None` never expires.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_valid(&self, now: Instant) -> bool {
        match self.expires_at {
            Some(expires_at) => expires_at > now,
            None => true,
        }
    }
}

/// Process-local [`Storer`] backed by a mutex-guarded map.
///
/// The clock is `tokio::time::Instant`, so paused test runtimes control
/// expiry.
#[derive(Default)]
pub struct InMemoryStorage {
    data: Mutex<HashMap<String, CacheEntry>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // entries are replaced whole, a poisoned map is still consistent
    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn expiry_for(now: Instant, ttl_ms: Option<i64>) -> Option<Instant> {
        match ttl_ms {
            None => None,
            Some(ms) if ms <= 0 => Some(now),
            // overflowing the clock is as good as never expiring
            Some(ms) => now.checked_add(Duration::from_millis(ms as u64)),
        }
    }
}

impl Storer for InMemoryStorage {
    fn set_value(&self, key: &str, value: Value, ttl_ms: Option<i64>) {
        let expires_at = Self::expiry_for(Instant::now(), ttl_ms);
        self.lock()
            .insert(key.to_string(), CacheEntry { value, expires_at });
    }

    fn get_value(&self, key: &str) -> Option<Value> {
        let now = Instant::now();
        let mut data = self.lock();
        match data.get(key) {
            Some(entry) if entry.is_valid(now) => Some(entry.value.clone()),
            Some(_) => {
                data.remove(key);
                None
            }
            None => None,
        }
    }

    fn has(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut data = self.lock();
        match data.get(key) {
            Some(entry) if entry.is_valid(now) => true,
            Some(_) => {
                data.remove(key);
                false
            }
            None => false,
        }
    }

    fn delete(&self, key: &str) -> bool {
        self.lock().remove(key).is_some()
    }

    fn clear(&self) {
        self.lock().clear();
    }

    fn keys(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    fn prune_expired_entries(&self) {
        let now = Instant::now();
        self.lock().retain(|_, entry| entry.is_valid(now));
    }
}
