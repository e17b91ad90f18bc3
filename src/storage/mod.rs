//! # Storage Module
//!
//! Expiring key-value stores used by the streamers to avoid redundant network
//! calls. A store keeps opaque JSON values under string keys, each with an
//! optional time-to-live. Expired entries are removed lazily when they are read,
//! or eagerly through [`Storer::prune_expired_entries`].
//!
//! Typed access goes through [`StorerExt`]: the caller pairs a fixed key with a
//! fixed value type, and the store itself never inspects what it holds.
//!
//! ```text
//! SpotifyStreamer ──get::<Song>(SPOTIFY_TRACK_KEY)──▶ StorerExt
//!                                                      │ serde_json
//!                                                      ▼
//!                                     Storer (InMemoryStorage, ...)
//! ```

mod memory;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::warn;

use crate::Res;

pub use memory::InMemoryStorage;

/// Expiring key-value capability.
///
/// Implementations must be safe to share between threads; concurrent writers
/// replace whole entries, the last one wins.
pub trait Storer: Send + Sync {
    /// Stores `value` under `key`, replacing any existing entry.
    ///
    /// `ttl_ms` is relative to now. `None` keeps the entry forever, a value of
    /// zero or less produces an entry that is already expired on the next read.
    fn set_value(&self, key: &str, value: Value, ttl_ms: Option<i64>);

    /// Returns the value if present and not expired. An expired entry is
    /// deleted as a side effect.
    fn get_value(&self, key: &str) -> Option<Value>;

    /// Same validity check and side effect as [`Storer::get_value`].
    fn has(&self, key: &str) -> bool;

    /// Removes the entry, returning whether it existed.
    fn delete(&self, key: &str) -> bool;

    fn clear(&self);

    /// Snapshot of every stored key, expired or not.
    fn keys(&self) -> Vec<String>;

    /// Eagerly removes every expired entry.
    fn prune_expired_entries(&self);
}

/// Typed accessors on top of any [`Storer`].
pub trait StorerExt: Storer {
    fn set<T: Serialize>(&self, key: &str, value: &T, ttl_ms: Option<i64>) -> Res<()> {
        let value = serde_json::to_value(value)?;
        self.set_value(key, value, ttl_ms);
        Ok(())
    }

    /// Reads `key` as a `T`. A value of another shape is treated as a miss.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get_value(key)?;
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(key, error = %e, "cached value has an unexpected shape");
                None
            }
        }
    }
}

impl<S: Storer + ?Sized> StorerExt for S {}

/// Backends selectable by name when building a [`crate::NowPlaying`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageKind {
    #[default]
    InMemory,
}

impl std::str::FromStr for StorageKind {
    type Err = crate::error::NowPlayingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "inmemory" | "in-memory" | "memory" => Ok(StorageKind::InMemory),
            other => Err(crate::error::NowPlayingError::configuration(format!(
                "unsupported storage kind '{other}'"
            ))),
        }
    }
}
