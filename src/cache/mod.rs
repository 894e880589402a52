//! Cache Module
//!
//! Provides a bounded in-memory cache with lazy TTL expiration and
//! expired-first, least-recently-used-second eviction.

mod clock;
mod entry;
mod options;
mod shared;
mod stats;
mod store;


use std::fmt::Debug;
use std::hash::Hash;

// Re-export public types
pub use clock::{Clock, SystemClock};
#[cfg(test)]
pub use clock::ManualClock;
pub use entry::CacheEntry;
pub use options::CacheOptions;
pub use shared::SharedTtlCache;
pub use stats::CacheStats;
pub use store::BoundedTtlCache;

use crate::error::Result;

// == Cache Key ==
/// Requirements for a cache key.
///
/// `Default::default()` is the reserved empty key: it is never stored and
/// never found. That is `0` for integers and `""` for strings; custom key
/// types pick their sentinel through their `Default` impl.
pub trait CacheKey: Eq + Hash + Clone + Default + Debug {
    /// Whether this key is the reserved empty value.
    fn is_empty_key(&self) -> bool {
        *self == Self::default()
    }
}

impl<T> CacheKey for T where T: Eq + Hash + Clone + Default + Debug {}

// == Cacher ==
/// Get/set interface shared by both cache variants, so callers can hold
/// either one behind a box.
pub trait Cacher<K, V>: Send + Sync {
    /// Looks up a key's value.
    fn get(&mut self, key: &K) -> Option<V>;

    /// Adds a value to the cache.
    fn set(&mut self, key: K, value: V) -> Result<()>;

    /// Snapshot of the cache counters.
    fn stats(&self) -> CacheStats;
}

impl<K, V> Cacher<K, V> for BoundedTtlCache<K, V>
where
    K: CacheKey + Send + Sync,
    V: Clone + Debug + Send + Sync,
{
    fn get(&mut self, key: &K) -> Option<V> {
        BoundedTtlCache::get(self, key)
    }

    fn set(&mut self, key: K, value: V) -> Result<()> {
        BoundedTtlCache::set(self, key, value)
    }

    fn stats(&self) -> CacheStats {
        BoundedTtlCache::stats(self)
    }
}

impl<K, V> Cacher<K, V> for SharedTtlCache<K, V>
where
    K: CacheKey + Send + Sync,
    V: Clone + Debug + Send + Sync,
{
    fn get(&mut self, key: &K) -> Option<V> {
        SharedTtlCache::get(self, key)
    }

    fn set(&mut self, key: K, value: V) -> Result<()> {
        SharedTtlCache::set(self, key, value)
    }

    fn stats(&self) -> CacheStats {
        SharedTtlCache::stats(self)
    }
}
