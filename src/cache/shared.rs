//! Shared Cache Module
//!
//! Concurrency-safe handle over a [`BoundedTtlCache`].

use std::fmt::Debug;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Duration;

use crate::cache::{BoundedTtlCache, CacheKey, CacheOptions, CacheStats, Clock, SystemClock};
use crate::error::Result;

// == Shared TTL Cache ==
/// Cloneable, thread-safe cache handle.
///
/// One mutex guards the whole store and is held for the entire call, including
/// the eviction pass triggered by `set`. Lock hold time is bounded by one scan
/// of the entries. Clones share the same store.
#[derive(Debug)]
pub struct SharedTtlCache<K, V> {
    inner: Arc<Mutex<BoundedTtlCache<K, V>>>,
}

impl<K, V> Clone for SharedTtlCache<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<K, V> SharedTtlCache<K, V>
where
    K: CacheKey,
    V: Clone + Debug,
{
    /// Creates an empty shared cache driven by the system clock.
    ///
    /// Always locked; `options.concurrency_safe` is not consulted.
    pub fn new(capacity: usize, ttl: Duration, options: CacheOptions) -> Result<Self> {
        Self::with_clock(capacity, ttl, options, Arc::new(SystemClock))
    }

    /// Creates an empty shared cache reading time from `clock`.
    pub fn with_clock(
        capacity: usize,
        ttl: Duration,
        options: CacheOptions,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let store = BoundedTtlCache::with_clock(capacity, ttl, options, clock)?;
        Ok(Self {
            inner: Arc::new(Mutex::new(store)),
        })
    }

    /// Looks up a key's value under the lock. See [`BoundedTtlCache::get`].
    pub fn get(&self, key: &K) -> Option<V> {
        self.lock().get(key)
    }

    /// Stores a value under the lock. See [`BoundedTtlCache::set`].
    pub fn set(&self, key: K, value: V) -> Result<()> {
        self.lock().set(key, value)
    }

    pub fn stats(&self) -> CacheStats {
        self.lock().stats()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    pub fn ttl(&self) -> Duration {
        self.lock().ttl()
    }

    // A panic inside a cache call cannot leave the map half-written, so a
    // poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, BoundedTtlCache<K, V>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
