//! Cache Store Module
//!
//! Main cache engine: a fixed-capacity HashMap whose entries expire lazily
//! after a TTL and are evicted expired-first, least-recently-used second.

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::cache::{CacheEntry, CacheKey, CacheOptions, CacheStats, Clock, SystemClock};
use crate::error::{CacheError, Result};

// == Bounded TTL Cache ==
/// Fixed-size cache with lazy TTL expiry and LRU-like eviction.
///
/// The cache does no background work: expired entries are dropped when they
/// are looked up, or when a `set` on a full cache runs an eviction pass.
/// Methods take `&mut self`; wrap it in [`SharedTtlCache`](crate::cache::SharedTtlCache)
/// to share it between threads.
#[derive(Debug)]
pub struct BoundedTtlCache<K, V> {
    /// Key-value storage
    entries: HashMap<K, CacheEntry<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries allowed
    capacity: usize,
    /// How long an entry stays live after its last use
    ttl: Duration,
    options: CacheOptions,
    clock: Arc<dyn Clock>,
}

impl<K, V> BoundedTtlCache<K, V>
where
    K: CacheKey,
    V: Clone + Debug,
{
    // == Constructor ==
    /// Creates an empty cache driven by the system clock.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries the cache can hold
    /// * `ttl` - Lifetime of an entry after its last use
    /// * `options` - Behavior switches
    ///
    /// # Errors
    /// - `InvalidCapacity` when `capacity` is zero
    /// - `InvalidTtl` when `ttl` is zero or negative
    pub fn new(capacity: usize, ttl: Duration, options: CacheOptions) -> Result<Self> {
        Self::with_clock(capacity, ttl, options, Arc::new(SystemClock))
    }

    /// Creates an empty cache reading time from `clock`.
    pub fn with_clock(
        capacity: usize,
        ttl: Duration,
        options: CacheOptions,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity);
        }

        if ttl <= Duration::zero() {
            return Err(CacheError::InvalidTtl);
        }

        Ok(Self {
            entries: HashMap::with_capacity(capacity),
            stats: CacheStats::new(),
            capacity,
            ttl,
            options,
            clock,
        })
    }

    // == Get ==
    /// Looks up a key's value.
    ///
    /// Returns `None` for the empty key, for unknown keys and for expired
    /// entries. An expired entry is removed as a side effect. With
    /// `refresh_on_read`, a hit moves the entry's last use to now.
    pub fn get(&mut self, key: &K) -> Option<V> {
        if key.is_empty_key() {
            return None;
        }

        let now = self.clock.now();

        let expired = match self.entries.get(key) {
            Some(entry) => entry.is_expired(self.ttl, now),
            None => {
                self.stats.record_miss();
                return None;
            }
        };

        if expired {
            if let Some(entry) = self.entries.remove(key) {
                if self.options.debug_log {
                    debug!(
                        target: "cacher",
                        key = ?key,
                        value = ?entry.value,
                        last_used = %entry.last_used,
                        "get: deleted by ttl"
                    );
                }
            }
            self.stats.record_expirations(1);
            self.stats.record_miss();
            self.stats.set_total_entries(self.entries.len());
            return None;
        }

        let entry = self.entries.get_mut(key)?;
        if self.options.refresh_on_read {
            entry.touch(now);
        }

        if self.options.debug_log {
            debug!(
                target: "cacher",
                key = ?key,
                value = ?entry.value,
                last_used = %entry.last_used,
                "get"
            );
        }

        let value = entry.value.clone();
        self.stats.record_hit();
        Some(value)
    }

    // == Set ==
    /// Stores a value under `key`, stamping it with the current time.
    ///
    /// A full cache runs an eviction pass first. The pass runs whenever the
    /// store is at capacity, even when `key` is already present and the write
    /// would not grow the store.
    ///
    /// # Errors
    /// - `EmptyKey` when `key` is the key type's empty value; nothing is written
    pub fn set(&mut self, key: K, value: V) -> Result<()> {
        if key.is_empty_key() {
            return Err(CacheError::EmptyKey);
        }

        if self.entries.len() >= self.capacity {
            self.clear_space();
        }

        let entry = CacheEntry::new(value, self.clock.now());

        if self.options.debug_log {
            debug!(
                target: "cacher",
                key = ?key,
                value = ?entry.value,
                last_used = %entry.last_used,
                "set"
            );
        }

        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());

        Ok(())
    }

    // == Clear Space ==
    /// Eviction pass run by `set` on a full cache.
    ///
    /// Drops every expired entry in one scan while remembering the surviving
    /// entry with the oldest last use; that entry is evicted only if the scan
    /// freed nothing.
    fn clear_space(&mut self) {
        let now = self.clock.now();
        let ttl = self.ttl;
        let debug_log = self.options.debug_log;

        let mut expired: u64 = 0;
        let mut oldest: Option<(K, DateTime<Utc>)> = None;

        self.entries.retain(|key, entry| {
            if entry.is_expired(ttl, now) {
                if debug_log {
                    debug!(
                        target: "cacher",
                        key = ?key,
                        value = ?entry.value,
                        last_used = %entry.last_used,
                        now = %now,
                        "clear_space: deleted expired entry"
                    );
                }
                expired += 1;
                return false;
            }

            let is_older = oldest
                .as_ref()
                .map_or(true, |(_, last_used)| entry.last_used < *last_used);
            if is_older {
                oldest = Some((key.clone(), entry.last_used));
            }

            true
        });

        self.stats.record_expirations(expired);

        if self.entries.len() < self.capacity {
            self.stats.set_total_entries(self.entries.len());
            return;
        }

        if let Some((key, _)) = oldest {
            if let Some(entry) = self.entries.remove(&key) {
                if debug_log {
                    debug!(
                        target: "cacher",
                        key = ?key,
                        value = ?entry.value,
                        last_used = %entry.last_used,
                        "clear_space: evicted least recently used"
                    );
                }
                self.stats.record_eviction();
            }
        }

        self.stats.set_total_entries(self.entries.len());
    }

    // == Accessors ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Whether `key` is physically stored, regardless of expiry. Does not
    /// touch the entry.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Raw entry for `key`, regardless of expiry. Does not touch the entry.
    pub fn peek(&self, key: &K) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }
}
