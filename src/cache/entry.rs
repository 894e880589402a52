//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with last-access tracking.

use chrono::{DateTime, Duration, Utc};

// == Cache Entry ==
/// Represents a single cache entry with its value and last access time.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry<V> {
    /// The stored value
    pub value: V,
    /// Last time the entry was written (or read, with refresh-on-read)
    pub last_used: DateTime<Utc>,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new cache entry stamped with `now`.
    pub fn new(value: V, now: DateTime<Utc>) -> Self {
        Self {
            value,
            last_used: now,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has outlived `ttl` at instant `now`.
    ///
    /// Boundary condition: an entry is expired as soon as `last_used + ttl`
    /// is at or before `now`, so a full TTL window is never served twice.
    /// A TTL reaching past the representable calendar never expires.
    pub fn is_expired(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.expires_at(ttl)
            .is_some_and(|expires_at| expires_at <= now)
    }

    /// Instant at which the entry stops being served, or `None` when that
    /// instant is out of range.
    pub fn expires_at(&self, ttl: Duration) -> Option<DateTime<Utc>> {
        self.last_used.checked_add_signed(ttl)
    }

    // == Touch ==
    /// Moves the last access time forward to `now`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_used = now;
    }
}
