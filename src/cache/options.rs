//! Cache Options Module
//!
//! Construction-time switches for a cache.

use std::fmt::Debug;

use chrono::Duration;

use crate::cache::{BoundedTtlCache, CacheKey, Cacher, SharedTtlCache};
use crate::error::Result;

// == Cache Options ==
/// Behavior switches recognized by the cache constructors.
///
/// All switches default to off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheOptions {
    /// A successful `get` resets the entry's last access time to now,
    /// extending its TTL window and making it the last eviction candidate.
    pub refresh_on_read: bool,
    /// Every operation runs under one exclusive lock covering the whole store.
    ///
    /// Read only by [`CacheOptions::build`], which picks [`SharedTtlCache`]
    /// when set and [`BoundedTtlCache`] otherwise. The cache types ignore it.
    pub concurrency_safe: bool,
    /// Emit `tracing` debug events for get, set, eviction and purge.
    pub debug_log: bool,
}

impl CacheOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn refresh_on_read(mut self, enabled: bool) -> Self {
        self.refresh_on_read = enabled;
        self
    }

    pub fn concurrency_safe(mut self, enabled: bool) -> Self {
        self.concurrency_safe = enabled;
        self
    }

    pub fn debug_log(mut self, enabled: bool) -> Self {
        self.debug_log = enabled;
        self
    }

    // == Build ==
    /// Creates a cache with these options, choosing the locked or unlocked
    /// variant from `concurrency_safe`.
    ///
    /// # Errors
    /// - `InvalidCapacity` when `capacity` is zero
    /// - `InvalidTtl` when `ttl` is zero or negative
    pub fn build<K, V>(self, capacity: usize, ttl: Duration) -> Result<Box<dyn Cacher<K, V>>>
    where
        K: CacheKey + Send + Sync + 'static,
        V: Clone + Debug + Send + Sync + 'static,
    {
        if self.concurrency_safe {
            Ok(Box::new(SharedTtlCache::<K, V>::new(capacity, ttl, self)?))
        } else {
            Ok(Box::new(BoundedTtlCache::<K, V>::new(capacity, ttl, self)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;

    #[test]
    fn test_options_default_all_off() {
        let options = CacheOptions::default();
        assert!(!options.refresh_on_read);
        assert!(!options.concurrency_safe);
        assert!(!options.debug_log);
    }

    #[test]
    fn test_options_chaining() {
        let options = CacheOptions::new()
            .refresh_on_read(true)
            .concurrency_safe(true)
            .debug_log(true);
        assert!(options.refresh_on_read);
        assert!(options.concurrency_safe);
        assert!(options.debug_log);
    }

    #[test]
    fn test_build_unlocked() {
        let mut cache = CacheOptions::new()
            .build::<String, i32>(3, Duration::hours(4))
            .unwrap();

        cache.set("k1".to_string(), 1).unwrap();
        assert_eq!(cache.get(&"k1".to_string()), Some(1));
    }

    #[test]
    fn test_build_locked() {
        let mut cache = CacheOptions::new()
            .concurrency_safe(true)
            .build::<String, i32>(3, Duration::hours(4))
            .unwrap();

        cache.set("k1".to_string(), 1).unwrap();
        assert_eq!(cache.get(&"k1".to_string()), Some(1));
        assert_eq!(cache.stats().total_entries, 1);
    }

    #[test]
    fn test_build_rejects_invalid_arguments() {
        let zero = CacheOptions::new().build::<String, i32>(0, Duration::hours(4));
        assert!(matches!(zero, Err(CacheError::InvalidCapacity)));

        let negative_ttl = CacheOptions::new()
            .concurrency_safe(true)
            .build::<String, i32>(1, Duration::hours(-4));
        assert!(matches!(negative_ttl, Err(CacheError::InvalidTtl)));
    }

    #[test]
    fn test_concurrency_safe_only_selects_variant() {
        let mut variants = [
            CacheOptions::new().build::<i64, i32>(2, Duration::hours(4)).unwrap(),
            CacheOptions::new()
                .concurrency_safe(true)
                .build::<i64, i32>(2, Duration::hours(4))
                .unwrap(),
        ];

        for cache in variants.iter_mut() {
            cache.set(1, 1).unwrap();
            cache.set(2, 2).unwrap();
            cache.set(3, 3).unwrap();
            assert_eq!(cache.get(&3), Some(3));
            assert_eq!(cache.stats().total_entries, 2);
            assert_eq!(cache.stats().evictions, 1);
        }
    }
}
