//! Clock Module
//!
//! Wall-clock source used to stamp and expire entries. Injectable so tests can
//! drive time by hand.

use std::fmt::Debug;
#[cfg(test)]
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Utc};
#[cfg(test)]
use chrono::Duration;

/// Source of the current time for a cache.
pub trait Clock: Debug + Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

// == System Clock ==
/// Process wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// == Manual Clock ==
/// A clock that only moves when told to. Test builds only.
///
/// Clones share the same instant, so a test can keep one handle and hand the
/// other to the cache.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

#[cfg(test)]
impl ManualClock {
    /// Creates a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Moves the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }

    /// Jumps the clock to `instant`.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = instant;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_manual_clock_advance_is_shared() {
        let start = Utc.with_ymd_and_hms(2022, 10, 25, 13, 50, 0).unwrap();
        let clock = ManualClock::new(start);
        let handle = clock.clone();

        handle.advance(Duration::minutes(3));

        assert_eq!(clock.now(), start + Duration::minutes(3));
    }

    #[test]
    fn test_manual_clock_set() {
        let start = Utc.with_ymd_and_hms(2022, 10, 25, 13, 50, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2022, 10, 26, 0, 0, 0).unwrap();
        let clock = ManualClock::new(start);

        clock.set(later);

        assert_eq!(clock.now(), later);
    }

    #[test]
    fn test_system_clock_moves_forward() {
        let clock = SystemClock;
        let first = clock.now();
        assert!(clock.now() >= first);
    }
}
