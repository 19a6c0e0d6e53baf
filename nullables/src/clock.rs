//! Nullable clock: deterministic time for testing.

use chrono::{DateTime, Utc};
use custody_types::{Clock, Timestamp};
use std::sync::atomic::{AtomicI64, Ordering};

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: AtomicI64,
}

impl NullClock {
    /// Start at `initial_secs` seconds after the Unix epoch.
    pub fn new(initial_secs: i64) -> Self {
        Self {
            current: AtomicI64::new(initial_secs),
        }
    }

    /// Advance time by a number of seconds.
    pub fn advance(&self, secs: i64) {
        self.current.fetch_add(secs, Ordering::SeqCst);
    }

    /// Set the time to a specific value.
    pub fn set(&self, secs: i64) {
        self.current.store(secs, Ordering::SeqCst);
    }
}

impl Default for NullClock {
    /// 2024-01-01T00:00:00Z.
    fn default() -> Self {
        Self::new(1_704_067_200)
    }
}

impl Clock for NullClock {
    fn now(&self) -> Timestamp {
        DateTime::<Utc>::from_timestamp(self.current.load(Ordering::SeqCst), 0)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_only_moves_when_told() {
        let clock = NullClock::new(100);
        let first = clock.now();
        assert_eq!(clock.now(), first);
        clock.advance(5);
        assert_eq!(clock.now().timestamp(), 105);
        clock.set(0);
        assert_eq!(clock.now(), DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn test_default_is_2024() {
        assert_eq!(NullClock::default().now().to_rfc3339(), "2024-01-01T00:00:00+00:00");
    }
}
