//! Timestamp type used throughout the service.
//!
//! Timestamps are Unix epoch seconds (UTC). They drive certificate validity
//! windows, cache expiry, rate-limit windows, and circuit-breaker cooldowns.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the current system time as a `Timestamp`.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before Unix epoch")
            .as_secs();
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// This timestamp advanced by `secs`, saturating at the maximum.
    pub fn add_secs(&self, secs: u64) -> Timestamp {
        Self(self.0.saturating_add(secs))
    }

    /// Seconds elapsed since this timestamp (relative to `now`).
    pub fn elapsed_since(&self, now: Timestamp) -> u64 {
        now.0.saturating_sub(self.0)
    }

    /// Whether this timestamp + duration has passed relative to `now`.
    pub fn has_expired(&self, duration_secs: u64, now: Timestamp) -> bool {
        now.0 >= self.0.saturating_add(duration_secs)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_secs_saturates() {
        assert_eq!(Timestamp::new(10).add_secs(5).as_secs(), 15);
        assert_eq!(Timestamp::new(u64::MAX).add_secs(1).as_secs(), u64::MAX);
    }

    #[test]
    fn expiry_window() {
        let issued = Timestamp::new(1000);
        assert!(!issued.has_expired(60, Timestamp::new(1059)));
        assert!(issued.has_expired(60, Timestamp::new(1060)));
    }

    #[test]
    fn elapsed_never_underflows() {
        let later = Timestamp::new(500);
        assert_eq!(later.elapsed_since(Timestamp::new(100)), 0);
        assert_eq!(Timestamp::new(100).elapsed_since(later), 400);
    }
}
