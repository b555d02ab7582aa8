//! Rate-limit counter storage trait.

use crate::StoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outcome of one atomic window increment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowCount {
    /// Calls recorded in the current window, including this one.
    pub count: u64,
    /// Seconds until the current window resets.
    pub resets_in_secs: u64,
}

/// Atomic increment-and-compare counters keyed by caller+tier.
///
/// The increment and the window bookkeeping must be one atomic operation so
/// concurrent calls against the same key cannot both sneak under a budget.
#[async_trait]
pub trait RateLimitStore: Send + Sync {
    /// Record one call against `key` inside a fixed window of `window_secs`,
    /// returning the updated count and time to reset.
    async fn incr(&self, key: &str, window_secs: u64) -> Result<WindowCount, StoreError>;
}
