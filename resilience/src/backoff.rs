//! Randomized exponential backoff between retry attempts.

use rand::Rng;
use std::time::Duration;

/// Delay before retrying after `attempt` failed attempts (1-based).
///
/// The exponential ceiling doubles per attempt from `base_ms` up to
/// `cap_ms`; the actual delay is drawn uniformly from the upper half of
/// that ceiling so concurrent retries spread out instead of thundering.
pub fn backoff_delay(attempt: u32, base_ms: u64, cap_ms: u64) -> Duration {
    let ceiling = exponential_ceiling(attempt, base_ms, cap_ms);
    if ceiling == 0 {
        return Duration::ZERO;
    }
    let floor = ceiling / 2;
    let ms = rand::thread_rng().gen_range(floor..=ceiling);
    Duration::from_millis(ms)
}

fn exponential_ceiling(attempt: u32, base_ms: u64, cap_ms: u64) -> u64 {
    let shift = attempt.saturating_sub(1).min(32);
    base_ms.saturating_mul(1u64 << shift).min(cap_ms)
}
