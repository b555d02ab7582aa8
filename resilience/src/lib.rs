//! Resilience layer for agent invocations.
//!
//! Wraps each `VerificationAgent` with a per-agent circuit breaker, a
//! bounded retry loop with randomized exponential backoff, and a
//! per-attempt timeout. The wrapper's contract is absorb-everything: no
//! failure mode escapes as an error, only as an error-kind result.

pub mod backoff;
pub mod breaker;
pub mod wrapper;

pub use backoff::backoff_delay;
pub use breaker::{BreakerConfig, BreakerMap, CircuitBreaker, CircuitState, Gate, Transition};
pub use wrapper::{ResilientAgent, RetryPolicy};
