//! Metrics sink collaborator.
//!
//! Emission is fire-and-forget: implementations must not block or fail the
//! caller. The daemon wires this to a Prometheus registry; tests use the
//! recording sink from `credence-nullables`.

/// Receiver for operational measurements.
pub trait MetricsSink: Send + Sync {
    /// A `verify` call finished. `outcome` is one of `verified`,
    /// `unverified`, `cache-hit`, `validation-failed`, `rate-limited`,
    /// `timed-out`.
    fn verify_completed(&self, outcome: &str, seconds: f64);

    /// One agent invocation settled. `outcome` is `ok`, `error`, or
    /// `short-circuit`.
    fn agent_outcome(&self, agent: &str, outcome: &str);

    /// A circuit breaker changed state. `to_state` is the state entered.
    fn breaker_transition(&self, agent: &str, to_state: &str);

    /// Cache traffic: `hit`, `miss`, `write`, or `bypass`.
    fn cache_event(&self, event: &str);

    /// A caller was rejected by the rate limiter.
    fn rate_limited(&self, tier: &str);
}

/// Sink that drops every measurement. Useful as a default.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn verify_completed(&self, _outcome: &str, _seconds: f64) {}
    fn agent_outcome(&self, _agent: &str, _outcome: &str) {}
    fn breaker_transition(&self, _agent: &str, _to_state: &str) {}
    fn cache_event(&self, _event: &str) {}
    fn rate_limited(&self, _tier: &str) {}
}
