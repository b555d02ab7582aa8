//! Prometheus metrics for the Credence service.
//!
//! Implements the [`MetricsSink`] collaborator over a dedicated
//! [`Registry`] that the HTTP `/metrics` endpoint encodes into the
//! Prometheus text exposition format. Label values come from the sink
//! caller: verification outcomes, agent slugs, breaker states, cache
//! events, and rate-limit tiers.

use credence_store::MetricsSink;
use prometheus::{
    register_histogram_with_registry, register_int_counter_vec_with_registry,
    register_int_gauge_vec_with_registry, Encoder, Histogram, HistogramOpts, IntCounterVec,
    IntGaugeVec, Opts, Registry, TextEncoder,
};

/// Central collection of all service-level Prometheus metrics.
pub struct ServiceMetrics {
    /// The Prometheus registry that owns every metric below.
    pub registry: Registry,

    // ── Counters ────────────────────────────────────────────────────────
    /// Completed `verify` calls, labelled by outcome.
    verifications: IntCounterVec,
    /// Settled agent invocations, labelled by agent slug and outcome.
    agent_outcomes: IntCounterVec,
    /// Circuit-breaker state changes, labelled by agent slug and new state.
    breaker_transitions: IntCounterVec,
    /// Cache traffic, labelled by event.
    cache_events: IntCounterVec,
    /// Rate-limiter rejections, labelled by tier.
    rate_limited: IntCounterVec,

    // ── Gauges ──────────────────────────────────────────────────────────
    /// 1 while an agent's circuit is open or half-open, 0 when closed.
    circuit_open: IntGaugeVec,

    // ── Histograms ──────────────────────────────────────────────────────
    /// End-to-end `verify` call duration in seconds.
    verify_duration: Histogram,
}

impl ServiceMetrics {
    /// Create a fresh set of metrics, all registered under a new
    /// [`Registry`].
    pub fn new() -> Self {
        let registry = Registry::new();

        let verifications = register_int_counter_vec_with_registry!(
            Opts::new(
                "credence_verifications_total",
                "Completed verification calls by outcome"
            ),
            &["outcome"],
            registry
        )
        .expect("failed to register verifications counter");

        let agent_outcomes = register_int_counter_vec_with_registry!(
            Opts::new(
                "credence_agent_outcomes_total",
                "Settled agent invocations by agent and outcome"
            ),
            &["agent", "outcome"],
            registry
        )
        .expect("failed to register agent_outcomes counter");

        let breaker_transitions = register_int_counter_vec_with_registry!(
            Opts::new(
                "credence_breaker_transitions_total",
                "Circuit breaker state changes by agent and new state"
            ),
            &["agent", "state"],
            registry
        )
        .expect("failed to register breaker_transitions counter");

        let cache_events = register_int_counter_vec_with_registry!(
            Opts::new("credence_cache_events_total", "Result cache traffic by event"),
            &["event"],
            registry
        )
        .expect("failed to register cache_events counter");

        let rate_limited = register_int_counter_vec_with_registry!(
            Opts::new(
                "credence_rate_limited_total",
                "Requests rejected by the rate limiter, by tier"
            ),
            &["tier"],
            registry
        )
        .expect("failed to register rate_limited counter");

        let circuit_open = register_int_gauge_vec_with_registry!(
            Opts::new(
                "credence_circuit_open",
                "1 while the agent's circuit is open or half-open"
            ),
            &["agent"],
            registry
        )
        .expect("failed to register circuit_open gauge");

        // Buckets cover 10 ms → ~164 s; the overall fan-out deadline
        // defaults to 120 s.
        let verify_duration = register_histogram_with_registry!(
            HistogramOpts::new(
                "credence_verify_duration_seconds",
                "End-to-end verification call duration in seconds"
            )
            .buckets(prometheus::exponential_buckets(0.01, 2.0, 15).unwrap()),
            registry
        )
        .expect("failed to register verify_duration histogram");

        Self {
            registry,
            verifications,
            agent_outcomes,
            breaker_transitions,
            cache_events,
            rate_limited,
            circuit_open,
            verify_duration,
        }
    }

    /// Encode every registered metric into the Prometheus text format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsSink for ServiceMetrics {
    fn verify_completed(&self, outcome: &str, seconds: f64) {
        self.verifications.with_label_values(&[outcome]).inc();
        self.verify_duration.observe(seconds);
    }

    fn agent_outcome(&self, agent: &str, outcome: &str) {
        self.agent_outcomes.with_label_values(&[agent, outcome]).inc();
    }

    fn breaker_transition(&self, agent: &str, to_state: &str) {
        self.breaker_transitions
            .with_label_values(&[agent, to_state])
            .inc();
        let open = match to_state {
            "closed" => 0,
            _ => 1,
        };
        self.circuit_open.with_label_values(&[agent]).set(open);
    }

    fn cache_event(&self, event: &str) {
        self.cache_events.with_label_values(&[event]).inc();
    }

    fn rate_limited(&self, tier: &str) {
        self.rate_limited.with_label_values(&[tier]).inc();
    }
}
