//! Recording metrics sink — captures emissions for assertions.

use credence_store::MetricsSink;
use std::sync::Mutex;

/// A `MetricsSink` that records every emission in memory.
#[derive(Default)]
pub struct RecordingMetrics {
    verify: Mutex<Vec<(String, f64)>>,
    agents: Mutex<Vec<(String, String)>>,
    breakers: Mutex<Vec<(String, String)>>,
    cache: Mutex<Vec<String>>,
    rate: Mutex<Vec<String>>,
}

impl RecordingMetrics {
    /// `(outcome, seconds)` pairs, in emission order.
    pub fn verify_completions(&self) -> Vec<(String, f64)> {
        self.verify.lock().unwrap().clone()
    }

    /// `(agent slug, outcome)` pairs, in emission order.
    pub fn agent_outcomes(&self) -> Vec<(String, String)> {
        self.agents.lock().unwrap().clone()
    }

    /// `(agent slug, state entered)` pairs, in emission order.
    pub fn breaker_transitions(&self) -> Vec<(String, String)> {
        self.breakers.lock().unwrap().clone()
    }

    pub fn cache_events(&self) -> Vec<String> {
        self.cache.lock().unwrap().clone()
    }

    pub fn rate_limited_tiers(&self) -> Vec<String> {
        self.rate.lock().unwrap().clone()
    }
}

impl MetricsSink for RecordingMetrics {
    fn verify_completed(&self, outcome: &str, seconds: f64) {
        self.verify.lock().unwrap().push((outcome.to_string(), seconds));
    }

    fn agent_outcome(&self, agent: &str, outcome: &str) {
        self.agents
            .lock()
            .unwrap()
            .push((agent.to_string(), outcome.to_string()));
    }

    fn breaker_transition(&self, agent: &str, to_state: &str) {
        self.breakers
            .lock()
            .unwrap()
            .push((agent.to_string(), to_state.to_string()));
    }

    fn cache_event(&self, event: &str) {
        self.cache.lock().unwrap().push(event.to_string());
    }

    fn rate_limited(&self, tier: &str) {
        self.rate.lock().unwrap().push(tier.to_string());
    }
}
