//! Resilient agent invocation: breaker gate, bounded retries, per-attempt
//! timeout.
//!
//! `invoke` never fails. Every outcome, including circuit short-circuits and
//! exhausted retries, becomes a value-typed `AgentResult`; error results
//! carry confidence 0 and the last error's message. This is what lets the
//! executor treat all agents uniformly.

use crate::backoff::backoff_delay;
use crate::breaker::{CircuitBreaker, Gate, Transition};
use credence_agents::VerificationAgent;
use credence_store::MetricsSink;
use credence_types::{AgentId, AgentResult, VerificationParams, VerificationRequest};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Retry budget for one agent invocation.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub attempt_timeout: Duration,
    pub backoff_base_ms: u64,
    pub backoff_cap_ms: u64,
}

impl RetryPolicy {
    pub fn from_params(params: &VerificationParams) -> Self {
        Self {
            max_attempts: params.max_attempts,
            attempt_timeout: Duration::from_secs(params.attempt_timeout_secs),
            backoff_base_ms: params.backoff_base_ms,
            backoff_cap_ms: params.backoff_cap_ms,
        }
    }
}

/// One agent wrapped with its circuit breaker and retry policy.
pub struct ResilientAgent {
    agent: Arc<dyn VerificationAgent>,
    breaker: Arc<CircuitBreaker>,
    policy: RetryPolicy,
    metrics: Arc<dyn MetricsSink>,
}

impl ResilientAgent {
    pub fn new(
        agent: Arc<dyn VerificationAgent>,
        breaker: Arc<CircuitBreaker>,
        policy: RetryPolicy,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            agent,
            breaker,
            policy,
            metrics,
        }
    }

    pub fn id(&self) -> AgentId {
        self.agent.id()
    }

    /// Invoke the agent under the full resilience policy.
    ///
    /// Order of application: breaker gate, then up to `max_attempts` calls
    /// each bounded by `attempt_timeout`, with randomized exponential
    /// backoff between attempts. The breaker hears one verdict per
    /// invocation, not one per attempt.
    pub async fn invoke(&self, request: &VerificationRequest) -> AgentResult {
        let id = self.agent.id();
        let slug = id.slug();
        let display = id.display_name();

        match self.breaker.check() {
            Gate::Deny(state) => {
                debug!(agent = %slug, state = state.as_str(), "short-circuiting agent call");
                self.metrics.agent_outcome(&slug, "short-circuit");
                return AgentResult::error(
                    display.clone(),
                    format!("{display} unavailable: circuit {}", state.as_str()),
                );
            }
            Gate::Allow(transition) => {
                if let Some(t) = transition {
                    self.note_transition(&slug, t);
                }
            }
        }

        let max_attempts = self.policy.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            match tokio::time::timeout(self.policy.attempt_timeout, self.agent.verify(request))
                .await
            {
                Ok(Ok(mut result)) => {
                    result.agent = display;
                    if let Some(t) = self.breaker.record_success() {
                        self.note_transition(&slug, t);
                    }
                    self.metrics.agent_outcome(&slug, "ok");
                    return result;
                }
                Ok(Err(e)) => {
                    last_error = e.to_string();
                    debug!(agent = %slug, attempt, error = %last_error, "agent attempt failed");
                }
                Err(_) => {
                    last_error = format!(
                        "attempt timed out after {}s",
                        self.policy.attempt_timeout.as_secs()
                    );
                    debug!(agent = %slug, attempt, "agent attempt timed out");
                }
            }
            if attempt < max_attempts {
                tokio::time::sleep(backoff_delay(
                    attempt,
                    self.policy.backoff_base_ms,
                    self.policy.backoff_cap_ms,
                ))
                .await;
            }
        }

        if let Some(t) = self.breaker.record_failure() {
            self.note_transition(&slug, t);
        }
        self.metrics.agent_outcome(&slug, "error");
        warn!(agent = %slug, error = %last_error, "agent failed after {max_attempts} attempts");
        AgentResult::error(display, last_error)
    }

    fn note_transition(&self, slug: &str, transition: Transition) {
        let state = transition.state().as_str();
        match transition {
            Transition::Opened => warn!(agent = %slug, "circuit opened"),
            Transition::HalfOpened => info!(agent = %slug, "circuit half-open, trial call admitted"),
            Transition::Closed => info!(agent = %slug, "circuit closed after successful trial"),
        }
        self.metrics.breaker_transition(slug, state);
    }
}
