//! Nullable verification agent — scriptable behavior for testing.
//!
//! Covers the behaviors the resilience and orchestration layers must absorb:
//! clean success, hard failure, failure for the first N calls, a response
//! delay, and hanging forever (until the caller's timeout fires).

use async_trait::async_trait;
use credence_agents::{AgentError, HealthStatus, VerificationAgent};
use credence_types::{AgentId, AgentResult, ResultDetail, ResultKind, VerificationRequest};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Shared handle counting how often an agent was actually reached.
///
/// Clones share the same counters, so tests can keep a handle after moving
/// the agent into a wrapper or registry.
#[derive(Clone, Default)]
pub struct CallCounter {
    verify: Arc<AtomicUsize>,
    health: Arc<AtomicUsize>,
}

impl CallCounter {
    pub fn verify_calls(&self) -> usize {
        self.verify.load(Ordering::SeqCst)
    }

    pub fn health_calls(&self) -> usize {
        self.health.load(Ordering::SeqCst)
    }
}

enum Script {
    Respond(AgentResult),
    Fail(String),
    Hang,
}

/// A scriptable in-memory agent.
pub struct NullAgent {
    id: AgentId,
    script: Script,
    remaining_failures: AtomicUsize,
    delay: Option<Duration>,
    probe_healthy: bool,
    counter: CallCounter,
}

impl NullAgent {
    /// An agent that always succeeds with the given confidence and a
    /// plausible payload for its kind.
    pub fn healthy(id: AgentId, confidence: f64) -> Self {
        let detail = detail_for(id.expected_kind());
        Self::with_result(id, AgentResult::new(id.display_name(), confidence, detail))
    }

    /// An agent that always returns exactly this result.
    pub fn with_result(id: AgentId, result: AgentResult) -> Self {
        Self {
            id,
            script: Script::Respond(result),
            remaining_failures: AtomicUsize::new(0),
            delay: None,
            probe_healthy: true,
            counter: CallCounter::default(),
        }
    }

    /// An agent that always fails with the given message.
    pub fn failing(id: AgentId, message: impl Into<String>) -> Self {
        Self {
            id,
            script: Script::Fail(message.into()),
            remaining_failures: AtomicUsize::new(0),
            delay: None,
            probe_healthy: false,
            counter: CallCounter::default(),
        }
    }

    /// An agent that never responds. Callers must time it out.
    pub fn hanging(id: AgentId) -> Self {
        Self {
            id,
            script: Script::Hang,
            remaining_failures: AtomicUsize::new(0),
            delay: None,
            probe_healthy: true,
            counter: CallCounter::default(),
        }
    }

    /// Fail the first `n` calls before following the script.
    pub fn fail_first(self, n: usize) -> Self {
        self.remaining_failures.store(n, Ordering::SeqCst);
        self
    }

    /// Delay every response by `delay`.
    pub fn with_delay(self, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..self
        }
    }

    /// Make the health probe report unhealthy.
    pub fn probe_unhealthy(self) -> Self {
        Self {
            probe_healthy: false,
            ..self
        }
    }

    /// Handle onto this agent's call counters.
    pub fn calls(&self) -> CallCounter {
        self.counter.clone()
    }
}

fn detail_for(kind: ResultKind) -> ResultDetail {
    match kind {
        ResultKind::Business => ResultDetail::Business {
            status: Some("active".to_string()),
            in_good_standing: Some(true),
        },
        ResultKind::Worker => ResultDetail::Worker {
            workers_checked: 1,
            certifications_valid: 1,
            certifications_expired: 0,
        },
        ResultKind::Trade => ResultDetail::Trade {
            trades_recognized: vec!["Electrician".to_string()],
            red_seal_holders: 1,
        },
        ResultKind::Safety => ResultDetail::Safety {
            coverage_active: Some(true),
            clearance_number: Some("WCB-000123".to_string()),
        },
        ResultKind::Indigenous => ResultDetail::Indigenous {
            certified: Some(true),
            certifying_body: Some("Canadian Council for Indigenous Business".to_string()),
        },
        ResultKind::Fraud => ResultDetail::Fraud {
            risk_score: 0.05,
            flags: Vec::new(),
        },
        ResultKind::CrossJurisdictionCompliance => ResultDetail::CrossJurisdictionCompliance {
            compliant: Some(true),
            jurisdictions: Vec::new(),
        },
        ResultKind::Error => ResultDetail::Error {
            message: "scripted error".to_string(),
        },
    }
}

#[async_trait]
impl VerificationAgent for NullAgent {
    fn id(&self) -> AgentId {
        self.id
    }

    async fn verify(&self, _request: &VerificationRequest) -> Result<AgentResult, AgentError> {
        self.counter.verify.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let remaining = self.remaining_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.remaining_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(AgentError::Unavailable("scripted transient failure".to_string()));
        }

        match &self.script {
            Script::Respond(result) => Ok(result.clone()),
            Script::Fail(message) => Err(AgentError::Unavailable(message.clone())),
            Script::Hang => {
                tokio::time::sleep(Duration::from_secs(3_600)).await;
                Err(AgentError::Unavailable("hang elapsed".to_string()))
            }
        }
    }

    async fn health_check(&self) -> HealthStatus {
        self.counter.health.fetch_add(1, Ordering::SeqCst);
        if self.probe_healthy {
            HealthStatus::healthy()
        } else {
            HealthStatus::unhealthy("scripted unhealthy probe")
        }
    }
}
