//! Health sweep across every configured agent.
//!
//! Probes run concurrently with a short per-probe timeout so one stuck
//! agency cannot stall the whole report. Circuit states come from the
//! orchestrator's breakers; an agent can probe healthy while its circuit is
//! still cooling down, and the report shows both.

use credence_agents::HealthStatus;
use credence_resilience::CircuitState;
use credence_verification::Orchestrator;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// Per-probe timeout used by the daemon's `/health` endpoint.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// One agent's view in the health report.
#[derive(Debug, Clone, Serialize)]
pub struct AgentHealth {
    /// Agent slug, e.g. `registry-on`.
    pub agent: String,
    /// Human-readable agency name.
    pub name: String,
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Circuit state: `closed`, `open`, or `half-open`.
    pub circuit: String,
}

/// Aggregate health of the service.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    /// True when every probe passed and every circuit is closed. An empty
    /// registry reports healthy; the service itself is up.
    pub healthy: bool,
    pub agents: Vec<AgentHealth>,
}

/// Probe every registered agent concurrently and merge in circuit states.
pub async fn check_health(orchestrator: &Orchestrator, probe_timeout: Duration) -> HealthReport {
    let circuits: HashMap<String, CircuitState> =
        orchestrator.breaker_states().into_iter().collect();

    let registry = orchestrator.registry();
    let probes = registry.ids().into_iter().filter_map(|id| {
        registry.get(id).map(|agent| async move {
            let status = match tokio::time::timeout(probe_timeout, agent.health_check()).await {
                Ok(status) => status,
                Err(_) => HealthStatus::unhealthy("health probe timed out"),
            };
            (id, status)
        })
    });

    let agents: Vec<AgentHealth> = futures_util::future::join_all(probes)
        .await
        .into_iter()
        .map(|(id, status)| {
            let slug = id.slug();
            let circuit = circuits
                .get(&slug)
                .copied()
                .unwrap_or(CircuitState::Closed);
            AgentHealth {
                agent: slug,
                name: id.display_name(),
                healthy: status.healthy,
                detail: status.detail,
                circuit: circuit.as_str().to_string(),
            }
        })
        .collect();

    let healthy = agents
        .iter()
        .all(|a| a.healthy && a.circuit == CircuitState::Closed.as_str());
    HealthReport { healthy, agents }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use credence_agents::{AgentError, AgentRegistry, VerificationAgent};
    use credence_nullables::NullAgent;
    use credence_store::{MemoryAuditSink, MemoryCacheStore, MemoryRateLimitStore, NoopMetrics};
    use credence_types::{
        AgentId, AgentResult, BusinessLocation, Jurisdiction, VerificationParams,
        VerificationRequest, VerifyOptions,
    };
    use std::sync::Arc;

    fn fast_params() -> VerificationParams {
        VerificationParams {
            overall_deadline_secs: 1,
            attempt_timeout_secs: 1,
            max_attempts: 1,
            backoff_base_ms: 1,
            backoff_cap_ms: 2,
            breaker_failure_threshold: 1,
            ..VerificationParams::defaults()
        }
    }

    fn orchestrator(agents: Vec<NullAgent>) -> Orchestrator {
        let mut registry = AgentRegistry::new();
        for agent in agents {
            registry.register(Arc::new(agent));
        }
        Orchestrator::new(
            registry,
            fast_params(),
            None,
            Arc::new(MemoryCacheStore::new()),
            Arc::new(MemoryRateLimitStore::new()),
            Arc::new(MemoryAuditSink::new()),
            Arc::new(NoopMetrics),
        )
        .unwrap()
    }

    fn request() -> VerificationRequest {
        VerificationRequest {
            business_name: "Health Check Co".to_string(),
            business_number: None,
            location: BusinessLocation {
                jurisdiction: Jurisdiction::ON,
                city: None,
            },
            workers: Vec::new(),
            indigenous_partnership: None,
            project: None,
            trade_qualifications: Vec::new(),
        }
    }

    #[tokio::test]
    async fn healthy_agents_and_closed_circuits_report_healthy() {
        let orchestrator = orchestrator(vec![
            NullAgent::healthy(AgentId::Cra, 0.95),
            NullAgent::healthy(AgentId::FraudDetection, 0.95),
        ]);

        let report = check_health(&orchestrator, DEFAULT_PROBE_TIMEOUT).await;

        assert!(report.healthy);
        assert_eq!(report.agents.len(), 2);
        for agent in &report.agents {
            assert!(agent.healthy);
            assert_eq!(agent.circuit, "closed");
        }
    }

    #[tokio::test]
    async fn failed_probe_degrades_the_report() {
        let orchestrator = orchestrator(vec![
            NullAgent::healthy(AgentId::Cra, 0.95),
            NullAgent::healthy(AgentId::SafetyCompliance, 0.95).probe_unhealthy(),
        ]);

        let report = check_health(&orchestrator, DEFAULT_PROBE_TIMEOUT).await;

        assert!(!report.healthy);
        let safety = report
            .agents
            .iter()
            .find(|a| a.agent == "safety-compliance")
            .unwrap();
        assert!(!safety.healthy);
        assert_eq!(safety.detail.as_deref(), Some("scripted unhealthy probe"));
    }

    struct SlowProbe;

    #[async_trait]
    impl VerificationAgent for SlowProbe {
        fn id(&self) -> AgentId {
            AgentId::Cra
        }

        async fn verify(&self, _request: &VerificationRequest) -> Result<AgentResult, AgentError> {
            Err(AgentError::Unavailable("not under test".to_string()))
        }

        async fn health_check(&self) -> HealthStatus {
            tokio::time::sleep(Duration::from_secs(60)).await;
            HealthStatus::healthy()
        }
    }

    #[tokio::test]
    async fn hung_probe_is_cut_by_the_probe_timeout() {
        let mut registry = AgentRegistry::new();
        registry.register(Arc::new(SlowProbe));
        let orchestrator = Orchestrator::new(
            registry,
            fast_params(),
            None,
            Arc::new(MemoryCacheStore::new()),
            Arc::new(MemoryRateLimitStore::new()),
            Arc::new(MemoryAuditSink::new()),
            Arc::new(NoopMetrics),
        )
        .unwrap();

        let report = check_health(&orchestrator, Duration::from_millis(50)).await;

        assert!(!report.healthy);
        assert_eq!(report.agents[0].detail.as_deref(), Some("health probe timed out"));
    }

    #[tokio::test]
    async fn open_circuit_degrades_the_report_even_with_healthy_probes() {
        // One failed invocation opens the circuit with the test threshold.
        let orchestrator = orchestrator(vec![
            NullAgent::healthy(AgentId::Cra, 0.95).fail_first(1),
        ]);
        orchestrator
            .verify(&request(), &VerifyOptions::default())
            .await
            .unwrap();

        let report = check_health(&orchestrator, DEFAULT_PROBE_TIMEOUT).await;

        assert!(!report.healthy);
        let cra = report.agents.iter().find(|a| a.agent == "cra").unwrap();
        assert!(cra.healthy, "the probe itself still passes");
        assert_eq!(cra.circuit, "open");
    }
}
