//! The agent capability trait.

use async_trait::async_trait;
use credence_types::{AgentId, AgentResult, VerificationRequest};
use thiserror::Error;

/// Failure of a single agent invocation, before the resilience wrapper
/// absorbs it into an error-kind result.
#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent unavailable: {0}")]
    Unavailable(String),

    #[error("agent returned status {status}")]
    Status { status: u16 },

    #[error("malformed agent response: {0}")]
    MalformedResponse(String),
}

/// Outcome of a health probe.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HealthStatus {
    pub healthy: bool,
    pub detail: Option<String>,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self {
            healthy: true,
            detail: None,
        }
    }

    pub fn unhealthy(detail: impl Into<String>) -> Self {
        Self {
            healthy: false,
            detail: Some(detail.into()),
        }
    }
}

/// One verification source. Implementations check a single jurisdiction
/// registry or specialist concern.
#[async_trait]
pub trait VerificationAgent: Send + Sync {
    /// Stable identity; determines the agency name on results and the
    /// breaker/metrics keys.
    fn id(&self) -> AgentId;

    /// Run the check. Implementations return their own partial result or an
    /// error; they never time themselves out — the resilience wrapper owns
    /// timeouts and retries.
    async fn verify(&self, request: &VerificationRequest) -> Result<AgentResult, AgentError>;

    /// Lightweight liveness probe, independent of any request.
    async fn health_check(&self) -> HealthStatus;
}
