//! Concurrent fan-out under one overall deadline.
//!
//! Each agent runs as its own task; the deadline is absolute and shared, so
//! collection order does not extend it. Tasks still running at the deadline
//! are aborted and scored as error results, while tasks that already
//! finished keep their results even when collected after the deadline.

use credence_resilience::ResilientAgent;
use credence_types::{AgentResult, VerificationRequest};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Invoke every agent concurrently and collect one result per agent, in
/// input order.
pub async fn run_fan_out(
    agents: &[Arc<ResilientAgent>],
    request: &Arc<VerificationRequest>,
    overall_deadline: Duration,
) -> Vec<AgentResult> {
    let deadline_at = tokio::time::Instant::now() + overall_deadline;

    let mut handles = Vec::with_capacity(agents.len());
    for agent in agents {
        let agent = Arc::clone(agent);
        let request = Arc::clone(request);
        let id = agent.id();
        handles.push((
            id,
            tokio::spawn(async move { agent.invoke(&request).await }),
        ));
    }

    let mut results = Vec::with_capacity(handles.len());
    for (id, handle) in handles {
        let abort = handle.abort_handle();
        match tokio::time::timeout_at(deadline_at, handle).await {
            Ok(Ok(result)) => results.push(result),
            Ok(Err(join_error)) => {
                warn!(agent = %id, error = %join_error, "agent task failed");
                results.push(AgentResult::error(
                    id.display_name(),
                    format!("agent task failed: {join_error}"),
                ));
            }
            Err(_) => {
                abort.abort();
                debug!(agent = %id, "agent cancelled at overall deadline");
                results.push(AgentResult::error(
                    id.display_name(),
                    format!(
                        "overall deadline of {}s exceeded",
                        overall_deadline.as_secs()
                    ),
                ));
            }
        }
    }
    results
}
