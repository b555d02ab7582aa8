//! Audit sink that writes to the structured log stream.
//!
//! Single-node deployments get their audit trail through the same pipeline
//! as operational logs, under the dedicated `credence::audit` target so log
//! aggregation can route it separately. Larger deployments swap in an
//! external [`AuditSink`] implementation instead.

use async_trait::async_trait;
use credence_store::{AuditSink, StoreError};
use tracing::info;

/// Emits each audit event as one structured log line.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn log(&self, event: &str, fields: serde_json::Value) -> Result<(), StoreError> {
        info!(target: "credence::audit", event, %fields, "audit");
        Ok(())
    }
}
