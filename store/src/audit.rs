//! Append-only audit sink trait.

use crate::StoreError;
use async_trait::async_trait;

/// Append-only audit trail. Called at verification start and completion.
///
/// Sink failures must never fail verification; callers log and continue.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Append one event with structured fields.
    async fn log(&self, event: &str, fields: serde_json::Value) -> Result<(), StoreError>;
}
