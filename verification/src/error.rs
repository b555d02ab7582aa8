//! The three error kinds that cross the orchestrator boundary.
//!
//! Everything else degrades: agent failures become error results, store
//! failures are logged and absorbed. Callers see either one of these errors
//! (fast, before fan-out) or a complete `VerificationResult`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerifyError {
    /// The request failed validation; never retried.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// The caller exhausted its tier budget; carries a retry hint.
    #[error("rate limit exceeded for {caller}: retry after {retry_after_secs}s")]
    RateLimited {
        caller: String,
        retry_after_secs: u64,
    },

    /// The overall deadline passed with zero usable agent results. If even
    /// one agent completed, the call succeeds with reduced confidence
    /// instead of returning this.
    #[error("verification deadline of {deadline_secs}s exceeded with no agent results")]
    DeadlineExceeded { deadline_secs: u64 },
}

impl VerifyError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        VerifyError::Validation {
            field,
            reason: reason.into(),
        }
    }
}
