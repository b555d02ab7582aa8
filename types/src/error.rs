//! Top-level error type shared across crates.

use thiserror::Error;

/// Common error type for Credence domain types.
#[derive(Debug, Error)]
pub enum CredenceError {
    #[error("unknown jurisdiction code: {0}")]
    InvalidJurisdiction(String),

    #[error("invalid business number: {reason}")]
    InvalidBusinessNumber { reason: String },

    #[error("invalid agent result: {reason}")]
    InvalidResult { reason: String },

    #[error("invalid parameters: {reason}")]
    InvalidParams { reason: String },

    #[error("invalid signature")]
    InvalidSignature,

    #[error("serialization error: {0}")]
    Serialization(String),
}
