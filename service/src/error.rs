//! Service-level error type.

use credence_types::CredenceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("signing key error: {0}")]
    SigningKey(String),

    #[error("invalid parameters: {0}")]
    Params(#[from] CredenceError),
}
