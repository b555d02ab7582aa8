//! HTTP error mapping.
//!
//! The orchestrator's three failure classes map onto status codes:
//! validation → 400, rate limit → 429 (with `Retry-After`), total
//! timeout → 504. Everything else the pipeline absorbs into a degraded
//! 200 response.

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use credence_verification::VerifyError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("rate limit exceeded for {caller}: retry after {retry_after_secs}s")]
    RateLimited { caller: String, retry_after_secs: u64 },

    #[error("verification deadline of {deadline_secs}s exceeded with no agent results")]
    DeadlineExceeded { deadline_secs: u64 },

    #[error("metrics encoding failed: {0}")]
    Metrics(String),

    #[error("server error: {0}")]
    Server(String),
}

impl From<VerifyError> for RpcError {
    fn from(e: VerifyError) -> Self {
        match e {
            VerifyError::Validation { field, reason } => RpcError::Validation { field, reason },
            VerifyError::RateLimited {
                caller,
                retry_after_secs,
            } => RpcError::RateLimited {
                caller,
                retry_after_secs,
            },
            VerifyError::DeadlineExceeded { deadline_secs } => {
                RpcError::DeadlineExceeded { deadline_secs }
            }
        }
    }
}

impl RpcError {
    fn status(&self) -> StatusCode {
        match self {
            RpcError::Validation { .. } => StatusCode::BAD_REQUEST,
            RpcError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            RpcError::DeadlineExceeded { .. } => StatusCode::GATEWAY_TIMEOUT,
            RpcError::Metrics(_) | RpcError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        let mut response = (status, body).into_response();
        if let RpcError::RateLimited {
            retry_after_secs, ..
        } = self
        {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(retry_after_secs));
        }
        response
    }
}
