//! Request handlers for the three endpoints.

use crate::error::RpcError;
use crate::server::AppState;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Json;
use credence_service::{check_health, HealthReport, DEFAULT_PROBE_TIMEOUT};
use credence_types::{VerificationRequest, VerificationResult, VerifyOptions};
use serde::Deserialize;

/// Body of `POST /verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyBody {
    pub request: VerificationRequest,
    #[serde(default)]
    pub options: VerifyOptions,
}

/// `POST /verify` — run one verification.
pub async fn verify(
    State(state): State<AppState>,
    Json(body): Json<VerifyBody>,
) -> Result<Json<VerificationResult>, RpcError> {
    let result = state
        .orchestrator
        .verify(&body.request, &body.options)
        .await?;
    Ok(Json(result))
}

/// `GET /health` — probe every agent and report circuit states.
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    Json(check_health(&state.orchestrator, DEFAULT_PROBE_TIMEOUT).await)
}

/// `GET /metrics` — Prometheus text exposition.
pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, RpcError> {
    let text = state
        .metrics
        .encode()
        .map_err(|e| RpcError::Metrics(e.to_string()))?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        text,
    ))
}
