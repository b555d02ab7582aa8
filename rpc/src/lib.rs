//! HTTP API for the Credence verification service.
//!
//! Three endpoints:
//! - `POST /verify` — run a verification, returning the synthesized result
//! - `GET /health` — per-agent probe results and circuit states
//! - `GET /metrics` — Prometheus text exposition
//!
//! Verification failures map onto HTTP statuses (400 validation, 429 rate
//! limit with `Retry-After`, 504 total timeout); degraded results are still
//! 200s, with the degradation visible in the body.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::RpcError;
pub use server::{router, AppState, RpcServer};
