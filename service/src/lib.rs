//! Service composition for Credence.
//!
//! Turns a [`ServiceConfig`] into a wired
//! [`Orchestrator`](credence_verification::Orchestrator) plus its ambient
//! concerns: structured logging, Prometheus metrics, the audit trail, agent
//! endpoints, health probing, and graceful shutdown.

pub mod audit;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod service;
pub mod shutdown;

pub use audit::TracingAuditSink;
pub use config::ServiceConfig;
pub use error::ServiceError;
pub use health::{check_health, AgentHealth, HealthReport, DEFAULT_PROBE_TIMEOUT};
pub use logging::{init_logging, LogFormat};
pub use metrics::ServiceMetrics;
pub use service::{write_signing_key, Service};
pub use shutdown::ShutdownController;
