//! Abstract collaborators for the Credence verification service.
//!
//! Every external collaborator (Redis-style cache, rate-limit counters,
//! certificate archive, audit ledger, metrics receiver) implements these
//! traits. The rest of the codebase depends only on the traits; the bundled
//! in-memory backends serve single-node deployments and tests.

pub mod audit;
pub mod cache;
pub mod certificate;
pub mod error;
pub mod memory;
pub mod metrics;
pub mod rate;

pub use audit::AuditSink;
pub use cache::CacheStore;
pub use certificate::{CertificateStore, StoredCertificate};
pub use error::StoreError;
pub use memory::{MemoryAuditSink, MemoryCacheStore, MemoryCertificateStore, MemoryRateLimitStore};
pub use metrics::{MetricsSink, NoopMetrics};
pub use rate::{RateLimitStore, WindowCount};
