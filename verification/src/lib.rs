//! The verification pipeline for the Credence service.
//!
//! Everything between a raw caller request and a synthesized
//! `VerificationResult` lives here: validation and sanitization, two-tier
//! rate limiting, the result cache with risk-adjusted TTLs, concurrent
//! agent fan-out under one deadline, weighted confidence synthesis with the
//! fraud veto, and ed25519 certificate issuance for verified results. The
//! [`Orchestrator`] ties the phases together.

pub mod cache;
pub mod certificate;
pub mod error;
pub mod executor;
pub mod limits;
pub mod orchestrator;
pub mod synthesis;
pub mod validate;

pub use cache::{cache_key, risk_adjusted_ttl, ResultCache};
pub use certificate::{details_digest, CertificateIssuer};
pub use error::VerifyError;
pub use executor::run_fan_out;
pub use limits::{RateLimiter, ANONYMOUS_CALLER};
pub use orchestrator::Orchestrator;
pub use synthesis::{synthesize, Synthesis};
pub use validate::sanitize_request;
