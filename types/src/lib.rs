//! Fundamental types for the Credence verification service.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: jurisdictions, agent identities, verification requests and
//! results, certificates, signing keys, timestamps, and the calibration
//! parameter set.

pub mod agent;
pub mod certificate;
pub mod error;
pub mod jurisdiction;
pub mod keys;
pub mod params;
pub mod request;
pub mod result;
pub mod time;

pub use agent::AgentId;
pub use certificate::{Certificate, CertificatePayload};
pub use error::CredenceError;
pub use jurisdiction::Jurisdiction;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use params::{KindWeights, VerificationParams};
pub use request::{
    BusinessLocation, Certification, IndigenousPartnership, ProjectDetails, Urgency,
    VerificationRequest, VerifyOptions, Worker,
};
pub use result::{AgentResult, ResultDetail, ResultKind, VerificationResult};
pub use time::Timestamp;
