//! Signed verification certificates.
//!
//! A certificate is a point-in-time attestation of a verified result. It is
//! write-once: issued exactly once per verified result, never re-signed or
//! mutated, and valid for a fixed window independent of any cache TTL.

use crate::error::CredenceError;
use crate::keys::Signature;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// A signed, time-bounded attestation record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    /// Shared with the VerificationResult it attests to.
    pub id: String,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
    /// Aggregate confidence at issuance.
    pub confidence: f64,
    /// Blake2b-256 digest (hex) of the canonical details JSON at issuance.
    pub details_digest: String,
    /// Ed25519 signature over the canonical payload bytes.
    pub signature: Signature,
}

impl Certificate {
    /// The canonical subset of fields covered by the signature.
    pub fn payload(&self) -> CertificatePayload<'_> {
        CertificatePayload {
            id: &self.id,
            issued_at: self.issued_at,
            expires_at: self.expires_at,
            confidence: self.confidence,
            details_digest: &self.details_digest,
        }
    }

    pub fn has_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

/// Canonical signable payload. Serialized as JSON with a fixed field order;
/// those exact bytes are what gets signed and verified.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CertificatePayload<'a> {
    pub id: &'a str,
    pub issued_at: Timestamp,
    pub expires_at: Timestamp,
    pub confidence: f64,
    pub details_digest: &'a str,
}

impl CertificatePayload<'_> {
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, CredenceError> {
        serde_json::to_vec(self).map_err(|e| CredenceError::Serialization(e.to_string()))
    }
}
