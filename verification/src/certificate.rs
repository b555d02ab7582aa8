//! Certificate issuance for verified results.
//!
//! A certificate is a point-in-time attestation: signed once, valid for a
//! fixed window independent of any cache TTL, never re-signed. The archive
//! write is best-effort; a failed write is logged and the signed certificate
//! still returns to the caller.

use credence_crypto::{blake2b_256, digest_hex, sign_certificate_payload};
use credence_store::CertificateStore;
use credence_types::{
    AgentResult, Certificate, CertificatePayload, CredenceError, KeyPair, PublicKey, ResultKind,
    Timestamp, VerificationResult,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::warn;

/// Digest of the details structure at issuance, binding the certificate to
/// the exact agent results it attests to. The BTreeMap serialization gives a
/// canonical field order.
pub fn details_digest(
    details: &BTreeMap<ResultKind, Vec<AgentResult>>,
) -> Result<String, CredenceError> {
    let canonical =
        serde_json::to_vec(details).map_err(|e| CredenceError::Serialization(e.to_string()))?;
    Ok(digest_hex(&blake2b_256(&canonical)))
}

/// Signs certificates for verified results and archives them.
pub struct CertificateIssuer {
    keypair: KeyPair,
    store: Arc<dyn CertificateStore>,
    validity_secs: u64,
}

impl CertificateIssuer {
    pub fn new(keypair: KeyPair, store: Arc<dyn CertificateStore>, validity_secs: u64) -> Self {
        Self {
            keypair,
            store,
            validity_secs,
        }
    }

    /// The public half of the signing key, for downstream verification.
    pub fn public_key(&self) -> PublicKey {
        self.keypair.public
    }

    /// Sign a certificate for a verified result and archive it.
    pub async fn issue(
        &self,
        result: &VerificationResult,
        now: Timestamp,
    ) -> Result<Certificate, CredenceError> {
        let digest = details_digest(&result.details)?;
        let expires_at = now.add_secs(self.validity_secs);
        let payload = CertificatePayload {
            id: &result.id,
            issued_at: now,
            expires_at,
            confidence: result.confidence,
            details_digest: &digest,
        };
        let signature = sign_certificate_payload(&payload, &self.keypair.private)?;
        let certificate = Certificate {
            id: result.id.clone(),
            issued_at: now,
            expires_at,
            confidence: result.confidence,
            details_digest: digest,
            signature,
        };

        match serde_json::to_string(&certificate) {
            Ok(json) => {
                if let Err(e) = self.store.save(&certificate.id, &json, expires_at).await {
                    warn!(id = %certificate.id, error = %e, "certificate archive write failed");
                }
            }
            Err(e) => {
                warn!(id = %certificate.id, error = %e, "certificate did not serialize for archiving");
            }
        }

        Ok(certificate)
    }
}
