//! Ed25519 signing and verification, including certificate payloads.

use credence_types::{Certificate, CertificatePayload, CredenceError, PrivateKey, PublicKey, Signature};
use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};

/// Sign a message with a private key, returning the signature.
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    let sig = signing_key.sign(message);
    Signature(sig.to_bytes())
}

/// Verify a signature against a message and public key.
///
/// Returns `true` if the signature is valid, `false` otherwise.
/// Also rejects non-canonical signatures (malleability protection).
pub fn verify_signature(message: &[u8], signature: &Signature, public_key: &PublicKey) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(&public_key.0) else {
        return false;
    };
    let dalek_sig = ed25519_dalek::Signature::from_bytes(&signature.0);
    verifying_key.verify(message, &dalek_sig).is_ok()
}

/// Sign a canonical certificate payload.
pub fn sign_certificate_payload(
    payload: &CertificatePayload<'_>,
    private_key: &PrivateKey,
) -> Result<Signature, CredenceError> {
    let bytes = payload.canonical_bytes()?;
    Ok(sign_message(&bytes, private_key))
}

/// Check an issued certificate against the issuer's public key.
///
/// Recomputes the canonical payload from the certificate's own fields, so any
/// tampering with the signed subset invalidates the signature.
pub fn verify_certificate(cert: &Certificate, public_key: &PublicKey) -> bool {
    match cert.payload().canonical_bytes() {
        Ok(bytes) => verify_signature(&bytes, &cert.signature, public_key),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{generate_keypair, keypair_from_seed};
    use credence_types::Timestamp;

    fn test_certificate(private: &PrivateKey) -> Certificate {
        let issued_at = Timestamp::new(1_700_000_000);
        let expires_at = issued_at.add_secs(365 * 24 * 3600);
        let digest = "3d".repeat(32);
        let payload = CertificatePayload {
            id: "vr-07c1b2a9",
            issued_at,
            expires_at,
            confidence: 0.97,
            details_digest: &digest,
        };
        let signature = sign_certificate_payload(&payload, private).unwrap();
        Certificate {
            id: "vr-07c1b2a9".to_string(),
            issued_at,
            expires_at,
            confidence: 0.97,
            details_digest: digest,
            signature,
        }
    }

    #[test]
    fn sign_and_verify() {
        let kp = generate_keypair();
        let msg = b"attestation payload";
        let sig = sign_message(msg, &kp.private);
        assert!(verify_signature(msg, &sig, &kp.public));
    }

    #[test]
    fn wrong_message_fails() {
        let kp = generate_keypair();
        let sig = sign_message(b"correct message", &kp.private);
        assert!(!verify_signature(b"wrong message", &sig, &kp.public));
    }

    #[test]
    fn wrong_key_fails() {
        let kp1 = generate_keypair();
        let kp2 = generate_keypair();
        let msg = b"test";
        let sig = sign_message(msg, &kp1.private);
        assert!(!verify_signature(msg, &sig, &kp2.public));
    }

    #[test]
    fn signature_deterministic() {
        let kp = keypair_from_seed(&[99u8; 32]);
        let msg = b"deterministic test";
        let sig1 = sign_message(msg, &kp.private);
        let sig2 = sign_message(msg, &kp.private);
        assert_eq!(sig1.0, sig2.0);
    }

    #[test]
    fn certificate_roundtrip_verifies() {
        let kp = keypair_from_seed(&[7u8; 32]);
        let cert = test_certificate(&kp.private);
        assert!(verify_certificate(&cert, &kp.public));
    }

    #[test]
    fn tampered_certificate_fails() {
        let kp = keypair_from_seed(&[7u8; 32]);
        let mut cert = test_certificate(&kp.private);
        cert.confidence = 0.99;
        assert!(!verify_certificate(&cert, &kp.public));
    }

    #[test]
    fn tampered_digest_fails() {
        let kp = keypair_from_seed(&[7u8; 32]);
        let mut cert = test_certificate(&kp.private);
        cert.details_digest = "00".repeat(32);
        assert!(!verify_certificate(&cert, &kp.public));
    }

    #[test]
    fn certificate_fails_under_wrong_issuer() {
        let kp1 = keypair_from_seed(&[7u8; 32]);
        let kp2 = keypair_from_seed(&[8u8; 32]);
        let cert = test_certificate(&kp1.private);
        assert!(!verify_certificate(&cert, &kp2.public));
    }

    #[test]
    fn invalid_public_key() {
        let kp = generate_keypair();
        let sig = sign_message(b"test", &kp.private);
        let bad_key = PublicKey([0xFF; 32]);
        assert!(!verify_signature(b"test", &sig, &bad_key));
    }
}
