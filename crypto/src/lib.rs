//! Cryptographic primitives for the Credence verification service.
//!
//! - **Ed25519** for certificate signing and verification
//! - **Blake2b** for stable digests (cache keys, detail snapshots, result ids)

pub mod hash;
pub mod keys;
pub mod sign;

pub use hash::{blake2b_256, blake2b_256_multi, digest_hex};
pub use keys::{generate_keypair, keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_certificate_payload, sign_message, verify_certificate, verify_signature};
