//! Result cache: derived keys, risk-adjusted TTLs, best-effort storage.
//!
//! Keys hash normalized request identity fields only (name, business number,
//! home jurisdiction, worker count), so formatting differences between
//! semantically-identical requests still hit. Store failures never fail a
//! verify call; a broken cache behaves like an empty one.

use credence_crypto::{blake2b_256_multi, digest_hex};
use credence_store::CacheStore;
use credence_types::{VerificationParams, VerificationRequest, VerificationResult};
use std::sync::Arc;
use tracing::warn;

/// Derive the cache key for a sanitized request.
///
/// Identity fields are separated by an explicit delimiter byte so adjacent
/// fields cannot collide by concatenation.
pub fn cache_key(request: &VerificationRequest) -> String {
    let name = request.business_name.to_lowercase();
    let number = request
        .business_number
        .as_deref()
        .unwrap_or_default()
        .to_ascii_uppercase();
    let jurisdiction = request.location.jurisdiction.as_str();
    let worker_count = (request.workers.len() as u64).to_le_bytes();

    let digest = blake2b_256_multi(&[
        name.as_bytes(),
        b"\x1f",
        number.as_bytes(),
        b"\x1f",
        jurisdiction.as_bytes(),
        b"\x1f",
        &worker_count,
    ]);
    format!("verify:{}", digest_hex(&digest))
}

/// TTL for a synthesized result: low-confidence verdicts get the short TTL
/// so they are revisited sooner.
pub fn risk_adjusted_ttl(confidence: f64, params: &VerificationParams) -> u64 {
    if confidence < params.cache_confidence_pivot {
        params.cache_ttl_low_confidence_secs
    } else {
        params.cache_ttl_high_confidence_secs
    }
}

/// Cache layer over an abstract [`CacheStore`].
pub struct ResultCache {
    store: Arc<dyn CacheStore>,
}

impl ResultCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Fetch a live cached result. Backend errors and undecodable entries
    /// are logged and reported as misses.
    pub async fn lookup(&self, key: &str) -> Option<VerificationResult> {
        let json = match self.store.get(key).await {
            Ok(Some(json)) => json,
            Ok(None) => return None,
            Err(e) => {
                warn!(key = %key, error = %e, "cache read failed, treating as miss");
                return None;
            }
        };
        match serde_json::from_str(&json) {
            Ok(result) => Some(result),
            Err(e) => {
                warn!(key = %key, error = %e, "cached entry is undecodable, dropping it");
                let _ = self.store.delete(key).await;
                None
            }
        }
    }

    /// Write a result under its risk-adjusted TTL. Returns whether the write
    /// reached the backend.
    pub async fn store(
        &self,
        key: &str,
        result: &VerificationResult,
        params: &VerificationParams,
    ) -> bool {
        let json = match serde_json::to_string(result) {
            Ok(json) => json,
            Err(e) => {
                warn!(id = %result.id, error = %e, "result did not serialize for caching");
                return false;
            }
        };
        let ttl_secs = risk_adjusted_ttl(result.confidence, params);
        match self.store.set(key, &json, ttl_secs).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %key, error = %e, "cache write failed");
                false
            }
        }
    }

    /// Drop the entry for a key (revocation). Returns whether the backend
    /// accepted the delete.
    pub async fn invalidate(&self, key: &str) -> bool {
        match self.store.delete(key).await {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %key, error = %e, "cache invalidation failed");
                false
            }
        }
    }
}
