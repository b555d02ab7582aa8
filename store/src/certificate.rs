//! Certificate archive storage trait.

use crate::StoreError;
use async_trait::async_trait;
use credence_types::Timestamp;
use serde::{Deserialize, Serialize};

/// A certificate as archived: its canonical JSON plus the expiry used for
/// retention.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StoredCertificate {
    pub certificate_json: String,
    pub expires_at: Timestamp,
}

/// Durable write-once archive of issued certificates.
#[async_trait]
pub trait CertificateStore: Send + Sync {
    /// Persist an issued certificate. Certificates are write-once: saving an
    /// id that already exists is a `Duplicate` error.
    async fn save(
        &self,
        id: &str,
        certificate_json: &str,
        expires_at: Timestamp,
    ) -> Result<(), StoreError>;

    /// Fetch an archived certificate by result id.
    async fn get(&self, id: &str) -> Result<Option<StoredCertificate>, StoreError>;
}
