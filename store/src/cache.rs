//! Result cache storage trait.

use crate::StoreError;
use async_trait::async_trait;

/// Key-value cache with per-entry TTL, keyed by opaque string.
///
/// Values are serialized JSON; the cache layer above decides keys and TTLs.
/// Implementations must treat `set` on an existing key as replacement.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Fetch a live (unexpired) entry.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store an entry that expires `ttl_secs` from now.
    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), StoreError>;

    /// Remove an entry. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StoreError>;
}
