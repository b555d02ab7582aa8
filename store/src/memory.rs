//! In-memory store backends.
//!
//! Thread-safe for tokio's multi-threaded runtime. Suitable for single-node
//! deployments and tests; swap in networked backends by implementing the
//! same traits. Time-dependent operations have `_at` variants taking an
//! explicit `now`, which the trait impls call with the system clock.

use crate::audit::AuditSink;
use crate::cache::CacheStore;
use crate::certificate::{CertificateStore, StoredCertificate};
use crate::rate::{RateLimitStore, WindowCount};
use crate::StoreError;
use async_trait::async_trait;
use credence_types::Timestamp;
use std::collections::HashMap;
use std::sync::Mutex;

// ── Cache ────────────────────────────────────────────────────────────────

struct CacheEntry {
    value: String,
    expires_at: Timestamp,
}

/// In-memory TTL cache. Expired entries are dropped lazily on read.
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get_at(&self, key: &str, now: Timestamp) -> Option<String> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some(entry) if now < entry.expires_at => Some(entry.value.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub fn set_at(&self, key: &str, value: &str, ttl_secs: u64, now: Timestamp) {
        self.entries.lock().unwrap().insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                expires_at: now.add_secs(ttl_secs),
            },
        );
    }

    /// Number of entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.get_at(key, Timestamp::now()))
    }

    async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> Result<(), StoreError> {
        self.set_at(key, value, ttl_secs, Timestamp::now());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

// ── Rate limits ──────────────────────────────────────────────────────────

struct Window {
    started_at: Timestamp,
    count: u64,
}

/// In-memory fixed-window counters.
pub struct MemoryRateLimitStore {
    windows: Mutex<HashMap<String, Window>>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn incr_at(&self, key: &str, window_secs: u64, now: Timestamp) -> WindowCount {
        let mut windows = self.windows.lock().unwrap();
        let window = windows.entry(key.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });
        if window.started_at.has_expired(window_secs, now) {
            window.started_at = now;
            window.count = 0;
        }
        window.count += 1;
        let resets_in_secs = window
            .started_at
            .as_secs()
            .saturating_add(window_secs)
            .saturating_sub(now.as_secs());
        WindowCount {
            count: window.count,
            resets_in_secs,
        }
    }
}

impl Default for MemoryRateLimitStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateLimitStore for MemoryRateLimitStore {
    async fn incr(&self, key: &str, window_secs: u64) -> Result<WindowCount, StoreError> {
        Ok(self.incr_at(key, window_secs, Timestamp::now()))
    }
}

// ── Certificates ─────────────────────────────────────────────────────────

/// In-memory write-once certificate archive.
pub struct MemoryCertificateStore {
    certificates: Mutex<HashMap<String, StoredCertificate>>,
}

impl MemoryCertificateStore {
    pub fn new() -> Self {
        Self {
            certificates: Mutex::new(HashMap::new()),
        }
    }

    pub fn count(&self) -> usize {
        self.certificates.lock().unwrap().len()
    }
}

impl Default for MemoryCertificateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CertificateStore for MemoryCertificateStore {
    async fn save(
        &self,
        id: &str,
        certificate_json: &str,
        expires_at: Timestamp,
    ) -> Result<(), StoreError> {
        let mut certificates = self.certificates.lock().unwrap();
        if certificates.contains_key(id) {
            return Err(StoreError::Duplicate(id.to_string()));
        }
        certificates.insert(
            id.to_string(),
            StoredCertificate {
                certificate_json: certificate_json.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<StoredCertificate>, StoreError> {
        Ok(self.certificates.lock().unwrap().get(id).cloned())
    }
}

// ── Audit ────────────────────────────────────────────────────────────────

/// In-memory audit trail; tests inspect `records()`.
pub struct MemoryAuditSink {
    records: Mutex<Vec<(String, serde_json::Value)>>,
}

impl MemoryAuditSink {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<(String, serde_json::Value)> {
        self.records.lock().unwrap().clone()
    }
}

impl Default for MemoryAuditSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuditSink for MemoryAuditSink {
    async fn log(&self, event: &str, fields: serde_json::Value) -> Result<(), StoreError> {
        self.records
            .lock()
            .unwrap()
            .push((event.to_string(), fields));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_hit_before_expiry() {
        let store = MemoryCacheStore::new();
        let t0 = Timestamp::new(1_000);
        store.set_at("k", "v", 3600, t0);
        assert_eq!(store.get_at("k", Timestamp::new(4_599)), Some("v".to_string()));
    }

    #[test]
    fn cache_expires_at_ttl_boundary() {
        let store = MemoryCacheStore::new();
        let t0 = Timestamp::new(1_000);
        store.set_at("k", "v", 3600, t0);
        assert_eq!(store.get_at("k", Timestamp::new(4_600)), None);
        // Expired entry was dropped on read.
        assert!(store.is_empty());
    }

    #[test]
    fn cache_set_replaces_entry_and_ttl() {
        let store = MemoryCacheStore::new();
        let t0 = Timestamp::new(1_000);
        store.set_at("k", "old", 10, t0);
        store.set_at("k", "new", 3600, t0);
        assert_eq!(store.get_at("k", Timestamp::new(2_000)), Some("new".to_string()));
    }

    #[tokio::test]
    async fn cache_delete_removes_entry() {
        let store = MemoryCacheStore::new();
        store.set("k", "v", 3600).await.unwrap();
        store.delete("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
        // Deleting again is fine.
        store.delete("k").await.unwrap();
    }

    #[test]
    fn rate_window_counts_and_resets() {
        let store = MemoryRateLimitStore::new();
        let t0 = Timestamp::new(10_000);

        let c1 = store.incr_at("caller:critical", 60, t0);
        assert_eq!(c1.count, 1);
        assert_eq!(c1.resets_in_secs, 60);

        let c2 = store.incr_at("caller:critical", 60, Timestamp::new(10_030));
        assert_eq!(c2.count, 2);
        assert_eq!(c2.resets_in_secs, 30);

        // Window rolls over.
        let c3 = store.incr_at("caller:critical", 60, Timestamp::new(10_060));
        assert_eq!(c3.count, 1);
        assert_eq!(c3.resets_in_secs, 60);
    }

    #[test]
    fn rate_windows_are_per_key() {
        let store = MemoryRateLimitStore::new();
        let t0 = Timestamp::new(0);
        store.incr_at("a:normal", 3600, t0);
        store.incr_at("a:normal", 3600, t0);
        let b = store.incr_at("b:normal", 3600, t0);
        assert_eq!(b.count, 1);
    }

    #[tokio::test]
    async fn certificate_store_is_write_once() {
        let store = MemoryCertificateStore::new();
        let expires = Timestamp::new(2_000_000_000);
        store.save("vr-1", "{}", expires).await.unwrap();
        let err = store.save("vr-1", "{}", expires).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.count(), 1);
    }

    #[tokio::test]
    async fn certificate_get_returns_saved_json() {
        let store = MemoryCertificateStore::new();
        let expires = Timestamp::new(2_000_000_000);
        store.save("vr-2", r#"{"id":"vr-2"}"#, expires).await.unwrap();
        let stored = store.get("vr-2").await.unwrap().unwrap();
        assert_eq!(stored.certificate_json, r#"{"id":"vr-2"}"#);
        assert_eq!(stored.expires_at, expires);
        assert_eq!(store.get("vr-3").await.unwrap(), None);
    }

    #[tokio::test]
    async fn audit_sink_appends_in_order() {
        let sink = MemoryAuditSink::new();
        sink.log("verification.start", serde_json::json!({"caller": "a"}))
            .await
            .unwrap();
        sink.log("verification.complete", serde_json::json!({"verified": true}))
            .await
            .unwrap();
        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].0, "verification.start");
        assert_eq!(records[1].0, "verification.complete");
    }
}
