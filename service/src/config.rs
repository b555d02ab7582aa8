//! Service configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::path::PathBuf;

use credence_types::{AgentId, VerificationParams};

use crate::ServiceError;

/// Configuration for a Credence service instance.
///
/// Can be loaded from a TOML file via [`ServiceConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Every field has a default, so a
/// file only needs the keys it overrides.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Address the HTTP API listens on.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Path to a hex-encoded Ed25519 signing key. When absent the service
    /// runs without certificate issuance; when present but unreadable,
    /// startup fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_key_file: Option<PathBuf>,

    /// Agency endpoints, keyed by agent slug (e.g. `registry-on`, `cra`).
    /// Slugs not listed here are reported as unconfigured when selected.
    #[serde(default)]
    pub agents: BTreeMap<String, String>,

    /// Orchestrator calibration. Any subset of fields may be overridden.
    #[serde(default)]
    pub params: VerificationParams,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_listen_addr() -> String {
    "127.0.0.1:7341".to_string()
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &str) -> Result<Self, ServiceError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ServiceError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ServiceError> {
        toml::from_str(s).map_err(|e| ServiceError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).expect("ServiceConfig is always serializable to TOML")
    }

    /// Structural checks beyond what TOML parsing enforces: the listen
    /// address parses, every agent slug is known, endpoints are non-empty,
    /// and the calibration parameters are internally consistent.
    pub fn validate(&self) -> Result<(), ServiceError> {
        self.listen_addr
            .parse::<SocketAddr>()
            .map_err(|e| ServiceError::Config(format!("listen_addr '{}': {e}", self.listen_addr)))?;

        for (slug, endpoint) in &self.agents {
            if AgentId::from_slug(slug).is_none() {
                return Err(ServiceError::Config(format!("unknown agent slug '{slug}'")));
            }
            if endpoint.trim().is_empty() {
                return Err(ServiceError::Config(format!("empty endpoint for agent '{slug}'")));
            }
        }

        self.params.validate()?;
        Ok(())
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            signing_key_file: None,
            agents: BTreeMap::new(),
            params: VerificationParams::defaults(),
        }
    }
}
