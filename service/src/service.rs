//! Composition root: config in, running orchestrator out.
//!
//! Builds the agent registry from configured endpoints, loads the signing
//! key when one is configured, and wires the orchestrator to the bundled
//! in-memory stores, the tracing audit sink, and the Prometheus metrics
//! sink. Swapping any collaborator for an external backend happens here.

use crate::audit::TracingAuditSink;
use crate::health::{check_health, HealthReport, DEFAULT_PROBE_TIMEOUT};
use crate::metrics::ServiceMetrics;
use crate::{ServiceConfig, ServiceError};
use credence_agents::{AgentRegistry, HttpAgent};
use credence_crypto::{generate_keypair, keypair_from_private};
use credence_store::{MemoryCacheStore, MemoryCertificateStore, MemoryRateLimitStore};
use credence_types::{AgentId, KeyPair, PrivateKey, PublicKey};
use credence_verification::{CertificateIssuer, Orchestrator};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// A fully wired service instance.
pub struct Service {
    pub config: ServiceConfig,
    pub orchestrator: Arc<Orchestrator>,
    pub metrics: Arc<ServiceMetrics>,
}

impl std::fmt::Debug for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Service")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Service {
    /// Assemble a service from configuration. Fails on invalid config, an
    /// unreadable signing key, or inconsistent calibration parameters.
    pub fn build(config: ServiceConfig) -> Result<Self, ServiceError> {
        config.validate()?;

        let metrics = Arc::new(ServiceMetrics::new());
        let registry = build_registry(&config);
        if registry.is_empty() {
            warn!("no agents configured; every verification will degrade to error results");
        }

        let issuer = match &config.signing_key_file {
            Some(path) => {
                let keypair = load_signing_key(path)?;
                info!(public_key = %keypair.public.to_hex(), "certificate signing enabled");
                Some(CertificateIssuer::new(
                    keypair,
                    Arc::new(MemoryCertificateStore::new()),
                    config.params.certificate_validity_secs,
                ))
            }
            None => {
                info!("no signing key configured; results will carry no certificate");
                None
            }
        };

        let agent_count = registry.len();
        let orchestrator = Orchestrator::new(
            registry,
            config.params.clone(),
            issuer,
            Arc::new(MemoryCacheStore::new()),
            Arc::new(MemoryRateLimitStore::new()),
            Arc::new(TracingAuditSink),
            metrics.clone(),
        )?;

        info!(agents = agent_count, "service assembled");
        Ok(Self {
            config,
            orchestrator: Arc::new(orchestrator),
            metrics,
        })
    }

    /// Probe every agent and report per-agent health plus circuit states.
    pub async fn health(&self) -> HealthReport {
        check_health(&self.orchestrator, DEFAULT_PROBE_TIMEOUT).await
    }
}

/// One shared HTTP client backs every agent so they reuse a connection pool.
fn build_registry(config: &ServiceConfig) -> AgentRegistry {
    let client = reqwest::Client::new();
    let mut registry = AgentRegistry::new();
    for (slug, endpoint) in &config.agents {
        // validate() already rejected unknown slugs
        if let Some(id) = AgentId::from_slug(slug) {
            registry.register(Arc::new(HttpAgent::with_client(id, endpoint, client.clone())));
        }
    }
    registry
}

/// Read a hex-encoded 32-byte Ed25519 private key from `path`.
fn load_signing_key(path: &Path) -> Result<KeyPair, ServiceError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| ServiceError::SigningKey(format!("{}: {e}", path.display())))?;
    let bytes = hex::decode(content.trim())
        .map_err(|e| ServiceError::SigningKey(format!("{}: not hex: {e}", path.display())))?;
    let seed: [u8; 32] = bytes.try_into().map_err(|_| {
        ServiceError::SigningKey(format!(
            "{}: expected 32 bytes (64 hex characters)",
            path.display()
        ))
    })?;
    Ok(keypair_from_private(PrivateKey(seed)))
}

/// Generate a fresh signing key, write it hex-encoded to `path` (owner-only
/// on Unix), and return the matching public key.
pub fn write_signing_key(path: &Path) -> Result<PublicKey, ServiceError> {
    let keypair = generate_keypair();
    let encoded = hex::encode(keypair.private.0);
    std::fs::write(path, format!("{encoded}\n"))
        .map_err(|e| ServiceError::SigningKey(format!("{}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .map_err(|e| ServiceError::SigningKey(format!("{}: {e}", path.display())))?;
    }

    Ok(keypair.public)
}
