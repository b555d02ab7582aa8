//! The root orchestrator: one `verify` call from raw request to synthesized,
//! cached, optionally certified result.
//!
//! Call phases: validate, rate-limit, cache read (skippable), select, fan
//! out, synthesize, certificate (verified only), cache write. Only
//! validation, rate-limit, and total-timeout failures cross this boundary as
//! errors; agent and store failures degrade the aggregate confidence
//! instead.

use crate::cache::{cache_key, ResultCache};
use crate::certificate::CertificateIssuer;
use crate::error::VerifyError;
use crate::executor::run_fan_out;
use crate::limits::{tier_label, RateLimiter, ANONYMOUS_CALLER};
use crate::synthesis::synthesize;
use crate::validate::sanitize_request;
use credence_agents::{select_agents, AgentRegistry};
use credence_crypto::{blake2b_256, blake2b_256_multi, digest_hex};
use credence_resilience::{BreakerConfig, BreakerMap, CircuitState, ResilientAgent, RetryPolicy};
use credence_store::{AuditSink, CacheStore, MetricsSink, RateLimitStore};
use credence_types::{
    AgentId, AgentResult, CredenceError, PublicKey, Timestamp, VerificationParams,
    VerificationRequest, VerificationResult, VerifyOptions,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Orchestrates the full verification pipeline. One instance serves all
/// requests; the per-agent circuit breakers are its only mutable state.
pub struct Orchestrator {
    registry: AgentRegistry,
    agents: HashMap<AgentId, Arc<ResilientAgent>>,
    params: VerificationParams,
    cache: ResultCache,
    limiter: RateLimiter,
    issuer: Option<CertificateIssuer>,
    audit: Arc<dyn AuditSink>,
    metrics: Arc<dyn MetricsSink>,
    breakers: BreakerMap,
    call_seq: AtomicU64,
}

impl Orchestrator {
    /// Wire up the pipeline. Every registered agent gets its own breaker and
    /// the shared retry policy here, once, at startup.
    pub fn new(
        registry: AgentRegistry,
        params: VerificationParams,
        issuer: Option<CertificateIssuer>,
        cache_store: Arc<dyn CacheStore>,
        rate_store: Arc<dyn RateLimitStore>,
        audit: Arc<dyn AuditSink>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Result<Self, CredenceError> {
        params.validate()?;

        let breakers = BreakerMap::new(BreakerConfig {
            failure_threshold: params.breaker_failure_threshold,
            window_secs: params.breaker_window_secs,
            cooldown_secs: params.breaker_cooldown_secs,
        });
        let policy = RetryPolicy::from_params(&params);

        let mut agents = HashMap::new();
        for id in registry.ids() {
            if let Some(agent) = registry.get(id) {
                agents.insert(
                    id,
                    Arc::new(ResilientAgent::new(
                        agent,
                        breakers.breaker_for(&id.slug()),
                        policy,
                        Arc::clone(&metrics),
                    )),
                );
            }
        }

        Ok(Self {
            registry,
            agents,
            params,
            cache: ResultCache::new(cache_store),
            limiter: RateLimiter::new(rate_store),
            issuer,
            audit,
            metrics,
            breakers,
            call_seq: AtomicU64::new(0),
        })
    }

    /// Run one verification.
    pub async fn verify(
        &self,
        request: &VerificationRequest,
        options: &VerifyOptions,
    ) -> Result<VerificationResult, VerifyError> {
        let started = Instant::now();

        let request = match sanitize_request(request) {
            Ok(request) => request,
            Err(e) => {
                self.metrics
                    .verify_completed("validation-failed", started.elapsed().as_secs_f64());
                return Err(e);
            }
        };

        if let Err(e) = self
            .limiter
            .check(options.caller.as_deref(), options.urgency, &self.params)
            .await
        {
            self.metrics.rate_limited(tier_label(options.urgency));
            self.metrics
                .verify_completed("rate-limited", started.elapsed().as_secs_f64());
            return Err(e);
        }

        let key = cache_key(&request);
        if options.force_refresh {
            self.metrics.cache_event("bypass");
        } else if let Some(result) = self.cache.lookup(&key).await {
            debug!(id = %result.id, "serving cached verification");
            self.metrics.cache_event("hit");
            self.metrics
                .verify_completed("cache-hit", started.elapsed().as_secs_f64());
            return Ok(result);
        } else {
            self.metrics.cache_event("miss");
        }

        let call_id = self.next_call_id(&request);
        self.audit_start(&call_id, &request, options).await;

        let selected = select_agents(&request);
        let systems_checked: Vec<String> =
            selected.iter().map(|id| id.display_name()).collect();

        let mut available = Vec::new();
        let mut missing = Vec::new();
        for id in &selected {
            match self.agents.get(id) {
                Some(agent) => available.push(Arc::clone(agent)),
                None => missing.push(*id),
            }
        }

        let overall = Duration::from_secs(self.params.overall_deadline_secs);
        let shared = Arc::new(request);
        let mut results = run_fan_out(&available, &shared, overall).await;

        for id in missing {
            warn!(agent = %id, "no implementation registered, scoring as unavailable");
            results.push(AgentResult::error(
                id.display_name(),
                format!("{} is not configured", id.display_name()),
            ));
        }

        let usable = results.iter().any(|result| !result.is_error());
        if started.elapsed() >= overall && !usable {
            self.metrics
                .verify_completed("timed-out", started.elapsed().as_secs_f64());
            return Err(VerifyError::DeadlineExceeded {
                deadline_secs: self.params.overall_deadline_secs,
            });
        }

        results.sort_by(|a, b| a.kind().cmp(&b.kind()).then_with(|| a.agent.cmp(&b.agent)));
        let synthesis = synthesize(&results, &self.params);
        if synthesis.fraud_vetoed {
            info!(id = %call_id, "fraud risk above veto threshold, verification denied");
        }

        let mut result = VerificationResult {
            id: call_id,
            verified: synthesis.verified,
            confidence: synthesis.confidence,
            systems_checked,
            elapsed_ms: started.elapsed().as_millis() as u64,
            details: VerificationResult::group_details(results),
            certificate: None,
        };

        if result.verified {
            if let Some(issuer) = &self.issuer {
                match issuer.issue(&result, Timestamp::now()).await {
                    Ok(certificate) => result.certificate = Some(certificate),
                    Err(e) => {
                        warn!(id = %result.id, error = %e, "certificate issuance failed, returning result without one");
                    }
                }
            }
        }

        if self.cache.store(&key, &result, &self.params).await {
            self.metrics.cache_event("write");
        }

        self.audit_complete(&result).await;
        let outcome = if result.verified { "verified" } else { "unverified" };
        self.metrics
            .verify_completed(outcome, started.elapsed().as_secs_f64());
        info!(
            id = %result.id,
            verified = result.verified,
            confidence = result.confidence,
            elapsed_ms = result.elapsed_ms,
            systems = result.systems_checked.len(),
            "verification complete"
        );
        Ok(result)
    }

    /// Drop the cached verdict for a request (revocation flows). Returns
    /// whether the cache backend accepted the delete.
    pub async fn invalidate(&self, request: &VerificationRequest) -> Result<bool, VerifyError> {
        let request = sanitize_request(request)?;
        Ok(self.cache.invalidate(&cache_key(&request)).await)
    }

    /// Current circuit state per agent slug, for health reporting.
    pub fn breaker_states(&self) -> Vec<(String, CircuitState)> {
        self.breakers.states()
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn params(&self) -> &VerificationParams {
        &self.params
    }

    /// Public half of the certificate signing key, when issuance is enabled.
    pub fn signing_public_key(&self) -> Option<PublicKey> {
        self.issuer.as_ref().map(|issuer| issuer.public_key())
    }

    fn next_call_id(&self, request: &VerificationRequest) -> String {
        let seq = self.call_seq.fetch_add(1, Ordering::Relaxed);
        let digest = blake2b_256_multi(&[
            request.business_name.as_bytes(),
            b"\x1f",
            &seq.to_le_bytes(),
            b"\x1f",
            &Timestamp::now().as_secs().to_le_bytes(),
        ]);
        format!("vr-{}", &digest_hex(&digest)[..12])
    }

    async fn audit_start(
        &self,
        call_id: &str,
        request: &VerificationRequest,
        options: &VerifyOptions,
    ) {
        // The audit trail carries a digest of the business name, not the
        // name itself.
        let name_digest =
            digest_hex(&blake2b_256(request.business_name.to_lowercase().as_bytes()));
        let fields = serde_json::json!({
            "id": call_id,
            "caller": options.caller.as_deref().unwrap_or(ANONYMOUS_CALLER),
            "businessNameDigest": name_digest,
            "urgency": options.urgency.as_str(),
        });
        if let Err(e) = self.audit.log("verification.start", fields).await {
            warn!(id = %call_id, error = %e, "audit sink rejected start event");
        }
    }

    async fn audit_complete(&self, result: &VerificationResult) {
        let fields = serde_json::json!({
            "id": result.id,
            "verified": result.verified,
            "confidence": result.confidence,
            "elapsedMs": result.elapsed_ms,
            "systemsChecked": result.systems_checked,
        });
        if let Err(e) = self.audit.log("verification.complete", fields).await {
            warn!(id = %result.id, error = %e, "audit sink rejected completion event");
        }
    }
}
