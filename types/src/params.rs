//! Calibration parameters — every tunable the orchestrator consults.
//!
//! The numeric values are domain calibration, not hard invariants; operators
//! may retune them in configuration. The invariants `validate` enforces are
//! structural: kind weights sum to 1, thresholds stay in [0,1], budgets are
//! nonzero and consistent.

use crate::error::CredenceError;
use crate::result::ResultKind;
use serde::{Deserialize, Serialize};

/// Per-kind confidence weights used by the synthesizer.
///
/// The seven named weights must sum to 1. `default_weight` applies to error
/// results and any kind without a named weight; it sits outside the sum.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KindWeights {
    pub business: f64,
    pub indigenous: f64,
    pub worker: f64,
    pub trade: f64,
    pub safety: f64,
    pub cross_jurisdiction_compliance: f64,
    pub fraud: f64,
    pub default_weight: f64,
}

impl KindWeights {
    pub fn weight_for(&self, kind: ResultKind) -> f64 {
        match kind {
            ResultKind::Business => self.business,
            ResultKind::Indigenous => self.indigenous,
            ResultKind::Worker => self.worker,
            ResultKind::Trade => self.trade,
            ResultKind::Safety => self.safety,
            ResultKind::CrossJurisdictionCompliance => self.cross_jurisdiction_compliance,
            ResultKind::Fraud => self.fraud,
            ResultKind::Error => self.default_weight,
        }
    }

    fn named_sum(&self) -> f64 {
        self.business
            + self.indigenous
            + self.worker
            + self.trade
            + self.safety
            + self.cross_jurisdiction_compliance
            + self.fraud
    }
}

impl Default for KindWeights {
    fn default() -> Self {
        Self {
            business: 0.25,
            indigenous: 0.20,
            worker: 0.15,
            trade: 0.15,
            safety: 0.15,
            cross_jurisdiction_compliance: 0.05,
            fraud: 0.05,
            default_weight: 0.10,
        }
    }
}

/// All orchestrator tunables. Every field has a calibrated default, so a
/// configuration file may override any subset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationParams {
    // ── Confidence synthesis ─────────────────────────────────────────────
    pub weights: KindWeights,

    /// Aggregate confidence at or above this verifies the business.
    pub verified_threshold: f64,

    /// A fraud risk score above this vetoes verification outright.
    pub fraud_veto_threshold: f64,

    // ── Fan-out budgets ──────────────────────────────────────────────────
    /// One deadline for the whole concurrent fan-out, independent of N.
    pub overall_deadline_secs: u64,

    /// Per-attempt timeout for a single agent call.
    pub attempt_timeout_secs: u64,

    /// Attempts per agent invocation (first try + retries).
    pub max_attempts: u32,

    /// Base delay for randomized exponential backoff between attempts.
    pub backoff_base_ms: u64,

    /// Upper bound on a single backoff delay.
    pub backoff_cap_ms: u64,

    // ── Circuit breaker ──────────────────────────────────────────────────
    /// Failures within the rolling window that open the circuit.
    pub breaker_failure_threshold: u32,

    /// Rolling window for counting failures.
    pub breaker_window_secs: u64,

    /// Cooldown before an open circuit allows one half-open trial call.
    pub breaker_cooldown_secs: u64,

    // ── Cache ────────────────────────────────────────────────────────────
    /// Results below this confidence get the short TTL.
    pub cache_confidence_pivot: f64,

    /// TTL for low-confidence results (revisit sooner).
    pub cache_ttl_low_confidence_secs: u64,

    /// TTL for high-confidence results.
    pub cache_ttl_high_confidence_secs: u64,

    // ── Rate limits ──────────────────────────────────────────────────────
    /// Per-caller budget for high/critical urgency, per minute.
    pub critical_per_minute: u32,

    /// Per-caller budget for normal urgency, per hour.
    pub normal_per_hour: u32,

    // ── Certificates ─────────────────────────────────────────────────────
    /// Validity window for issued certificates.
    pub certificate_validity_secs: u64,
}

impl VerificationParams {
    /// Production defaults.
    pub fn defaults() -> Self {
        Self {
            weights: KindWeights::default(),
            verified_threshold: 0.95,
            fraud_veto_threshold: 0.3,

            overall_deadline_secs: 120,
            attempt_timeout_secs: 30,
            max_attempts: 3,
            backoff_base_ms: 200,
            backoff_cap_ms: 5_000,

            breaker_failure_threshold: 5,
            breaker_window_secs: 60,
            breaker_cooldown_secs: 30,

            cache_confidence_pivot: 0.7,
            cache_ttl_low_confidence_secs: 3_600,        // 1 hour
            cache_ttl_high_confidence_secs: 24 * 3_600,  // 24 hours

            critical_per_minute: 10,
            normal_per_hour: 120,

            certificate_validity_secs: 365 * 24 * 3_600, // 1 year
        }
    }

    /// Structural validation. Call once at startup.
    pub fn validate(&self) -> Result<(), CredenceError> {
        let invalid = |reason: String| CredenceError::InvalidParams { reason };

        let w = &self.weights;
        for (name, value) in [
            ("business", w.business),
            ("indigenous", w.indigenous),
            ("worker", w.worker),
            ("trade", w.trade),
            ("safety", w.safety),
            ("cross_jurisdiction_compliance", w.cross_jurisdiction_compliance),
            ("fraud", w.fraud),
            ("default_weight", w.default_weight),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("weight {name} = {value} out of [0,1]")));
            }
        }
        let sum = w.named_sum();
        if (sum - 1.0).abs() > 1e-9 {
            return Err(invalid(format!("kind weights sum to {sum}, expected 1")));
        }

        for (name, value) in [
            ("verified_threshold", self.verified_threshold),
            ("fraud_veto_threshold", self.fraud_veto_threshold),
            ("cache_confidence_pivot", self.cache_confidence_pivot),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("{name} = {value} out of [0,1]")));
            }
        }

        if self.max_attempts == 0 {
            return Err(invalid("max_attempts must be at least 1".to_string()));
        }
        if self.overall_deadline_secs == 0 || self.attempt_timeout_secs == 0 {
            return Err(invalid("timeouts must be nonzero".to_string()));
        }
        if self.attempt_timeout_secs > self.overall_deadline_secs {
            return Err(invalid(format!(
                "attempt timeout {}s exceeds overall deadline {}s",
                self.attempt_timeout_secs, self.overall_deadline_secs
            )));
        }
        if self.backoff_base_ms > self.backoff_cap_ms {
            return Err(invalid("backoff base exceeds cap".to_string()));
        }
        if self.breaker_failure_threshold == 0 {
            return Err(invalid("breaker threshold must be at least 1".to_string()));
        }
        if self.breaker_window_secs == 0 || self.breaker_cooldown_secs == 0 {
            return Err(invalid("breaker window and cooldown must be nonzero".to_string()));
        }
        if self.critical_per_minute == 0 || self.normal_per_hour == 0 {
            return Err(invalid("rate budgets must be at least 1".to_string()));
        }
        if self.certificate_validity_secs == 0 {
            return Err(invalid("certificate validity must be nonzero".to_string()));
        }
        Ok(())
    }
}

impl Default for VerificationParams {
    fn default() -> Self {
        Self::defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        VerificationParams::defaults().validate().unwrap();
    }

    #[test]
    fn default_weights_sum_to_one() {
        let w = KindWeights::default();
        assert!((w.named_sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn error_kind_uses_default_weight() {
        let w = KindWeights::default();
        assert_eq!(w.weight_for(ResultKind::Error), 0.10);
        assert_eq!(w.weight_for(ResultKind::Business), 0.25);
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let mut params = VerificationParams::defaults();
        params.weights.business = 0.5;
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_attempt_timeout_above_deadline() {
        let mut params = VerificationParams::defaults();
        params.attempt_timeout_secs = 500;
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let mut params = VerificationParams::defaults();
        params.verified_threshold = 1.5;
        assert!(params.validate().is_err());
    }

    #[test]
    fn rejects_zero_attempts() {
        let mut params = VerificationParams::defaults();
        params.max_attempts = 0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn partial_overrides_keep_remaining_defaults() {
        let params: VerificationParams =
            serde_json::from_str(r#"{"verified_threshold": 0.9, "max_attempts": 2}"#).unwrap();
        assert_eq!(params.verified_threshold, 0.9);
        assert_eq!(params.max_attempts, 2);
        assert_eq!(params.overall_deadline_secs, 120);
        assert_eq!(params.weights, KindWeights::default());
    }
}
