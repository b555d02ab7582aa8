//! Agent results and the synthesized verification result.
//!
//! Every agent outcome — success or failure — is a value. Failures are
//! `error`-kind results with confidence 0, never exceptions, which is what
//! lets the synthesizer treat all agents uniformly.

use crate::certificate::Certificate;
use crate::error::CredenceError;
use crate::jurisdiction::Jurisdiction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// The closed set of result kinds an agent can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResultKind {
    Business,
    Worker,
    Trade,
    Safety,
    Indigenous,
    Fraud,
    CrossJurisdictionCompliance,
    Error,
}

impl ResultKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Business => "business",
            ResultKind::Worker => "worker",
            ResultKind::Trade => "trade",
            ResultKind::Safety => "safety",
            ResultKind::Indigenous => "indigenous",
            ResultKind::Fraud => "fraud",
            ResultKind::CrossJurisdictionCompliance => "cross-jurisdiction-compliance",
            ResultKind::Error => "error",
        }
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific payload of one agent result. The `kind` tag on the wire is
/// the discriminant; malformed payloads fail deserialization at the boundary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ResultDetail {
    Business {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        status: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        in_good_standing: Option<bool>,
    },
    Worker {
        workers_checked: u32,
        certifications_valid: u32,
        #[serde(default)]
        certifications_expired: u32,
    },
    Trade {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        trades_recognized: Vec<String>,
        #[serde(default)]
        red_seal_holders: u32,
    },
    Safety {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        coverage_active: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        clearance_number: Option<String>,
    },
    Indigenous {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        certified: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        certifying_body: Option<String>,
    },
    Fraud {
        /// Risk in [0,1]; above the veto threshold the verdict is forced
        /// to not-verified regardless of aggregate confidence.
        risk_score: f64,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        flags: Vec<String>,
    },
    CrossJurisdictionCompliance {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        compliant: Option<bool>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        jurisdictions: Vec<Jurisdiction>,
    },
    Error {
        message: String,
    },
}

impl ResultDetail {
    pub fn kind(&self) -> ResultKind {
        match self {
            ResultDetail::Business { .. } => ResultKind::Business,
            ResultDetail::Worker { .. } => ResultKind::Worker,
            ResultDetail::Trade { .. } => ResultKind::Trade,
            ResultDetail::Safety { .. } => ResultKind::Safety,
            ResultDetail::Indigenous { .. } => ResultKind::Indigenous,
            ResultDetail::Fraud { .. } => ResultKind::Fraud,
            ResultDetail::CrossJurisdictionCompliance { .. } => {
                ResultKind::CrossJurisdictionCompliance
            }
            ResultDetail::Error { .. } => ResultKind::Error,
        }
    }
}

/// Normalized output of one agent invocation, paired with the agency name
/// that produced it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentResult {
    pub agent: String,
    /// Confidence in [0,1]. Always 0 for error results.
    pub confidence: f64,
    #[serde(flatten)]
    pub detail: ResultDetail,
}

impl AgentResult {
    pub fn new(agent: impl Into<String>, confidence: f64, detail: ResultDetail) -> Self {
        Self {
            agent: agent.into(),
            confidence,
            detail,
        }
    }

    /// The synthesized failure value: error kind, confidence 0.
    pub fn error(agent: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            agent: agent.into(),
            confidence: 0.0,
            detail: ResultDetail::Error {
                message: message.into(),
            },
        }
    }

    pub fn kind(&self) -> ResultKind {
        self.detail.kind()
    }

    pub fn is_error(&self) -> bool {
        matches!(self.detail, ResultDetail::Error { .. })
    }

    /// Fraud risk score, if this result carries one.
    pub fn fraud_risk(&self) -> Option<f64> {
        match &self.detail {
            ResultDetail::Fraud { risk_score, .. } => Some(*risk_score),
            _ => None,
        }
    }

    /// Boundary validation: numeric fields must sit in [0,1].
    pub fn validate(&self) -> Result<(), CredenceError> {
        if !self.confidence.is_finite() || !(0.0..=1.0).contains(&self.confidence) {
            return Err(CredenceError::InvalidResult {
                reason: format!("confidence {} out of range", self.confidence),
            });
        }
        if let Some(risk) = self.fraud_risk() {
            if !risk.is_finite() || !(0.0..=1.0).contains(&risk) {
                return Err(CredenceError::InvalidResult {
                    reason: format!("fraud risk score {risk} out of range"),
                });
            }
        }
        Ok(())
    }
}

/// The orchestrator's synthesized output for one `verify` call.
///
/// Created once, cached under a derived key, never mutated after synthesis.
/// The JSON shape (`id`, `verified`, `confidence`, `systemsChecked`,
/// `details`, `certificate?`) is stable for external consumers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub id: String,
    pub verified: bool,
    pub confidence: f64,
    /// Canonical names of every agency selected for this call, including
    /// ones that failed or were never reachable.
    pub systems_checked: Vec<String>,
    /// Real wall-clock duration of the call in milliseconds.
    pub elapsed_ms: u64,
    /// All agent results, grouped by kind. BTreeMap keeps the serialized
    /// order deterministic.
    pub details: BTreeMap<ResultKind, Vec<AgentResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certificate: Option<Certificate>,
}

impl VerificationResult {
    /// Group raw agent results by kind for the `details` structure.
    pub fn group_details(results: Vec<AgentResult>) -> BTreeMap<ResultKind, Vec<AgentResult>> {
        let mut details: BTreeMap<ResultKind, Vec<AgentResult>> = BTreeMap::new();
        for result in results {
            details.entry(result.kind()).or_default().push(result);
        }
        details
    }

    /// Flat iterator over every agent result in `details`.
    pub fn all_results(&self) -> impl Iterator<Item = &AgentResult> {
        self.details.values().flatten()
    }
}
