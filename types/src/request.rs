//! Verification request input types.
//!
//! A request is immutable once submitted. Field names follow the external
//! JSON API (camelCase on the wire). Validation and sanitization happen at
//! the orchestrator boundary, not here.

use crate::jurisdiction::Jurisdiction;
use crate::time::Timestamp;
use serde::{Deserialize, Serialize};

/// A business-identity verification request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRequest {
    /// Legal or operating business name. Required, non-empty, bounded length.
    pub business_name: String,

    /// Federal business number in BN-15 form (e.g. `123456789RC0001`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_number: Option<String>,

    /// Home jurisdiction and optional city.
    pub location: BusinessLocation,

    /// Workers the business employs, possibly certified in other jurisdictions.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workers: Vec<Worker>,

    /// Present when the business claims an Indigenous partnership.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indigenous_partnership: Option<IndigenousPartnership>,

    /// Project the verification is being run for, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectDetails>,

    /// Trade qualifications claimed directly by the business.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trade_qualifications: Vec<String>,
}

/// Where the business is registered.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessLocation {
    pub jurisdiction: Jurisdiction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

/// One worker attached to a request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub name: String,

    /// Trade names the worker practices.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub trades: Vec<String>,

    /// Jurisdictions the worker is certified or active in. May be disjoint
    /// from the business's home jurisdiction.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jurisdictions: Vec<Jurisdiction>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub certifications: Vec<Certification>,
}

/// A single trade or professional certification record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    /// Certification type (e.g. "Journeyperson Electrician").
    pub cert_type: String,
    pub number: String,
    pub issuing_jurisdiction: Jurisdiction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<Timestamp>,
    /// Red Seal endorsement: recognized in every jurisdiction.
    #[serde(default)]
    pub red_seal: bool,
}

/// Declared Indigenous partnership.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndigenousPartnership {
    pub partner_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub community: Option<String>,
    /// Indigenous ownership share in percent, when declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ownership_percent: Option<f64>,
}

/// Project the verification supports (procurement context).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDetails {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Monetary value in dollars, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_certifications: Vec<String>,
}

/// Per-call options for `verify`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyOptions {
    /// Skip the cache read path (a fresh result is still written back).
    #[serde(default)]
    pub force_refresh: bool,

    #[serde(default)]
    pub urgency: Urgency,

    /// Caller identity for rate limiting. Anonymous callers share one budget.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller: Option<String>,
}

/// Urgency class. `high` and `critical` draw from the tight per-minute
/// rate budget; `normal` from the per-hour budget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Normal,
    High,
    Critical,
}

impl Urgency {
    pub fn is_critical_tier(&self) -> bool {
        matches!(self, Urgency::High | Urgency::Critical)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Normal => "normal",
            Urgency::High => "high",
            Urgency::Critical => "critical",
        }
    }
}
