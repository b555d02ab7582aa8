//! Agent identities.
//!
//! One identity per verification source: a provincial/territorial registry
//! agent per jurisdiction, plus the cross-cutting specialist agents. The
//! selector produces a set of these; the registry maps each to a live
//! implementation.

use crate::jurisdiction::Jurisdiction;
use crate::result::ResultKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a single verification source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgentId {
    /// Provincial or territorial business registry.
    Registry(Jurisdiction),
    /// Canada Revenue Agency business-number check. Mandatory for every request.
    Cra,
    /// Corporations Canada federal incorporation check. Mandatory for every request.
    CorporationsCanada,
    /// Workers' compensation / occupational safety standing. Mandatory.
    SafetyCompliance,
    /// Red Seal interprovincial trade recognition.
    TradeHarmonization,
    /// Indigenous business certification registry (CCAB-style).
    IndigenousRegistry,
    /// Indigenous Services Canada directory, federal counterpart of the above.
    IndigenousServices,
    /// Interprovincial trade-agreement compliance.
    CrossJurisdictionCompliance,
    /// Fraud-pattern screen. Mandatory for every request.
    FraudDetection,
}

impl AgentId {
    /// Canonical agency name, as reported in `systemsChecked` and audit events.
    pub fn display_name(&self) -> String {
        match self {
            AgentId::Registry(j) => j.registry_name().to_string(),
            AgentId::Cra => "Canada Revenue Agency".to_string(),
            AgentId::CorporationsCanada => "Corporations Canada".to_string(),
            AgentId::SafetyCompliance => "Workers Compensation Board".to_string(),
            AgentId::TradeHarmonization => "Red Seal Program".to_string(),
            AgentId::IndigenousRegistry => "Canadian Council for Indigenous Business".to_string(),
            AgentId::IndigenousServices => "Indigenous Services Canada".to_string(),
            AgentId::CrossJurisdictionCompliance => "CFTA Compliance Office".to_string(),
            AgentId::FraudDetection => "Fraud Pattern Screen".to_string(),
        }
    }

    /// The result kind this source reports under when it fails before
    /// producing a payload (used for synthesized error results and weighting).
    pub fn expected_kind(&self) -> ResultKind {
        match self {
            AgentId::Registry(_) => ResultKind::Business,
            AgentId::Cra => ResultKind::Business,
            AgentId::CorporationsCanada => ResultKind::Business,
            AgentId::SafetyCompliance => ResultKind::Safety,
            AgentId::TradeHarmonization => ResultKind::Trade,
            AgentId::IndigenousRegistry => ResultKind::Indigenous,
            AgentId::IndigenousServices => ResultKind::Indigenous,
            AgentId::CrossJurisdictionCompliance => ResultKind::CrossJurisdictionCompliance,
            AgentId::FraudDetection => ResultKind::Fraud,
        }
    }

    /// Short stable token used in config files, metrics labels, and
    /// rate/breaker keys (e.g. `registry-on`, `cra`, `fraud-detection`).
    pub fn slug(&self) -> String {
        match self {
            AgentId::Registry(j) => format!("registry-{}", j.as_str().to_ascii_lowercase()),
            AgentId::Cra => "cra".to_string(),
            AgentId::CorporationsCanada => "corporations-canada".to_string(),
            AgentId::SafetyCompliance => "safety-compliance".to_string(),
            AgentId::TradeHarmonization => "trade-harmonization".to_string(),
            AgentId::IndigenousRegistry => "indigenous-registry".to_string(),
            AgentId::IndigenousServices => "indigenous-services".to_string(),
            AgentId::CrossJurisdictionCompliance => "cross-jurisdiction".to_string(),
            AgentId::FraudDetection => "fraud-detection".to_string(),
        }
    }

    /// Parse a config-file slug back into an identity.
    pub fn from_slug(slug: &str) -> Option<AgentId> {
        if let Some(code) = slug.strip_prefix("registry-") {
            return code.parse::<Jurisdiction>().ok().map(AgentId::Registry);
        }
        match slug {
            "cra" => Some(AgentId::Cra),
            "corporations-canada" => Some(AgentId::CorporationsCanada),
            "safety-compliance" => Some(AgentId::SafetyCompliance),
            "trade-harmonization" => Some(AgentId::TradeHarmonization),
            "indigenous-registry" => Some(AgentId::IndigenousRegistry),
            "indigenous-services" => Some(AgentId::IndigenousServices),
            "cross-jurisdiction" => Some(AgentId::CrossJurisdictionCompliance),
            "fraud-detection" => Some(AgentId::FraudDetection),
            _ => None,
        }
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.slug())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_roundtrip_for_every_identity() {
        let mut ids: Vec<AgentId> = Jurisdiction::ALL.iter().map(|j| AgentId::Registry(*j)).collect();
        ids.extend([
            AgentId::Cra,
            AgentId::CorporationsCanada,
            AgentId::SafetyCompliance,
            AgentId::TradeHarmonization,
            AgentId::IndigenousRegistry,
            AgentId::IndigenousServices,
            AgentId::CrossJurisdictionCompliance,
            AgentId::FraudDetection,
        ]);
        for id in ids {
            assert_eq!(AgentId::from_slug(&id.slug()), Some(id), "slug {}", id.slug());
        }
    }

    #[test]
    fn from_slug_rejects_unknown() {
        assert_eq!(AgentId::from_slug("registry-zz"), None);
        assert_eq!(AgentId::from_slug("unknown"), None);
    }

    #[test]
    fn display_names_are_distinct() {
        let names: Vec<String> = Jurisdiction::ALL
            .iter()
            .map(|j| AgentId::Registry(*j).display_name())
            .collect();
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
