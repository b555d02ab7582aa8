//! Agent selection — a pure function of the request.
//!
//! The selected set is the source of the `systemsChecked` list reported in
//! every result, so the rules here are part of the public contract and must
//! stay deterministic.

use credence_types::{AgentId, Jurisdiction, VerificationRequest};
use std::collections::BTreeSet;

/// Decide which agents to consult for a request.
///
/// Rules:
/// - the home-jurisdiction registry, CRA, Corporations Canada, the safety
///   specialist, and the fraud screen are always included;
/// - a registry agent is added for every jurisdiction referenced by a
///   worker's operating jurisdictions or certification issuers;
/// - the indigenous specialists (registry and federal directory) are
///   included only when an indigenous partnership is declared;
/// - trade harmonization is included only when workers or trade
///   qualifications are present;
/// - cross-jurisdiction compliance is included only when more than one
///   registry jurisdiction ended up selected.
///
/// Returned in the stable `AgentId` order.
pub fn select_agents(request: &VerificationRequest) -> Vec<AgentId> {
    let mut selected: BTreeSet<AgentId> = BTreeSet::new();
    let mut jurisdictions: BTreeSet<Jurisdiction> = BTreeSet::new();

    jurisdictions.insert(request.location.jurisdiction);
    for worker in &request.workers {
        for j in &worker.jurisdictions {
            jurisdictions.insert(*j);
        }
        for cert in &worker.certifications {
            jurisdictions.insert(cert.issuing_jurisdiction);
        }
    }
    for j in &jurisdictions {
        selected.insert(AgentId::Registry(*j));
    }

    // Mandatory for every request.
    selected.insert(AgentId::Cra);
    selected.insert(AgentId::CorporationsCanada);
    selected.insert(AgentId::SafetyCompliance);
    selected.insert(AgentId::FraudDetection);

    if request.indigenous_partnership.is_some() {
        selected.insert(AgentId::IndigenousRegistry);
        selected.insert(AgentId::IndigenousServices);
    }

    if !request.workers.is_empty() || !request.trade_qualifications.is_empty() {
        selected.insert(AgentId::TradeHarmonization);
    }

    if jurisdictions.len() > 1 {
        selected.insert(AgentId::CrossJurisdictionCompliance);
    }

    selected.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use credence_types::{
        BusinessLocation, Certification, IndigenousPartnership, Worker,
    };

    fn base_request(jurisdiction: Jurisdiction) -> VerificationRequest {
        VerificationRequest {
            business_name: "Northern Lights Construction".to_string(),
            business_number: None,
            location: BusinessLocation {
                jurisdiction,
                city: None,
            },
            workers: Vec::new(),
            indigenous_partnership: None,
            project: None,
            trade_qualifications: Vec::new(),
        }
    }

    fn worker_in(jurisdictions: Vec<Jurisdiction>) -> Worker {
        Worker {
            name: "Jordan Smith".to_string(),
            trades: vec!["electrician".to_string()],
            jurisdictions,
            certifications: Vec::new(),
        }
    }

    #[test]
    fn minimal_request_gets_mandatory_five() {
        let selected = select_agents(&base_request(Jurisdiction::ON));
        assert_eq!(
            selected,
            vec![
                AgentId::Registry(Jurisdiction::ON),
                AgentId::Cra,
                AgentId::CorporationsCanada,
                AgentId::SafetyCompliance,
                AgentId::FraudDetection,
            ]
        );
    }

    #[test]
    fn worker_jurisdictions_add_registries_and_trade() {
        let mut request = base_request(Jurisdiction::ON);
        request.workers = vec![worker_in(vec![Jurisdiction::BC, Jurisdiction::AB])];

        let selected = select_agents(&request);
        assert!(selected.contains(&AgentId::Registry(Jurisdiction::ON)));
        assert!(selected.contains(&AgentId::Registry(Jurisdiction::BC)));
        assert!(selected.contains(&AgentId::Registry(Jurisdiction::AB)));
        assert!(selected.contains(&AgentId::TradeHarmonization));
        assert!(selected.contains(&AgentId::CrossJurisdictionCompliance));
    }

    #[test]
    fn certification_issuer_adds_registry() {
        let mut request = base_request(Jurisdiction::NS);
        let mut worker = worker_in(vec![Jurisdiction::NS]);
        worker.certifications = vec![Certification {
            cert_type: "electrician".to_string(),
            number: "E-12345".to_string(),
            issuing_jurisdiction: Jurisdiction::NB,
            expiry: None,
            red_seal: true,
        }];
        request.workers = vec![worker];

        let selected = select_agents(&request);
        assert!(selected.contains(&AgentId::Registry(Jurisdiction::NB)));
        assert!(selected.contains(&AgentId::CrossJurisdictionCompliance));
    }

    #[test]
    fn indigenous_partnership_adds_both_specialists() {
        let mut request = base_request(Jurisdiction::MB);
        request.indigenous_partnership = Some(IndigenousPartnership {
            partner_name: "Aski Holdings".to_string(),
            community: Some("Opaskwayak Cree Nation".to_string()),
            ownership_percent: Some(51.0),
        });

        let selected = select_agents(&request);
        assert!(selected.contains(&AgentId::IndigenousRegistry));
        assert!(selected.contains(&AgentId::IndigenousServices));
    }

    #[test]
    fn no_indigenous_specialists_without_partnership() {
        let selected = select_agents(&base_request(Jurisdiction::MB));
        assert!(!selected.contains(&AgentId::IndigenousRegistry));
        assert!(!selected.contains(&AgentId::IndigenousServices));
    }

    #[test]
    fn trade_qualifications_alone_add_trade_agent() {
        let mut request = base_request(Jurisdiction::SK);
        request.trade_qualifications = vec!["welder".to_string()];

        let selected = select_agents(&request);
        assert!(selected.contains(&AgentId::TradeHarmonization));
        // Only one jurisdiction in play.
        assert!(!selected.contains(&AgentId::CrossJurisdictionCompliance));
    }

    #[test]
    fn single_jurisdiction_workers_skip_cross_jurisdiction() {
        let mut request = base_request(Jurisdiction::QC);
        request.workers = vec![worker_in(vec![Jurisdiction::QC])];

        let selected = select_agents(&request);
        assert!(!selected.contains(&AgentId::CrossJurisdictionCompliance));
    }

    #[test]
    fn selection_is_deterministic() {
        let mut request = base_request(Jurisdiction::ON);
        request.workers = vec![
            worker_in(vec![Jurisdiction::YT, Jurisdiction::BC]),
            worker_in(vec![Jurisdiction::AB]),
        ];
        let a = select_agents(&request);
        let b = select_agents(&request);
        assert_eq!(a, b);
        let mut sorted = a.clone();
        sorted.sort();
        assert_eq!(a, sorted);
    }

    #[test]
    fn every_request_selects_at_least_four() {
        for j in Jurisdiction::ALL {
            let selected = select_agents(&base_request(j));
            assert!(selected.len() >= 4, "jurisdiction {j} selected {}", selected.len());
        }
    }
}
