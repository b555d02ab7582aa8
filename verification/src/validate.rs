//! Request validation and sanitization.
//!
//! `sanitize_request` is the only gate between caller input and everything
//! downstream: agents, cache keys, and audit records all see the cleaned
//! request, never the raw one. Names are stripped of markup characters and
//! collapsed to single spaces; business numbers are normalized to the
//! federal BN-15 shape (nine digits, program identifier, four digits).

use crate::error::VerifyError;
use credence_types::VerificationRequest;

/// Upper bound for business, worker, partner, and project names.
pub const MAX_NAME_LEN: usize = 200;

/// BN-15 program identifiers the federal registry issues.
pub const BN_PROGRAM_IDS: [&str; 4] = ["RC", "RM", "RP", "RT"];

/// Validate a request and return the sanitized copy used for the rest of
/// the call. The original request is never mutated.
pub fn sanitize_request(
    request: &VerificationRequest,
) -> Result<VerificationRequest, VerifyError> {
    let mut sanitized = request.clone();

    sanitized.business_name = clean_name(&request.business_name);
    if sanitized.business_name.is_empty() {
        return Err(VerifyError::validation("businessName", "must not be empty"));
    }
    if sanitized.business_name.len() > MAX_NAME_LEN {
        return Err(VerifyError::validation(
            "businessName",
            format!("exceeds {MAX_NAME_LEN} characters"),
        ));
    }

    if let Some(raw) = &request.business_number {
        let normalized = normalize_business_number(raw)
            .map_err(|reason| VerifyError::Validation {
                field: "businessNumber",
                reason,
            })?;
        sanitized.business_number = Some(normalized);
    }

    if let Some(city) = &sanitized.location.city {
        let city = clean_name(city);
        sanitized.location.city = if city.is_empty() { None } else { Some(city) };
    }

    for (index, worker) in sanitized.workers.iter_mut().enumerate() {
        worker.name = clean_name(&worker.name);
        if worker.name.is_empty() {
            return Err(VerifyError::Validation {
                field: "workers",
                reason: format!("worker {index}: name must not be empty"),
            });
        }
        if worker.name.len() > MAX_NAME_LEN {
            return Err(VerifyError::Validation {
                field: "workers",
                reason: format!("worker {index}: name exceeds {MAX_NAME_LEN} characters"),
            });
        }
        worker.trades = clean_list(&worker.trades);
    }

    if let Some(partnership) = sanitized.indigenous_partnership.as_mut() {
        partnership.partner_name = clean_name(&partnership.partner_name);
        if partnership.partner_name.is_empty() {
            return Err(VerifyError::validation(
                "indigenousPartnership",
                "partnerName must not be empty",
            ));
        }
        if let Some(percent) = partnership.ownership_percent {
            if !percent.is_finite() || !(0.0..=100.0).contains(&percent) {
                return Err(VerifyError::Validation {
                    field: "indigenousPartnership",
                    reason: format!("ownershipPercent {percent} out of [0,100]"),
                });
            }
        }
    }

    if let Some(project) = sanitized.project.as_mut() {
        project.name = clean_name(&project.name);
        if project.name.is_empty() {
            return Err(VerifyError::validation("project", "name must not be empty"));
        }
        if let Some(value) = project.value {
            if !value.is_finite() || value < 0.0 {
                return Err(VerifyError::Validation {
                    field: "project",
                    reason: format!("value {value} must be a non-negative number"),
                });
            }
        }
    }

    sanitized.trade_qualifications = clean_list(&sanitized.trade_qualifications);

    Ok(sanitized)
}

/// Strip markup characters and collapse runs of whitespace to single spaces.
fn clean_name(raw: &str) -> String {
    let stripped: String = raw
        .chars()
        .map(|c| if matches!(c, '<' | '>' | '\u{0}') { ' ' } else { c })
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn clean_list(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|entry| clean_name(entry))
        .filter(|entry| !entry.is_empty())
        .collect()
}

/// Upper-case, strip interior whitespace, then require the BN-15 shape.
fn normalize_business_number(raw: &str) -> Result<String, String> {
    let normalized: String = raw
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_uppercase();
    if is_bn15(&normalized) {
        Ok(normalized)
    } else {
        Err(format!(
            "{raw:?} is not a BN-15 (nine digits, one of {}, four digits)",
            BN_PROGRAM_IDS.join("/")
        ))
    }
}

fn is_bn15(candidate: &str) -> bool {
    let bytes = candidate.as_bytes();
    bytes.len() == 15
        && bytes[..9].iter().all(u8::is_ascii_digit)
        && BN_PROGRAM_IDS.contains(&&candidate[9..11])
        && bytes[11..].iter().all(u8::is_ascii_digit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use credence_types::{
        BusinessLocation, IndigenousPartnership, Jurisdiction, ProjectDetails, Worker,
    };

    fn request(name: &str) -> VerificationRequest {
        VerificationRequest {
            business_name: name.to_string(),
            business_number: None,
            location: BusinessLocation {
                jurisdiction: Jurisdiction::ON,
                city: None,
            },
            workers: Vec::new(),
            indigenous_partnership: None,
            project: None,
            trade_qualifications: Vec::new(),
        }
    }

    #[test]
    fn clean_request_passes_through() {
        let sanitized = sanitize_request(&request("Northern Lights Contracting")).unwrap();
        assert_eq!(sanitized.business_name, "Northern Lights Contracting");
    }

    #[test]
    fn markup_is_stripped_and_whitespace_collapsed() {
        let sanitized =
            sanitize_request(&request("  <b>Tundra</b>   Electrical \t Ltd ")).unwrap();
        assert_eq!(sanitized.business_name, "b Tundra /b Electrical Ltd");
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = sanitize_request(&request("  <> ")).unwrap_err();
        match err {
            VerifyError::Validation { field, .. } => assert_eq!(field, "businessName"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn oversized_name_is_rejected() {
        let err = sanitize_request(&request(&"x".repeat(MAX_NAME_LEN + 1))).unwrap_err();
        assert!(matches!(
            err,
            VerifyError::Validation {
                field: "businessName",
                ..
            }
        ));
    }

    #[test]
    fn business_number_is_normalized() {
        let mut req = request("Keewatin Mechanical");
        req.business_number = Some(" 123456789 rc 0001 ".to_string());
        let sanitized = sanitize_request(&req).unwrap();
        assert_eq!(sanitized.business_number.as_deref(), Some("123456789RC0001"));
    }

    #[test]
    fn business_number_accepts_every_program_id() {
        for program in BN_PROGRAM_IDS {
            let mut req = request("Keewatin Mechanical");
            req.business_number = Some(format!("987654321{program}0002"));
            assert!(sanitize_request(&req).is_ok(), "program {program}");
        }
    }

    #[test]
    fn malformed_business_numbers_are_rejected() {
        for bad in [
            "12345678RC0001",   // eight leading digits
            "123456789RX0001",  // unknown program
            "123456789RC001",   // three trailing digits
            "123456789RC00012", // sixteen characters
            "ABCDEFGHIRC0001",  // letters where digits belong
            "",
        ] {
            let mut req = request("Keewatin Mechanical");
            req.business_number = Some(bad.to_string());
            let err = sanitize_request(&req).unwrap_err();
            assert!(
                matches!(
                    err,
                    VerifyError::Validation {
                        field: "businessNumber",
                        ..
                    }
                ),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn worker_names_are_sanitized_and_required() {
        let mut req = request("Keewatin Mechanical");
        req.workers = vec![
            Worker {
                name: "  A.   Smith ".to_string(),
                trades: vec!["Electrician".to_string(), "  ".to_string()],
                jurisdictions: vec![Jurisdiction::MB],
                certifications: Vec::new(),
            },
            Worker {
                name: "<>".to_string(),
                trades: Vec::new(),
                jurisdictions: Vec::new(),
                certifications: Vec::new(),
            },
        ];
        let err = sanitize_request(&req).unwrap_err();
        match err {
            VerifyError::Validation { field, reason } => {
                assert_eq!(field, "workers");
                assert!(reason.contains("worker 1"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }

        req.workers.pop();
        let sanitized = sanitize_request(&req).unwrap();
        assert_eq!(sanitized.workers[0].name, "A. Smith");
        assert_eq!(sanitized.workers[0].trades, vec!["Electrician".to_string()]);
    }

    #[test]
    fn ownership_percent_must_be_in_range() {
        for bad in [-1.0, 100.5, f64::NAN, f64::INFINITY] {
            let mut req = request("Keewatin Mechanical");
            req.indigenous_partnership = Some(IndigenousPartnership {
                partner_name: "Nunavut Development Corp".to_string(),
                community: None,
                ownership_percent: Some(bad),
            });
            assert!(sanitize_request(&req).is_err(), "accepted {bad}");
        }

        let mut req = request("Keewatin Mechanical");
        req.indigenous_partnership = Some(IndigenousPartnership {
            partner_name: "Nunavut Development Corp".to_string(),
            community: Some("Rankin Inlet".to_string()),
            ownership_percent: Some(51.0),
        });
        assert!(sanitize_request(&req).is_ok());
    }

    #[test]
    fn project_value_must_be_non_negative() {
        let mut req = request("Keewatin Mechanical");
        req.project = Some(ProjectDetails {
            name: "Arena Retrofit".to_string(),
            location: None,
            value: Some(-5000.0),
            required_certifications: Vec::new(),
        });
        assert!(matches!(
            sanitize_request(&req).unwrap_err(),
            VerifyError::Validation { field: "project", .. }
        ));
    }

    #[test]
    fn empty_city_collapses_to_none() {
        let mut req = request("Keewatin Mechanical");
        req.location.city = Some("   ".to_string());
        let sanitized = sanitize_request(&req).unwrap();
        assert_eq!(sanitized.location.city, None);
    }
}
