//! Confidence synthesis: weighted mean over agent results plus the fraud veto.
//!
//! Error results participate at the default weight with confidence 0, which
//! is how a failed or unreachable agency depresses the aggregate instead of
//! aborting the call. Results are ordered internally before summation so the
//! outcome depends only on the multiset of results, not arrival order.

use credence_types::{AgentResult, VerificationParams};

/// Synthesized verdict for one set of agent results.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Synthesis {
    pub verified: bool,
    /// Weighted mean confidence, clamped to [0,1].
    pub confidence: f64,
    /// True when a fraud risk score above the veto threshold forced
    /// `verified` to false.
    pub fraud_vetoed: bool,
}

/// Combine agent results into a single verdict.
///
/// `verified` requires the aggregate confidence to reach
/// `verified_threshold` and no fraud result to exceed
/// `fraud_veto_threshold`. An empty result set synthesizes to confidence 0.
pub fn synthesize(results: &[AgentResult], params: &VerificationParams) -> Synthesis {
    let mut ordered: Vec<&AgentResult> = results.iter().collect();
    ordered.sort_by(|a, b| a.kind().cmp(&b.kind()).then_with(|| a.agent.cmp(&b.agent)));

    let mut weighted = 0.0;
    let mut total_weight = 0.0;
    for result in &ordered {
        let weight = params.weights.weight_for(result.kind());
        weighted += weight * result.confidence;
        total_weight += weight;
    }

    let confidence = if total_weight > 0.0 {
        (weighted / total_weight).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let fraud_vetoed = ordered
        .iter()
        .any(|result| matches!(result.fraud_risk(), Some(risk) if risk > params.fraud_veto_threshold));

    Synthesis {
        verified: !fraud_vetoed && confidence >= params.verified_threshold,
        confidence,
        fraud_vetoed,
    }
}
