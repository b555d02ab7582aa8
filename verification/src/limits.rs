//! Two-tier per-caller rate limiting.
//!
//! High and critical urgency draw from a tight per-minute budget, normal
//! urgency from a looser per-hour budget. Budgets are per caller; anonymous
//! callers share one identity. A failing counter store fails open: fan-out
//! quota protection is not worth refusing service over.

use crate::error::VerifyError;
use credence_store::RateLimitStore;
use credence_types::{Urgency, VerificationParams};
use std::sync::Arc;
use tracing::warn;

/// Caller identity used when no caller id was supplied.
pub const ANONYMOUS_CALLER: &str = "anonymous";

/// One urgency tier's budget and window.
#[derive(Clone, Copy, Debug)]
struct TierBudget {
    tier: &'static str,
    budget: u64,
    window_secs: u64,
}

fn budget_for(urgency: Urgency, params: &VerificationParams) -> TierBudget {
    if urgency.is_critical_tier() {
        TierBudget {
            tier: "critical",
            budget: u64::from(params.critical_per_minute),
            window_secs: 60,
        }
    } else {
        TierBudget {
            tier: "normal",
            budget: u64::from(params.normal_per_hour),
            window_secs: 3_600,
        }
    }
}

/// The tier label a call draws from, as used in counter keys and metrics.
pub fn tier_label(urgency: Urgency) -> &'static str {
    if urgency.is_critical_tier() {
        "critical"
    } else {
        "normal"
    }
}

/// Rate limiter over an abstract counter store.
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
}

impl RateLimiter {
    pub fn new(store: Arc<dyn RateLimitStore>) -> Self {
        Self { store }
    }

    /// Record one call and enforce the tier budget.
    pub async fn check(
        &self,
        caller: Option<&str>,
        urgency: Urgency,
        params: &VerificationParams,
    ) -> Result<(), VerifyError> {
        let caller = caller.unwrap_or(ANONYMOUS_CALLER);
        let tier = budget_for(urgency, params);
        let key = format!("rate:{caller}:{}", tier.tier);

        let window = match self.store.incr(&key, tier.window_secs).await {
            Ok(window) => window,
            Err(e) => {
                warn!(key = %key, error = %e, "rate limit store unavailable, failing open");
                return Ok(());
            }
        };

        if window.count > tier.budget {
            return Err(VerifyError::RateLimited {
                caller: caller.to_string(),
                retry_after_secs: window.resets_in_secs,
            });
        }
        Ok(())
    }
}
