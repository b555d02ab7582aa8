//! Verification agents — the pluggable capability boundary.
//!
//! One agent per jurisdiction registry or specialist check. The orchestrator
//! depends only on the `VerificationAgent` trait, never on adapter internals:
//! what a registry lookup actually does (scraping, API calls, batch files) is
//! the adapter's business.

pub mod agent;
pub mod http;
pub mod registry;
pub mod selector;

pub use agent::{AgentError, HealthStatus, VerificationAgent};
pub use http::HttpAgent;
pub use registry::AgentRegistry;
pub use selector::select_agents;
