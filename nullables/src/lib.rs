//! Nullable infrastructure for deterministic testing.
//!
//! All external dependencies of the verification pipeline (clock, agents,
//! metrics) have scriptable stand-ins here that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network
//!
//! The in-memory store backends live with their traits in `credence-store`;
//! this crate covers the collaborators that need scripting rather than
//! storage.

pub mod agent;
pub mod clock;
pub mod metrics;

pub use agent::{CallCounter, NullAgent};
pub use clock::NullClock;
pub use metrics::RecordingMetrics;
