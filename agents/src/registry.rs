//! Agent registry — the live implementations, keyed by identity.
//!
//! Built once at process start, then shared read-only behind an `Arc`.
//! Selected agents the registry has no implementation for are reported as
//! error results by the orchestrator, not dropped.

use crate::agent::VerificationAgent;
use credence_types::AgentId;
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable map from agent identity to implementation.
#[derive(Default)]
pub struct AgentRegistry {
    agents: HashMap<AgentId, Arc<dyn VerificationAgent>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self {
            agents: HashMap::new(),
        }
    }

    /// Register an implementation under its own id. Replaces any previous
    /// registration for the same id.
    pub fn register(&mut self, agent: Arc<dyn VerificationAgent>) {
        self.agents.insert(agent.id(), agent);
    }

    pub fn get(&self, id: AgentId) -> Option<Arc<dyn VerificationAgent>> {
        self.agents.get(&id).cloned()
    }

    pub fn contains(&self, id: AgentId) -> bool {
        self.agents.contains_key(&id)
    }

    /// All registered identities, in stable order.
    pub fn ids(&self) -> Vec<AgentId> {
        let mut ids: Vec<AgentId> = self.agents.keys().copied().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
