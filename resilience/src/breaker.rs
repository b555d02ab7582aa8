//! Per-agent circuit breaker.
//!
//! The breaker map is the only state shared across concurrent verify calls.
//! Failures are counted in a fixed window; crossing the threshold opens the
//! circuit, which short-circuits calls until the cooldown elapses, after
//! which a single trial call decides between closing and re-opening.
//!
//! All time-dependent methods take an explicit `now` so tests never sleep.

use credence_types::Timestamp;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Breaker state, per agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CircuitState {
    /// Calls pass through; failures are counted.
    Closed,
    /// Calls short-circuit without reaching the agent.
    Open,
    /// Cooldown elapsed; one trial call is in flight.
    HalfOpen,
}

impl CircuitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CircuitState::Closed => "closed",
            CircuitState::Open => "open",
            CircuitState::HalfOpen => "half-open",
        }
    }
}

/// A state change worth reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Failure threshold crossed, or the half-open trial failed.
    Opened,
    /// Cooldown elapsed; a trial call was admitted.
    HalfOpened,
    /// The trial call succeeded.
    Closed,
}

impl Transition {
    pub fn state(&self) -> CircuitState {
        match self {
            Transition::Opened => CircuitState::Open,
            Transition::HalfOpened => CircuitState::HalfOpen,
            Transition::Closed => CircuitState::Closed,
        }
    }
}

/// Outcome of the breaker gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gate {
    /// The call may proceed. Carries the half-open transition if this call
    /// is the trial.
    Allow(Option<Transition>),
    /// The call must short-circuit. Carries the state that refused it.
    Deny(CircuitState),
}

impl Gate {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Gate::Allow(_))
    }
}

#[derive(Clone, Copy, Debug)]
pub struct BreakerConfig {
    /// Failures within the window before the circuit opens.
    pub failure_threshold: u32,
    /// Width of the failure-counting window in seconds.
    pub window_secs: u64,
    /// Seconds the circuit stays open before admitting a trial call.
    pub cooldown_secs: u64,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            window_secs: 60,
            cooldown_secs: 30,
        }
    }
}

struct BreakerInner {
    state: CircuitState,
    failures: u32,
    window_start: Option<Timestamp>,
    opened_at: Option<Timestamp>,
}

/// Circuit breaker for one agent.
///
/// The lock is held only for the state update, never across an await.
pub struct CircuitBreaker {
    config: BreakerConfig,
    inner: Mutex<BreakerInner>,
}

impl CircuitBreaker {
    pub fn new(config: BreakerConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                failures: 0,
                window_start: None,
                opened_at: None,
            }),
        }
    }

    pub fn state(&self) -> CircuitState {
        self.inner.lock().expect("breaker lock poisoned").state
    }

    /// Gate a call. Must be called before invoking the agent; the caller
    /// is obligated to report the outcome via `record_success_at` or
    /// `record_failure_at` whenever the gate allows.
    pub fn check_at(&self, now: Timestamp) -> Gate {
        let mut inner = self.inner.lock().expect("breaker lock poisoned");
        match inner.state {
            CircuitState::Closed => Gate::Allow(None),
            CircuitState::HalfOpen => {
                // The trial call is already in flight; everyone else waits.
                Gate::Deny(CircuitState::HalfOpen)
            }
            CircuitState::Open => {
                let opened_at = inner.opened_at.unwrap_or(Timestamp::EPOCH);
                if opened_at.has_expired(self.config.cooldown_secs, now) {
                    inner.state = CircuitState::HalfOpen;
                    Gate::Allow(Some(Transition::HalfOpened))
                } else {
                    Gate::Deny(CircuitState::Open)
                }
            }
        }
    }

    /// Report a successful call.
    pub fn record_success_at(&self, _now: Timestamp) -> Option<Transition> {
        let mut inner = self.inner.lock().expect("breaker lock poisoned");
        match inner.state {
            CircuitState::HalfOpen => {
                inner.state = CircuitState::Closed;
                inner.failures = 0;
                inner.window_start = None;
                inner.opened_at = None;
                Some(Transition::Closed)
            }
            _ => None,
        }
    }

    /// Report a failed call (after the wrapper exhausted its attempts).
    pub fn record_failure_at(&self, now: Timestamp) -> Option<Transition> {
        let mut inner = self.inner.lock().expect("breaker lock poisoned");
        match inner.state {
            CircuitState::HalfOpen => {
                // Trial failed; restart the cooldown.
                inner.state = CircuitState::Open;
                inner.failures = 0;
                inner.window_start = None;
                inner.opened_at = Some(now);
                Some(Transition::Opened)
            }
            CircuitState::Open => None,
            CircuitState::Closed => {
                match inner.window_start {
                    Some(start) if !start.has_expired(self.config.window_secs, now) => {
                        inner.failures += 1;
                    }
                    _ => {
                        inner.window_start = Some(now);
                        inner.failures = 1;
                    }
                }
                if inner.failures >= self.config.failure_threshold {
                    inner.state = CircuitState::Open;
                    inner.opened_at = Some(now);
                    Some(Transition::Opened)
                } else {
                    None
                }
            }
        }
    }

    // Wall-clock wrappers used outside tests.

    pub fn check(&self) -> Gate {
        self.check_at(Timestamp::now())
    }

    pub fn record_success(&self) -> Option<Transition> {
        self.record_success_at(Timestamp::now())
    }

    pub fn record_failure(&self) -> Option<Transition> {
        self.record_failure_at(Timestamp::now())
    }
}

/// Lazily-populated map of one breaker per agent, shared by all calls.
#[derive(Default)]
pub struct BreakerMap {
    config: BreakerConfig,
    breakers: Mutex<HashMap<String, Arc<CircuitBreaker>>>,
}

impl BreakerMap {
    pub fn new(config: BreakerConfig) -> Self {
        Self {
            config,
            breakers: Mutex::new(HashMap::new()),
        }
    }

    /// Breaker for the given agent key (its slug), created closed on first use.
    pub fn breaker_for(&self, key: &str) -> Arc<CircuitBreaker> {
        let mut map = self.breakers.lock().expect("breaker map lock poisoned");
        map.entry(key.to_string())
            .or_insert_with(|| Arc::new(CircuitBreaker::new(self.config)))
            .clone()
    }

    /// Snapshot of all known breaker states, sorted by key.
    pub fn states(&self) -> Vec<(String, CircuitState)> {
        let map = self.breakers.lock().expect("breaker map lock poisoned");
        let mut states: Vec<(String, CircuitState)> = map
            .iter()
            .map(|(key, breaker)| (key.clone(), breaker.state()))
            .collect();
        states.sort_by(|a, b| a.0.cmp(&b.0));
        states
    }
}
