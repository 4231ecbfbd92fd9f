use std::{
    collections::HashSet,
    sync::{Arc, Condvar, Mutex},
    time::{Duration, Instant},
};

use log::info;

use super::error::FederateError;

/// One entry in the known-federate roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownFederate {
    pub name: String,
    pub required: bool,
}

impl KnownFederate {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
        }
    }

    pub fn optional(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
        }
    }
}

/// Tracks which known federates have been observed in the federation.
///
/// The RTI callback thread marks discoveries and resignations; the
/// simulator thread waits for the required subset with a deadline. The
/// federation may not leave INITIALIZING until every required federate is
/// present.
#[derive(Clone)]
pub struct FederationRoster {
    shared: Arc<RosterShared>,
}

struct RosterShared {
    state: Mutex<RosterState>,
    changed: Condvar,
}

struct RosterState {
    known: Vec<KnownFederate>,
    /// Members currently in the federation.
    joined: HashSet<String>,
    /// Members seen at least once. The required-federate gate checks
    /// observation, so a member resigning mid-handshake cannot un-satisfy
    /// an initialization that already saw it.
    observed: HashSet<String>,
}

impl FederationRoster {
    pub fn new(known: Vec<KnownFederate>) -> Self {
        Self {
            shared: Arc::new(RosterShared {
                state: Mutex::new(RosterState {
                    known,
                    joined: HashSet::new(),
                    observed: HashSet::new(),
                }),
                changed: Condvar::new(),
            }),
        }
    }

    /// Callback-thread entry: a federation member became visible.
    pub fn mark_joined(&self, federate_name: &str) {
        if let Ok(mut state) = self.shared.state.lock() {
            if state.joined.insert(federate_name.to_string()) {
                info!("federate \"{}\" observed in federation", federate_name);
            }
            state.observed.insert(federate_name.to_string());
            self.shared.changed.notify_all();
        }
    }

    /// Callback-thread entry: a member resigned.
    pub fn mark_resigned(&self, federate_name: &str) {
        if let Ok(mut state) = self.shared.state.lock() {
            state.joined.remove(federate_name);
            self.shared.changed.notify_all();
        }
    }

    pub fn is_joined(&self, federate_name: &str) -> bool {
        self.shared
            .state
            .lock()
            .map(|state| state.joined.contains(federate_name))
            .unwrap_or(false)
    }

    /// Required federates not yet observed.
    pub fn missing_required(&self) -> Vec<String> {
        self.shared
            .state
            .lock()
            .map(|state| {
                state
                    .known
                    .iter()
                    .filter(|entry| entry.required && !state.observed.contains(&entry.name))
                    .map(|entry| entry.name.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn all_required_present(&self) -> bool {
        self.missing_required().is_empty()
    }

    /// Block until every required federate is observed or the deadline
    /// passes.
    pub fn wait_for_required(&self, deadline: Duration) -> Result<(), FederateError> {
        let started = Instant::now();
        let mut state = self
            .shared
            .state
            .lock()
            .map_err(|_| FederateError::LockPoisoned)?;
        loop {
            let missing: Vec<String> = state
                .known
                .iter()
                .filter(|entry| entry.required && !state.observed.contains(&entry.name))
                .map(|entry| entry.name.clone())
                .collect();
            if missing.is_empty() {
                return Ok(());
            }
            let elapsed = started.elapsed();
            if elapsed >= deadline {
                return Err(FederateError::RequiredFederatesMissing {
                    missing,
                    waited: elapsed,
                });
            }
            let (guard, _) = self
                .shared
                .changed
                .wait_timeout(state, deadline - elapsed)
                .map_err(|_| FederateError::LockPoisoned)?;
            state = guard;
        }
    }
}
