use std::{
    sync::{Arc, Condvar, Mutex},
    time::{Duration, Instant},
};

use crate::time::logical_time::LogicalTime;

use super::error::FederateError;

/// The grant handshake between the simulator thread and the RTI callback
/// thread.
///
/// The simulator thread requests an advance and blocks in
/// `wait_for_grant`; the callback thread delivers the grant and signals.
/// Time advance is requested, never immediate: the granted time may be
/// earlier than the requested one and becomes the federate's logical time.
#[derive(Clone, Default)]
pub struct TimeAdvanceState {
    shared: Arc<AdvanceShared>,
}

#[derive(Default)]
struct AdvanceShared {
    state: Mutex<AdvanceInner>,
    granted_signal: Condvar,
}

#[derive(Default)]
struct AdvanceInner {
    granted: LogicalTime,
    advance_pending: bool,
}

impl TimeAdvanceState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulator-thread entry: an advance request went out.
    pub fn mark_request(&self) -> Result<(), FederateError> {
        let mut state = self
            .shared
            .state
            .lock()
            .map_err(|_| FederateError::LockPoisoned)?;
        state.advance_pending = true;
        Ok(())
    }

    /// Callback-thread entry: the RTI granted an advance. Logical time
    /// never runs backwards, so grants are monotonic (a late joiner's
    /// regulation-enable grant may outrank its first cycle grants).
    pub fn grant_arrived(&self, granted: LogicalTime) {
        if let Ok(mut state) = self.shared.state.lock() {
            state.granted = state.granted.max(granted);
            state.advance_pending = false;
            self.shared.granted_signal.notify_all();
        }
    }

    pub fn granted(&self) -> LogicalTime {
        self.shared
            .state
            .lock()
            .map(|state| state.granted)
            .unwrap_or(LogicalTime::ZERO)
    }

    pub fn advance_pending(&self) -> bool {
        self.shared
            .state
            .lock()
            .map(|state| state.advance_pending)
            .unwrap_or(false)
    }

    /// Block until the outstanding request is granted or the deadline
    /// passes. Returns the granted time.
    pub fn wait_for_grant(
        &self,
        requested: LogicalTime,
        deadline: Duration,
    ) -> Result<LogicalTime, FederateError> {
        let started = Instant::now();
        let mut state = self
            .shared
            .state
            .lock()
            .map_err(|_| FederateError::LockPoisoned)?;
        loop {
            if !state.advance_pending {
                return Ok(state.granted);
            }
            let elapsed = started.elapsed();
            if elapsed >= deadline {
                return Err(FederateError::GrantTimeout {
                    requested,
                    waited: elapsed,
                });
            }
            let (guard, _) = self
                .shared
                .granted_signal
                .wait_timeout(state, deadline - elapsed)
                .map_err(|_| FederateError::LockPoisoned)?;
            state = guard;
        }
    }
}
