use std::time::Duration;

use log::{debug, info};

use crate::{
    rti::RtiAmbassador,
    time::{base_time::BaseTime, hlt_timeline::SharedLogicalTime, logical_time::LogicalTime},
    types::{FederateHandle, ResignReason},
};

use super::{
    error::FederateError, roster::FederationRoster, time_advance::TimeAdvanceState,
};

/// The local view of one federation member: identity, the known-federate
/// roster, time-management flags, and the request/grant advance loop.
pub struct Federate {
    federate_name: String,
    federation_name: String,
    base_time: BaseTime,
    rti: Box<dyn RtiAmbassador>,
    handle: Option<FederateHandle>,
    roster: FederationRoster,
    advance: TimeAdvanceState,
    granted: SharedLogicalTime,
    lookahead: LogicalTime,
    time_regulating: bool,
    time_constrained: bool,
}

impl Federate {
    pub fn new(
        rti: Box<dyn RtiAmbassador>,
        base_time: BaseTime,
        roster: FederationRoster,
        advance: TimeAdvanceState,
        granted: SharedLogicalTime,
    ) -> Self {
        Self {
            federate_name: String::new(),
            federation_name: String::new(),
            base_time,
            rti,
            handle: None,
            roster,
            advance,
            granted,
            lookahead: LogicalTime::from_ticks(1),
            time_regulating: false,
            time_constrained: false,
        }
    }

    pub fn federate_name(&self) -> &str {
        &self.federate_name
    }

    pub fn federation_name(&self) -> &str {
        &self.federation_name
    }

    pub fn handle(&self) -> Option<FederateHandle> {
        self.handle
    }

    pub fn is_joined(&self) -> bool {
        self.handle.is_some()
    }

    pub fn roster(&self) -> &FederationRoster {
        &self.roster
    }

    pub fn rti(&mut self) -> &mut dyn RtiAmbassador {
        self.rti.as_mut()
    }

    /// Join the federation. The returned handle identifies this federate
    /// for the life of the execution.
    pub fn join(
        &mut self,
        federation_name: &str,
        federate_name: &str,
        fom_modules: &[String],
        is_master: bool,
    ) -> Result<FederateHandle, FederateError> {
        if self.is_joined() {
            return Err(FederateError::AlreadyJoined {
                federate_name: self.federate_name.clone(),
                federation_name: self.federation_name.clone(),
            });
        }
        let handle = self
            .rti
            .join(federation_name, federate_name, fom_modules, is_master)?;
        self.federate_name = federate_name.to_string();
        self.federation_name = federation_name.to_string();
        self.handle = Some(handle);
        info!(
            "\"{}\" joined federation \"{}\" as {}{}",
            federate_name,
            federation_name,
            handle,
            if is_master { " (master)" } else { "" }
        );
        Ok(handle)
    }

    /// Resign from the federation, flushing outbound state. Time
    /// regulation is dropped first so no peer waits on a dead regulator.
    pub fn resign(&mut self, reason: ResignReason) -> Result<(), FederateError> {
        if !self.is_joined() {
            return Err(FederateError::NotJoined {
                federate_name: self.federate_name.clone(),
            });
        }
        if self.time_regulating {
            self.rti.disable_time_regulation()?;
            self.time_regulating = false;
        }
        self.rti.resign(reason)?;
        info!(
            "\"{}\" resigned from federation \"{}\"",
            self.federate_name, self.federation_name
        );
        self.handle = None;
        Ok(())
    }

    /// The federate's lookahead; at least one base-time tick whenever
    /// regulation is on.
    pub fn lookahead(&self) -> LogicalTime {
        self.lookahead
    }

    pub fn set_lookahead(&mut self, lookahead: LogicalTime) -> Result<(), FederateError> {
        if lookahead.ticks() < 1 {
            return Err(FederateError::LookaheadTooSmall {
                lookahead_ticks: lookahead.ticks(),
            });
        }
        self.lookahead = lookahead;
        Ok(())
    }

    /// Enable or disable time regulation. Idempotent; first enable locks
    /// the base-time unit for the life of the process.
    pub fn set_time_regulating(&mut self, enabled: bool) -> Result<(), FederateError> {
        if enabled == self.time_regulating {
            return Ok(());
        }
        if enabled {
            if self.lookahead.ticks() < 1 {
                return Err(FederateError::LookaheadTooSmall {
                    lookahead_ticks: self.lookahead.ticks(),
                });
            }
            self.rti.enable_time_regulation(self.lookahead)?;
            self.base_time.lock();
        } else {
            self.rti.disable_time_regulation()?;
        }
        self.time_regulating = enabled;
        debug!("time regulation {}", if enabled { "on" } else { "off" });
        Ok(())
    }

    pub fn is_time_regulating(&self) -> bool {
        self.time_regulating
    }

    /// Enable time constraint. Idempotent.
    pub fn set_time_constrained(&mut self, enabled: bool) -> Result<(), FederateError> {
        if enabled == self.time_constrained {
            return Ok(());
        }
        if enabled {
            self.rti.enable_time_constrained()?;
        }
        self.time_constrained = enabled;
        debug!("time constrained {}", if enabled { "on" } else { "off" });
        Ok(())
    }

    pub fn is_time_constrained(&self) -> bool {
        self.time_constrained
    }

    /// Ask the RTI to advance logical time. The grant arrives through the
    /// callback thread; pair with `wait_for_time_advance_grant`.
    pub fn request_time_advance(&mut self, time: LogicalTime) -> Result<(), FederateError> {
        self.advance.mark_request()?;
        self.rti.request_time_advance(time)?;
        Ok(())
    }

    /// Block until the outstanding advance is granted or the deadline
    /// passes. The granted time (never later than requested) becomes the
    /// federate's logical time.
    pub fn wait_for_time_advance_grant(
        &mut self,
        requested: LogicalTime,
        deadline: Duration,
    ) -> Result<LogicalTime, FederateError> {
        let granted = self.advance.wait_for_grant(requested, deadline)?;
        self.granted.set(granted);
        Ok(granted)
    }

    pub fn granted_time(&self) -> LogicalTime {
        self.granted.get()
    }

    /// Install a new base-time multiplier, rescaling the lookahead tick
    /// count so its duration in seconds is preserved.
    pub fn set_base_time_multiplier(&mut self, multiplier: i64) -> Result<(), FederateError> {
        let old_multiplier = self.base_time.multiplier();
        self.base_time.set_multiplier(multiplier)?;
        if old_multiplier != multiplier {
            let rescaled =
                (self.lookahead.ticks() as i128 * multiplier as i128 / old_multiplier as i128) as i64;
            self.lookahead = LogicalTime::from_ticks(rescaled.max(1));
            debug!(
                "base-time multiplier {} -> {}, lookahead now {} tick(s)",
                old_multiplier, multiplier, self.lookahead
            );
        }
        Ok(())
    }
}
