use log::{info, warn};

use crate::{
    exco::ExcoSnapshot,
    sync::labels,
    time::{
        base_time::BaseTime, logical_time::LogicalTime, scenario_timeline::ScenarioTimeline,
        timeline::Timeline,
    },
};

use super::{
    error::ExecutionError,
    mode::{ExecutionMode, MtrMode},
    mtr::ModeTransitionRequest,
};

/// Outcome of master arbitration over one received MTR.
#[derive(Debug, Clone, PartialEq)]
pub enum MtrDisposition {
    /// The request becomes the pending transition, gated by the named
    /// sync point.
    Accepted { sync_point_label: &'static str },
    /// The request was discarded (and logged); no state changed.
    Rejected { reason: String },
}

/// The distributed execution-mode state machine, one per federate.
///
/// The master arbitrates Mode Transition Requests and owns the ExCO's
/// `next_execution_mode`; every other federate adopts transitions from the
/// replicated ExCO. All methods run on the simulator thread.
pub struct ExecutionControl {
    base_time: BaseTime,
    is_master: bool,
    current_mode: ExecutionMode,
    next_mode: ExecutionMode,
    pending_mtr: Option<ModeTransitionRequest>,
    least_common_time_step: LogicalTime,
    next_mode_scenario_time: Option<f64>,
    next_mode_cte_time: f64,
    dropped_parameters: u64,
}

impl ExecutionControl {
    pub fn new(base_time: BaseTime, is_master: bool) -> Self {
        Self {
            base_time,
            is_master,
            current_mode: ExecutionMode::Uninitialized,
            next_mode: ExecutionMode::Uninitialized,
            pending_mtr: None,
            least_common_time_step: LogicalTime::ZERO,
            next_mode_scenario_time: None,
            next_mode_cte_time: 0.0,
            dropped_parameters: 0,
        }
    }

    pub fn is_master(&self) -> bool {
        self.is_master
    }

    pub fn current_mode(&self) -> ExecutionMode {
        self.current_mode
    }

    pub fn next_mode(&self) -> ExecutionMode {
        self.next_mode
    }

    pub fn least_common_time_step(&self) -> LogicalTime {
        self.least_common_time_step
    }

    pub fn set_least_common_time_step(&mut self, step: LogicalTime) {
        self.least_common_time_step = step;
    }

    pub fn next_mode_scenario_time(&self) -> Option<f64> {
        self.next_mode_scenario_time
    }

    pub fn next_mode_cte_time(&self) -> f64 {
        self.next_mode_cte_time
    }

    pub fn pending_mtr(&self) -> Option<&ModeTransitionRequest> {
        self.pending_mtr.as_ref()
    }

    /// Parameters dropped from malformed interactions so far.
    pub fn dropped_parameters(&self) -> u64 {
        self.dropped_parameters
    }

    pub fn count_dropped_parameters(&mut self, dropped: usize) {
        self.dropped_parameters += dropped as u64;
    }

    /// Local start: leave UNINITIALIZED. The caller registers the
    /// `initialization_started` sync point around this call.
    pub fn begin_initializing(&mut self) {
        info!("execution mode UNINITIALIZED -> INITIALIZING");
        self.current_mode = ExecutionMode::Initializing;
        self.next_mode = ExecutionMode::Running;
    }

    /// Initialization handshake finished: the federation runs.
    pub fn complete_initialization(&mut self) {
        info!("execution mode INITIALIZING -> RUNNING");
        self.current_mode = ExecutionMode::Running;
        self.next_mode = ExecutionMode::Running;
        self.next_mode_scenario_time = None;
    }

    /// The sync point that gates a given transition request.
    pub fn sync_point_label_for(mtr_mode: MtrMode) -> Option<&'static str> {
        match mtr_mode {
            MtrMode::GotoRun => Some(labels::MTR_RUN),
            MtrMode::GotoFreeze => Some(labels::MTR_FREEZE),
            MtrMode::GotoShutdown => Some(labels::MTR_SHUTDOWN),
            MtrMode::Uninitialized | MtrMode::Initializing => None,
        }
    }

    /// Master arbitration over one received MTR.
    ///
    /// First received wins: while a transition is pending every further
    /// request is rejected. Accepted requests fix the transition boundary:
    /// the requested scenario time if it is still in the future, otherwise
    /// now plus one LCTS, in both cases rounded up to the next LCTS
    /// boundary; the CTE timeline is sampled for `next_mode_cte_time`.
    pub fn receive_mtr(
        &mut self,
        request: ModeTransitionRequest,
        scenario_timeline: &ScenarioTimeline,
        cte_now: f64,
    ) -> Result<MtrDisposition, ExecutionError> {
        if !self.is_master {
            return Err(ExecutionError::NotMaster {
                operation: "arbitrate mode transition requests",
            });
        }

        if let Some(pending) = &self.pending_mtr {
            let reason = format!(
                "{} rejected: {} already pending",
                request.execution_mode, pending.execution_mode
            );
            warn!("{}", reason);
            return Ok(MtrDisposition::Rejected { reason });
        }

        if !request.execution_mode.is_valid_from(self.current_mode) {
            let reason = format!(
                "{} rejected: invalid from {}",
                request.execution_mode, self.current_mode
            );
            warn!("{}", reason);
            return Ok(MtrDisposition::Rejected { reason });
        }

        let sync_point_label = Self::sync_point_label_for(request.execution_mode).ok_or(
            ExecutionError::ProtocolViolation {
                detail: format!("{} has no gating sync point", request.execution_mode),
            },
        )?;

        let scenario_now = scenario_timeline.time();
        let requested = if request.scenario_time > scenario_now {
            request.scenario_time
        } else {
            scenario_now + self.least_common_time_step.to_seconds(&self.base_time)
        };
        let boundary_hlt = scenario_timeline
            .compute_hlt(requested)
            .round_up_to(self.least_common_time_step.ticks());
        let boundary_scenario_time = scenario_timeline.time_from_hlt(boundary_hlt);

        self.next_mode = request.execution_mode.target_mode();
        self.next_mode_scenario_time = Some(boundary_scenario_time);
        self.next_mode_cte_time = cte_now;
        self.pending_mtr = Some(request);

        info!(
            "accepted {} -> {} at scenario time {}",
            self.current_mode, self.next_mode, boundary_scenario_time
        );
        Ok(MtrDisposition::Accepted { sync_point_label })
    }

    /// Joiner path: adopt the master's view from a freshly replicated
    /// ExCO. The base-time multiplier must match the local configuration;
    /// a mismatch is a fatal protocol error.
    pub fn apply_replicated_exco(&mut self, snapshot: &ExcoSnapshot) -> Result<(), ExecutionError> {
        let local = self.base_time.multiplier();
        if snapshot.hla_base_time_multiplier != local {
            return Err(ExecutionError::BaseTimeMismatch {
                local,
                remote: snapshot.hla_base_time_multiplier,
            });
        }

        self.least_common_time_step = snapshot.least_common_time_step;
        if snapshot.next_execution_mode != self.next_mode {
            info!(
                "replicated ExCO: next mode {} at scenario time {}",
                snapshot.next_execution_mode, snapshot.next_mode_scenario_time
            );
        }
        self.next_mode = snapshot.next_execution_mode;
        self.next_mode_scenario_time = Some(snapshot.next_mode_scenario_time);
        self.next_mode_cte_time = snapshot.next_mode_cte_time;
        Ok(())
    }

    /// Whether a pending freeze/run boundary has been reached at the
    /// given scenario time.
    pub fn reached_transition_boundary(&self, scenario_now: f64) -> bool {
        match (self.transition_pending(), self.next_mode_scenario_time) {
            (true, Some(boundary)) => scenario_now >= boundary,
            _ => false,
        }
    }

    /// A mode change is pending when next differs from current (except
    /// the implicit INITIALIZING -> RUNNING handshake).
    pub fn transition_pending(&self) -> bool {
        self.current_mode != self.next_mode && self.current_mode != ExecutionMode::Initializing
    }

    /// Atomically adopt the pending mode. Runs once the gating sync point
    /// is synchronized and (for freeze/run) the scenario boundary is
    /// crossed.
    pub fn complete_transition(&mut self) {
        if self.current_mode != self.next_mode {
            info!(
                "execution mode {} -> {}",
                self.current_mode, self.next_mode
            );
        }
        self.current_mode = self.next_mode;
        self.pending_mtr = None;
        if self.current_mode == ExecutionMode::Running {
            self.next_mode_scenario_time = None;
        }
    }

    /// Fatal path: force SHUTDOWN from any state.
    pub fn enter_shutdown(&mut self) {
        if self.current_mode != ExecutionMode::Shutdown {
            info!("execution mode {} -> SHUTDOWN", self.current_mode);
        }
        self.current_mode = ExecutionMode::Shutdown;
        self.next_mode = ExecutionMode::Shutdown;
        self.pending_mtr = None;
    }

    /// Simulation time may only advance while RUNNING; FREEZE holds the
    /// clock (publishes continue, reflections keep queueing).
    pub fn may_advance_time(&self) -> bool {
        self.current_mode == ExecutionMode::Running
    }

    pub fn is_shutdown(&self) -> bool {
        self.current_mode == ExecutionMode::Shutdown
    }
}
