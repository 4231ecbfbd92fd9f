//! The federation manager: wires the time model, queues, federate,
//! execution control and sync points together, drives the initialization
//! handshake in order, and exposes the per-cycle operational surface to
//! the local simulator.

pub mod callbacks;

use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use log::{error, info, warn};

use crate::{
    config::{CteClockSpec, FederateConfig},
    error::{FaultReport, FederationError},
    exco::ExecutionConfiguration,
    execution::{
        execution_control::{ExecutionControl, MtrDisposition},
        mode::{ExecutionMode, MtrMode},
        mtr::ModeTransitionRequest,
    },
    federate::{
        federate::Federate, roster::FederationRoster, time_advance::TimeAdvanceState,
    },
    object::{
        object_instance::{DataRecord, ObjectInstance},
        registry::ObjectRegistry,
    },
    queue::{item::ParameterItem, item_queue::ItemQueue},
    rti::{
        retry::{retry_transient, FINAL_ACHIEVE_DEADLINE},
        RtiAmbassador,
    },
    sim::SimScheduler,
    sync::{labels, sync_point::SyncPointState, sync_point_manager::SyncPointManager},
    time::{
        base_time::BaseTime,
        clock::{ClockSource, HardwareCte, SystemClock},
        cte_timeline::CteTimeline,
        hlt_timeline::{HltTimeline, SharedLogicalTime},
        logical_time::LogicalTime,
        scenario_timeline::ScenarioTimeline,
        sim_timeline::SimTimeline,
        timeline::Timeline,
    },
    types::{ExitCode, ResignReason},
};

pub use callbacks::FederationCallbacks;

/// What one simulator cycle produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleStatus {
    /// Time advanced; the granted logical time is the new federate time.
    Running { granted: LogicalTime },
    /// The federation is frozen; no time advanced this cycle.
    Frozen,
    /// The federate has shut down.
    Shutdown { exit_code: ExitCode },
}

/// The operational heart of a federate process. Owns the simulator-thread
/// state; the paired `FederationCallbacks` is handed to the RTI binding
/// for its callback thread.
pub struct FederationManager {
    config: FederateConfig,
    base_time: BaseTime,
    federate: Federate,
    execution: ExecutionControl,
    sync_points: SyncPointManager,
    objects: Arc<ObjectRegistry>,
    exco_object: Arc<ObjectInstance>,
    exco: ExecutionConfiguration,
    mtr_queue: Arc<ItemQueue<Vec<ParameterItem>>>,
    scheduler: Arc<dyn SimScheduler>,
    sim_timeline: SimTimeline,
    scenario_timeline: ScenarioTimeline,
    hlt_timeline: HltTimeline,
    cte_timeline: CteTimeline,
    exit_code: Option<ExitCode>,
}

impl FederationManager {
    /// Build the manager and its callback-thread counterpart. The
    /// returned callbacks must be installed into the RTI binding before
    /// `initialize` runs.
    pub fn new(
        config: FederateConfig,
        rti: Box<dyn RtiAmbassador>,
        scheduler: Arc<dyn SimScheduler>,
    ) -> Result<(Self, Arc<FederationCallbacks>), FederationError> {
        let base_time = BaseTime::new(config.base_time_unit);
        let granted = SharedLogicalTime::new();
        let advance = TimeAdvanceState::new();
        let roster = FederationRoster::new(config.known_federates.clone());
        let sync_points = SyncPointManager::new();
        let objects = Arc::new(ObjectRegistry::new());
        let mtr_queue = Arc::new(ItemQueue::new());

        let sim_timeline = SimTimeline::new(Arc::clone(&scheduler));
        let scenario_timeline = ScenarioTimeline::new(
            sim_timeline.clone(),
            base_time.clone(),
            config.scenario_time_epoch,
        );
        scenario_timeline.set_sim_offset(config.sim_offset);
        let hlt_timeline = HltTimeline::new(base_time.clone(), granted.clone());
        let cte_timeline = CteTimeline::new(Self::build_clock(&config.cte_clock));

        let mut federate = Federate::new(
            rti,
            base_time.clone(),
            roster.clone(),
            advance.clone(),
            granted,
        );
        federate.set_lookahead(LogicalTime::from_seconds(&base_time, config.lookahead))?;

        let execution = ExecutionControl::new(base_time.clone(), config.is_master);
        let exco = ExecutionConfiguration::new(&base_time);
        let exco_object = Arc::new(ObjectInstance::new(
            ExecutionConfiguration::OBJECT_CLASS,
            ExecutionConfiguration::INSTANCE_NAME,
        ));

        let callbacks = Arc::new(FederationCallbacks::new(
            sync_points.clone(),
            Arc::clone(&objects),
            roster,
            advance,
            Arc::clone(&mtr_queue),
        ));

        Ok((
            Self {
                config,
                base_time,
                federate,
                execution,
                sync_points,
                objects,
                exco_object,
                exco,
                mtr_queue,
                scheduler,
                sim_timeline,
                scenario_timeline,
                hlt_timeline,
                cte_timeline,
                exit_code: None,
            },
            callbacks,
        ))
    }

    fn build_clock(spec: &CteClockSpec) -> Box<dyn ClockSource> {
        match spec {
            CteClockSpec::Monotonic => Box::new(SystemClock::monotonic()),
            CteClockSpec::Realtime => Box::new(SystemClock::realtime()),
            CteClockSpec::Tsync { device_path } => Box::new(HardwareCte::new(device_path)),
        }
    }

    // Accessors

    pub fn execution_mode(&self) -> ExecutionMode {
        self.execution.current_mode()
    }

    pub fn is_master(&self) -> bool {
        self.execution.is_master()
    }

    pub fn granted_time(&self) -> LogicalTime {
        self.federate.granted_time()
    }

    pub fn scenario_time(&self) -> f64 {
        self.scenario_timeline.time()
    }

    pub fn scenario_timeline(&self) -> &ScenarioTimeline {
        &self.scenario_timeline
    }

    pub fn hlt_timeline(&self) -> &HltTimeline {
        &self.hlt_timeline
    }

    pub fn cte_timeline(&self) -> &CteTimeline {
        &self.cte_timeline
    }

    pub fn exco_snapshot(&self) -> &crate::exco::ExcoSnapshot {
        self.exco.snapshot()
    }

    pub fn objects(&self) -> &Arc<ObjectRegistry> {
        &self.objects
    }

    pub fn exit_code(&self) -> Option<ExitCode> {
        self.exit_code
    }

    /// Run the initialization handshake to RUNNING. On failure the
    /// federate is shut down with the mapped exit code before the error
    /// returns.
    pub fn initialize(&mut self) -> Result<(), FederationError> {
        match self.run_initialization() {
            Ok(()) => Ok(()),
            Err(federation_error) => {
                let report = FaultReport::new(
                    federation_error.clone(),
                    "manager",
                    self.hlt_timeline.time(),
                );
                error!("initialization failed: {}", report);
                self.emergency_shutdown(report.exit_code());
                Err(federation_error)
            }
        }
    }

    fn run_initialization(&mut self) -> Result<(), FederationError> {
        let deadline = self.config.wait_timeout;

        // (1) configure attributes & local clocks
        self.exco_object
            .configure_attributes(ExecutionConfiguration::bindings(), self.config.is_master)?;
        self.objects.insert(Arc::clone(&self.exco_object));
        self.execution.set_least_common_time_step(LogicalTime::from_seconds(
            &self.base_time,
            self.config.least_common_time_step,
        ));
        if let Err(time_error) = self.cte_timeline.init() {
            // A dead timing device never takes the federation down; fall
            // back to the local monotonic clock
            warn!(
                "CTE clock init failed ({}); falling back to monotonic",
                time_error
            );
            self.cte_timeline = CteTimeline::new(Box::new(SystemClock::monotonic()));
            self.cte_timeline.init()?;
        }
        info!(
            "base time unit {} ({} tick/s), best fit for LCTS {}: {}",
            self.base_time.unit(),
            self.base_time.multiplier(),
            self.config.least_common_time_step,
            BaseTime::best_resolution_for(self.config.least_common_time_step)
        );

        // (2) join
        let federation_name = self.config.federation_name.clone();
        let federate_name = self.config.federate_name.clone();
        let fom_modules = self.config.fom_modules.clone();
        let is_master = self.config.is_master;
        self.federate
            .join(&federation_name, &federate_name, &fom_modules, is_master)?;
        self.federate.roster().mark_joined(&federate_name);

        // (3) publish & subscribe, claim the ExCO instance on the master
        let attribute_names: Vec<String> = ExecutionConfiguration::bindings()
            .into_iter()
            .map(|binding| binding.fom_name)
            .collect();
        let retry = self.config.retry.clone();
        retry_transient(&retry, "publish/subscribe", || {
            self.federate
                .rti()
                .publish_and_subscribe(ExecutionConfiguration::OBJECT_CLASS, &attribute_names)
        })?;
        if is_master {
            let handle = retry_transient(&retry, "register ExCO instance", || {
                self.federate.rti().register_object_instance(
                    ExecutionConfiguration::OBJECT_CLASS,
                    ExecutionConfiguration::INSTANCE_NAME,
                )
            })?;
            self.objects
                .bind_handle(ExecutionConfiguration::INSTANCE_NAME, handle);
        }

        // (4) register the initialization sync-point set and enter
        // INITIALIZING
        if is_master {
            for label in labels::INITIALIZATION_LABELS {
                retry_transient(&retry, "register sync point", || {
                    self.federate.rti().register_sync_point(label, b"")
                })?;
                self.sync_points.mark_registered(label)?;
            }
        }
        self.execution.begin_initializing();
        self.achieve_and_wait(labels::INITIALIZATION_STARTED, deadline)?;

        // (5) master populates and publishes the ExCO
        if is_master {
            let lcts =
                LogicalTime::from_seconds(&self.base_time, self.config.least_common_time_step);
            let snapshot = self.exco.snapshot_mut();
            snapshot.root_frame_name = self.config.root_frame_name.clone();
            snapshot.scenario_time_epoch = self.config.scenario_time_epoch;
            snapshot.current_execution_mode = ExecutionMode::Initializing;
            snapshot.next_execution_mode = ExecutionMode::Running;
            snapshot.least_common_time_step = lcts;
            snapshot.hla_base_time_multiplier = self.base_time.multiplier();
            self.publish_exco(true)?;
        }

        // (6) wait for the required roster
        self.federate.roster().wait_for_required(deadline)?;

        // (7) replicate the ExCO onto every joiner
        if !is_master {
            self.wait_for_exco_replication(deadline)?;
        }
        self.achieve_and_wait(labels::SIM_CONFIG_V2, deadline)?;
        self.achieve_and_wait(labels::INITIALIZE_V2, deadline)?;

        // (8) achieve initialization_complete. Time management goes on
        // before the final gate so every member regulates by the time
        // the first one starts advancing
        self.federate.set_time_regulating(true)?;
        self.federate.set_time_constrained(true)?;
        self.achieve_and_wait(labels::INITIALIZATION_COMPLETE_V2, deadline)?;
        self.achieve_and_wait(labels::STARTUP_V2, deadline)?;
        self.achieve_and_wait(labels::INITIALIZATION_COMPLETE, deadline)?;

        // (9) RUNNING
        self.execution.complete_initialization();
        if is_master {
            self.exco.snapshot_mut().current_execution_mode = ExecutionMode::Running;
            self.publish_exco(false)?;
        }
        Ok(())
    }

    /// Achieve a sync point once announced and wait for federation-wide
    /// synchronized. Points already synchronized (late join) pass through.
    fn achieve_and_wait(
        &mut self,
        label: &str,
        deadline: Duration,
    ) -> Result<(), FederationError> {
        self.sync_points.wait_for_announced(label, deadline)?;
        if !self.sync_points.is_synchronized(label) {
            let retry = self.config.retry.clone();
            retry_transient(&retry, "achieve sync point", || {
                self.federate.rti().achieve_sync_point(label)
            })?;
            self.sync_points.mark_achieved(label)?;
        }
        self.sync_points.wait_for_synchronized(label, deadline)?;
        Ok(())
    }

    fn wait_for_exco_replication(&mut self, deadline: Duration) -> Result<(), FederationError> {
        let started = Instant::now();
        loop {
            self.exco_object.drain_reflections()?;
            self.exco.unpack(&self.exco_object)?;
            if self.exco.take_updated() {
                let snapshot = self.exco.snapshot().clone();
                self.execution.apply_replicated_exco(&snapshot)?;
                self.scenario_timeline
                    .set_epoch(snapshot.scenario_time_epoch);
                info!(
                    "ExCO replicated: root frame \"{}\", epoch {}",
                    snapshot.root_frame_name, snapshot.scenario_time_epoch
                );
                return Ok(());
            }
            if started.elapsed() >= deadline {
                return Err(FederationError::InitializationTimeout {
                    phase: "ExCO replication",
                    waited: started.elapsed(),
                });
            }
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn publish_exco(&mut self, initialization: bool) -> Result<(), FederationError> {
        self.exco.pack(&self.exco_object)?;
        let updates = self.exco_object.collect_updates(initialization)?;
        if updates.is_empty() {
            return Ok(());
        }
        let Some(handle) = self.exco_object.handle() else {
            return Ok(());
        };
        let retry = self.config.retry.clone();
        retry_transient(&retry, "publish ExCO", || {
            self.federate.rti().update_attributes(handle, updates.clone())
        })?;
        Ok(())
    }

    /// Send a Mode Transition Request to the master. Any federate may
    /// request; the master arbitrates.
    pub fn send_mtr(&mut self, mode: MtrMode) -> Result<(), FederationError> {
        self.send_mtr_at(mode, self.scenario_timeline.time())
    }

    /// Send an MTR requesting the transition at a specific scenario time.
    pub fn send_mtr_at(
        &mut self,
        mode: MtrMode,
        scenario_time: f64,
    ) -> Result<(), FederationError> {
        let request = ModeTransitionRequest {
            execution_mode: mode,
            sim_time: self.sim_timeline.time(),
            scenario_time,
            cte_time: self.cte_timeline.time(),
        };
        let retry = self.config.retry.clone();
        retry_transient(&retry, "send MTR", || {
            self.federate.rti().send_interaction(
                ModeTransitionRequest::INTERACTION_CLASS,
                request.encode(),
            )
        })?;
        info!("sent {} (scenario time {})", mode, scenario_time);
        Ok(())
    }

    /// Initiate a federation save through the RTI's save machinery.
    /// Master only; peers achieve the announced point automatically.
    pub fn request_federation_save(&mut self) -> Result<(), FederationError> {
        self.register_save_point(labels::FEDSAVE_V2)
    }

    /// Resume after a federation save.
    pub fn request_federation_run(&mut self) -> Result<(), FederationError> {
        self.register_save_point(labels::FEDRUN_V2)
    }

    fn register_save_point(&mut self, label: &'static str) -> Result<(), FederationError> {
        let retry = self.config.retry.clone();
        retry_transient(&retry, "register save point", || {
            self.federate.rti().register_sync_point(label, b"")
        })?;
        // Tolerate a label left over from an earlier save round
        if let Err(sync_error) = self.sync_points.mark_registered(label) {
            warn!("save point bookkeeping: {}", sync_error);
        }
        Ok(())
    }

    /// One simulator cycle: drain reflections, arbitrate or adopt mode
    /// transitions, publish, and advance logical time.
    pub fn process_cycle(&mut self) -> Result<CycleStatus, FederationError> {
        if let Some(exit_code) = self.exit_code {
            return Ok(CycleStatus::Shutdown { exit_code });
        }
        match self.run_cycle() {
            Ok(status) => Ok(status),
            Err(federation_error) => {
                let report = FaultReport::new(
                    federation_error.clone(),
                    "manager",
                    self.hlt_timeline.time(),
                );
                error!("fatal cycle error: {}", report);
                self.emergency_shutdown(report.exit_code());
                Err(federation_error)
            }
        }
    }

    fn run_cycle(&mut self) -> Result<CycleStatus, FederationError> {
        // Reflections first: the cycle works on the freshest ExCO
        self.exco_object.drain_reflections()?;
        self.exco.unpack(&self.exco_object)?;
        if self.exco.take_updated() && !self.is_master() {
            let snapshot = self.exco.snapshot().clone();
            self.execution.apply_replicated_exco(&snapshot)?;
        }

        if self.is_master() {
            self.arbitrate_pending_mtrs()?;
        } else {
            // Only the master consumes MTRs; discard any delivered here
            while self.mtr_queue.pop()?.is_some() {}
        }

        self.auto_achieve_save_points();

        if let Some(status) = self.drive_pending_transition()? {
            return Ok(status);
        }

        if self.execution.current_mode() == ExecutionMode::Freeze {
            // Publishes continue with stale timestamps; the clock holds
            self.publish_exco_if_master_changed()?;
            return Ok(CycleStatus::Frozen);
        }

        self.publish_exco_if_master_changed()?;
        self.advance_one_step()
    }

    fn arbitrate_pending_mtrs(&mut self) -> Result<(), FederationError> {
        while let Some(parameters) = self.mtr_queue.pop()? {
            let (request, dropped) = match ModeTransitionRequest::decode(&parameters) {
                Ok(decoded) => decoded,
                Err(execution_error) => {
                    // Invalid requests are discarded, but never silently
                    warn!("discarding undecodable MTR: {}", execution_error);
                    continue;
                }
            };
            self.execution.count_dropped_parameters(dropped);

            let cte_now = self.cte_timeline.time();
            let disposition =
                self.execution
                    .receive_mtr(request, &self.scenario_timeline, cte_now)?;
            if let MtrDisposition::Accepted { sync_point_label } = disposition {
                let snapshot = self.exco.snapshot_mut();
                snapshot.current_execution_mode = self.execution.current_mode();
                snapshot.next_execution_mode = self.execution.next_mode();
                snapshot.next_mode_scenario_time =
                    self.execution.next_mode_scenario_time().unwrap_or(0.0);
                snapshot.next_mode_cte_time = self.execution.next_mode_cte_time();
                self.publish_exco(false)?;

                let retry = self.config.retry.clone();
                retry_transient(&retry, "register transition gate", || {
                    self.federate.rti().register_sync_point(sync_point_label, b"")
                })?;
                if let Err(sync_error) = self.sync_points.mark_registered(sync_point_label) {
                    // A reused gate label (second freeze of the run) keeps
                    // its old record; announce will still arrive
                    warn!("transition gate bookkeeping: {}", sync_error);
                }
            }
        }
        Ok(())
    }

    /// Achieve announced save/restore points; the save itself is the
    /// RTI's business.
    fn auto_achieve_save_points(&mut self) {
        for label in [labels::FEDSAVE_V2, labels::FEDRUN_V2] {
            if self.sync_points.state(label) == Ok(SyncPointState::Announced) {
                let retry = self.config.retry.clone();
                let achieved = retry_transient(&retry, "achieve save point", || {
                    self.federate.rti().achieve_sync_point(label)
                });
                match achieved {
                    Ok(()) => {
                        if let Err(sync_error) = self.sync_points.mark_achieved(label) {
                            warn!("save point bookkeeping: {}", sync_error);
                        }
                    }
                    Err(rti_error) => warn!("save point achieve failed: {}", rti_error),
                }
            }
        }
    }

    fn gate_label_for(target: ExecutionMode) -> Option<&'static str> {
        match target {
            ExecutionMode::Running => Some(labels::MTR_RUN),
            ExecutionMode::Freeze => Some(labels::MTR_FREEZE),
            ExecutionMode::Shutdown => Some(labels::MTR_SHUTDOWN),
            ExecutionMode::Uninitialized | ExecutionMode::Initializing => None,
        }
    }

    /// Move a pending transition forward: achieve its gate once announced,
    /// and adopt the new mode when the gate synchronizes and the scenario
    /// boundary is crossed.
    fn drive_pending_transition(&mut self) -> Result<Option<CycleStatus>, FederationError> {
        if !self.execution.transition_pending() {
            return Ok(None);
        }
        let target = self.execution.next_mode();
        let Some(label) = Self::gate_label_for(target) else {
            return Ok(None);
        };

        // Quiesced for this cycle (reflections drained): achieve the gate
        if self.sync_points.state(label) == Ok(SyncPointState::Announced) {
            let retry = self.config.retry.clone();
            retry_transient(&retry, "achieve transition gate", || {
                self.federate.rti().achieve_sync_point(label)
            })?;
            self.sync_points.mark_achieved(label)?;
        }

        if target == ExecutionMode::Shutdown {
            // Shutdown does not wait for federation-wide synchronized;
            // the announcement is the signal
            if self.sync_points.is_announced(label) {
                info!("shutdown gate announced; shutting down");
                self.execution.complete_transition();
                self.perform_shutdown(ExitCode::CleanShutdown);
                return Ok(Some(CycleStatus::Shutdown {
                    exit_code: ExitCode::CleanShutdown,
                }));
            }
            return Ok(None);
        }

        // A freeze adopts at its scenario boundary; a run resumes from a
        // frozen clock, so the gate alone decides
        let boundary_reached = match target {
            ExecutionMode::Freeze => self
                .execution
                .reached_transition_boundary(self.scenario_timeline.time()),
            _ => true,
        };
        if self.sync_points.is_synchronized(label) && boundary_reached {
            self.execution.complete_transition();
            if self.is_master() {
                self.exco.snapshot_mut().current_execution_mode =
                    self.execution.current_mode();
                self.publish_exco(false)?;
            }
        }
        Ok(None)
    }

    fn publish_exco_if_master_changed(&mut self) -> Result<(), FederationError> {
        if !self.is_master() {
            return Ok(());
        }
        // The ExCO is intermittent: republish only when the working
        // snapshot drifted from what pack() last encoded
        let current = self.exco.snapshot();
        let needs_publish = current.current_execution_mode != self.execution.current_mode()
            || current.next_execution_mode != self.execution.next_mode();
        if needs_publish {
            self.exco.snapshot_mut().current_execution_mode = self.execution.current_mode();
            self.exco.snapshot_mut().next_execution_mode = self.execution.next_mode();
            self.publish_exco(false)?;
        }
        Ok(())
    }

    /// Advance logical time one LCTS step, clamped to a pending freeze
    /// boundary so no federate runs past it.
    fn advance_one_step(&mut self) -> Result<CycleStatus, FederationError> {
        if !self.execution.may_advance_time() {
            return Ok(CycleStatus::Frozen);
        }

        let step = self.execution.least_common_time_step();
        let mut target = self.federate.granted_time() + step;
        if self.execution.transition_pending()
            && self.execution.next_mode() == ExecutionMode::Freeze
        {
            if let Some(boundary) = self.execution.next_mode_scenario_time() {
                let boundary_hlt = self.scenario_timeline.compute_hlt(boundary);
                if boundary_hlt < target {
                    target = boundary_hlt;
                }
            }
        }
        if target <= self.federate.granted_time() {
            // Already parked at the boundary; wait for the gate
            return Ok(CycleStatus::Frozen);
        }

        self.federate.request_time_advance(target)?;
        let granted = self
            .federate
            .wait_for_time_advance_grant(target, self.config.wait_timeout)?;

        // Drive the local scheduler to the granted time
        let scenario_at_grant = self.scenario_timeline.time_from_hlt(granted);
        let sim_at_grant = self
            .scenario_timeline
            .compute_simulation_time(scenario_at_grant);
        self.scheduler.advance_to(sim_at_grant);

        Ok(CycleStatus::Running { granted })
    }

    /// Best-effort fatal-path teardown: one last achieve on the shutdown
    /// gate so peers learn of the exit, then resign.
    fn emergency_shutdown(&mut self, exit_code: ExitCode) {
        if self.sync_points.state(labels::MTR_SHUTDOWN) == Ok(SyncPointState::Announced) {
            let _ = self.federate.rti().achieve_sync_point(labels::MTR_SHUTDOWN);
            let _ = self.sync_points.mark_achieved(labels::MTR_SHUTDOWN);
            let _ = self
                .sync_points
                .wait_for_synchronized(labels::MTR_SHUTDOWN, FINAL_ACHIEVE_DEADLINE);
        }
        self.perform_shutdown(exit_code);
    }

    fn perform_shutdown(&mut self, exit_code: ExitCode) {
        if self.exit_code.is_some() {
            return;
        }
        self.execution.enter_shutdown();
        if let Err(federate_error) = self.federate.set_time_regulating(false) {
            warn!("disabling time regulation on shutdown: {}", federate_error);
        }
        if self.federate.is_joined() {
            if let Err(federate_error) = self.federate.resign(ResignReason::NoAction) {
                warn!("resign on shutdown: {}", federate_error);
            }
        }
        self.scheduler.set_terminate_time(self.sim_timeline.time());
        self.cte_timeline.stop();
        self.exit_code = Some(exit_code);
        info!("shut down with exit code {}", exit_code.code());
    }

    /// Orderly local shutdown without a federation-wide MTR (e.g. an
    /// operator stop).
    pub fn shutdown(&mut self) -> ExitCode {
        self.perform_shutdown(ExitCode::CleanShutdown);
        ExitCode::CleanShutdown
    }
}
