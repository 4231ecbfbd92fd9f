use std::sync::{
    atomic::{AtomicI64, AtomicU64, Ordering},
    Arc,
};

use super::{
    base_time::BaseTime, logical_time::LogicalTime, sim_timeline::SimTimeline, timeline::Timeline,
};

/// Scenario Time (TT): the Terrestrial-Time timeline shared by the whole
/// federation, anchored at the scenario epoch `tt0` (Truncated Julian Date
/// seconds).
///
/// Holds the invertible mappings between scenario time, local simulation
/// time, and HLA logical time:
///
/// ```text
/// sim(scn) = scn - (epoch + sim_offset)
/// scn(sim) = sim + (epoch + sim_offset)
/// hlt(scn) = to_base_time(scn - epoch) - hlt_offset
/// scn(hlt) = seconds(hlt + hlt_offset) + epoch
/// ```
///
/// `sim_offset` accommodates late joiners whose local simulation clock
/// starts at zero mid-scenario. Offsets are interior-mutable so the master
/// can re-anchor during initialization while timelines are already shared.
#[derive(Clone)]
pub struct ScenarioTimeline {
    sim_timeline: SimTimeline,
    base_time: BaseTime,
    shared: Arc<ScenarioOffsets>,
}

struct ScenarioOffsets {
    /// tt0, TJD seconds, as f64 bits.
    epoch: AtomicU64,
    /// st0, sim seconds, as f64 bits.
    sim_offset: AtomicU64,
    /// Base-time ticks.
    hlt_offset: AtomicI64,
}

impl ScenarioTimeline {
    pub fn new(sim_timeline: SimTimeline, base_time: BaseTime, epoch: f64) -> Self {
        Self {
            sim_timeline,
            base_time,
            shared: Arc::new(ScenarioOffsets {
                epoch: AtomicU64::new(epoch.to_bits()),
                sim_offset: AtomicU64::new(0f64.to_bits()),
                hlt_offset: AtomicI64::new(0),
            }),
        }
    }

    pub fn set_epoch(&self, epoch: f64) {
        self.shared.epoch.store(epoch.to_bits(), Ordering::SeqCst);
    }

    pub fn sim_offset(&self) -> f64 {
        f64::from_bits(self.shared.sim_offset.load(Ordering::SeqCst))
    }

    pub fn set_sim_offset(&self, sim_offset: f64) {
        self.shared
            .sim_offset
            .store(sim_offset.to_bits(), Ordering::SeqCst);
    }

    pub fn hlt_offset(&self) -> LogicalTime {
        LogicalTime::from_ticks(self.shared.hlt_offset.load(Ordering::SeqCst))
    }

    pub fn set_hlt_offset(&self, hlt_offset: LogicalTime) {
        self.shared
            .hlt_offset
            .store(hlt_offset.ticks(), Ordering::SeqCst);
    }

    /// Local simulation time at the given scenario time.
    pub fn compute_simulation_time(&self, scenario_time: f64) -> f64 {
        scenario_time - (self.epoch() + self.sim_offset())
    }

    /// Scenario time at the given local simulation time.
    pub fn time_from_simulation_time(&self, simulation_time: f64) -> f64 {
        simulation_time + (self.epoch() + self.sim_offset())
    }

    /// HLA logical time at the given scenario time.
    pub fn compute_hlt(&self, scenario_time: f64) -> LogicalTime {
        LogicalTime::from_seconds(&self.base_time, scenario_time - self.epoch())
            - self.hlt_offset()
    }

    /// Scenario time at the given HLA logical time.
    pub fn time_from_hlt(&self, hlt: LogicalTime) -> f64 {
        (hlt + self.hlt_offset()).to_seconds(&self.base_time) + self.epoch()
    }
}

impl Timeline for ScenarioTimeline {
    fn time(&self) -> f64 {
        self.time_from_simulation_time(self.sim_timeline.time())
    }

    fn min_resolution(&self) -> f64 {
        self.sim_timeline.min_resolution()
    }

    fn epoch(&self) -> f64 {
        f64::from_bits(self.shared.epoch.load(Ordering::SeqCst))
    }
}
