use std::sync::{
    atomic::{AtomicI64, Ordering},
    Arc,
};

use super::{base_time::BaseTime, logical_time::LogicalTime, timeline::Timeline};

/// A logical-time cell shared between the federate's grant bookkeeping and
/// the HLT timeline. The simulator thread writes it when a time-advance
/// grant lands; any thread may read.
#[derive(Clone, Default)]
pub struct SharedLogicalTime {
    ticks: Arc<AtomicI64>,
}

impl SharedLogicalTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> LogicalTime {
        LogicalTime::from_ticks(self.ticks.load(Ordering::SeqCst))
    }

    pub fn set(&self, time: LogicalTime) {
        self.ticks.store(time.ticks(), Ordering::SeqCst);
    }
}

/// HLA Logical Time viewed as a timeline: integer base-time ticks whose
/// origin is the federation start and whose resolution is one tick.
#[derive(Clone)]
pub struct HltTimeline {
    base_time: BaseTime,
    granted: SharedLogicalTime,
}

impl HltTimeline {
    pub fn new(base_time: BaseTime, granted: SharedLogicalTime) -> Self {
        Self { base_time, granted }
    }

    pub fn granted(&self) -> LogicalTime {
        self.granted.get()
    }
}

impl Timeline for HltTimeline {
    fn time(&self) -> f64 {
        self.granted.get().to_seconds(&self.base_time)
    }

    fn min_resolution(&self) -> f64 {
        1.0 / self.base_time.multiplier() as f64
    }
}
