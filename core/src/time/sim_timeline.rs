use std::sync::Arc;

use crate::sim::SimScheduler;

use super::timeline::Timeline;

/// The local simulator's clock, viewed as a timeline. Resolution is one
/// scheduler tick.
#[derive(Clone)]
pub struct SimTimeline {
    scheduler: Arc<dyn SimScheduler>,
}

impl SimTimeline {
    pub fn new(scheduler: Arc<dyn SimScheduler>) -> Self {
        Self { scheduler }
    }

    pub fn scheduler(&self) -> &Arc<dyn SimScheduler> {
        &self.scheduler
    }
}

impl Timeline for SimTimeline {
    fn time(&self) -> f64 {
        self.scheduler.sim_time()
    }

    fn min_resolution(&self) -> f64 {
        1.0 / self.scheduler.tics_per_second() as f64
    }
}
