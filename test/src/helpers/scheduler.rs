use std::sync::{
    atomic::{AtomicI64, Ordering},
    Mutex,
};

use fedlink::SimScheduler;

/// A discrete-event scheduler stand-in: a tick counter the core drives
/// through `advance_to`.
pub struct TestScheduler {
    tics: AtomicI64,
    tics_per_second: i64,
    terminate_at: Mutex<Option<f64>>,
}

impl TestScheduler {
    pub fn new(tics_per_second: i64) -> Self {
        Self {
            tics: AtomicI64::new(0),
            tics_per_second,
            terminate_at: Mutex::new(None),
        }
    }

    pub fn terminate_time(&self) -> Option<f64> {
        *self.terminate_at.lock().expect("terminate lock")
    }
}

impl SimScheduler for TestScheduler {
    fn sim_tics(&self) -> i64 {
        self.tics.load(Ordering::SeqCst)
    }

    fn tics_per_second(&self) -> i64 {
        self.tics_per_second
    }

    fn advance_to(&self, seconds: f64) {
        let target = (seconds * self.tics_per_second as f64).round() as i64;
        // The scheduler never runs backwards
        self.tics.fetch_max(target, Ordering::SeqCst);
    }

    fn set_terminate_time(&self, seconds: f64) {
        *self.terminate_at.lock().expect("terminate lock") = Some(seconds);
    }
}
