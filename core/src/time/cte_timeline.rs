use std::sync::{
    atomic::{AtomicU64, Ordering},
    Mutex,
};

use log::warn;

use super::{clock::ClockSource, error::TimeError, timeline::Timeline};

/// The Central Timing Equipment timeline: a wall clock in the Terrestrial
/// Time convention, backed by one of the `ClockSource` variants.
///
/// A failed read falls back to the last good sample with a warning; only a
/// failed `init` surfaces as an error, and even that stays local to this
/// federate.
pub struct CteTimeline {
    clock: Mutex<Box<dyn ClockSource>>,
    epoch_bits: AtomicU64,
    last_good_bits: AtomicU64,
}

impl CteTimeline {
    pub fn new(clock: Box<dyn ClockSource>) -> Self {
        Self {
            clock: Mutex::new(clock),
            epoch_bits: AtomicU64::new(0f64.to_bits()),
            last_good_bits: AtomicU64::new(0f64.to_bits()),
        }
    }

    /// Initialize the underlying clock source. A hardware device that is
    /// unreachable reports here and the caller decides the local policy.
    pub fn init(&self) -> Result<(), TimeError> {
        let mut clock = self.clock.lock().map_err(|_| TimeError::ClockUnavailable {
            source_name: "CTE",
            detail: "clock lock poisoned".to_string(),
        })?;
        clock.init()
    }

    pub fn stop(&self) {
        if let Ok(mut clock) = self.clock.lock() {
            clock.stop();
        }
    }

    pub fn set_epoch(&self, epoch: f64) {
        self.epoch_bits.store(epoch.to_bits(), Ordering::SeqCst);
    }

    /// Sample the clock, surfacing read errors to the caller.
    pub fn try_time(&self) -> Result<f64, TimeError> {
        let clock = self.clock.lock().map_err(|_| TimeError::ClockUnavailable {
            source_name: "CTE",
            detail: "clock lock poisoned".to_string(),
        })?;
        let sample = clock.time()?;
        self.last_good_bits
            .store(sample.to_bits(), Ordering::SeqCst);
        Ok(sample)
    }
}

impl Timeline for CteTimeline {
    fn time(&self) -> f64 {
        match self.try_time() {
            Ok(sample) => sample,
            Err(time_error) => {
                warn!("CTE clock read failed, holding last sample: {}", time_error);
                f64::from_bits(self.last_good_bits.load(Ordering::SeqCst))
            }
        }
    }

    fn min_resolution(&self) -> f64 {
        self.clock
            .lock()
            .map(|clock| clock.min_resolution())
            .unwrap_or(1.0e-9)
    }

    fn epoch(&self) -> f64 {
        f64::from_bits(self.epoch_bits.load(Ordering::SeqCst))
    }
}
