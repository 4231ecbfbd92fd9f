use std::{
    fmt,
    sync::{
        atomic::{AtomicBool, AtomicI64, Ordering},
        Arc,
    },
};

use super::error::TimeError;

/// The tick units supported for HLA logical time, coarsest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseTimeUnit {
    Second,
    Centisecond,
    Millisecond,
    HundredMicroseconds,
    TenMicroseconds,
    Microsecond,
    HundredNanoseconds,
    TenNanoseconds,
    Nanosecond,
    HundredPicoseconds,
    TenPicoseconds,
    Picosecond,
}

/// All units, ordered coarsest to finest. Used by the resolution diagnostic.
pub const BASE_TIME_UNITS: [BaseTimeUnit; 12] = [
    BaseTimeUnit::Second,
    BaseTimeUnit::Centisecond,
    BaseTimeUnit::Millisecond,
    BaseTimeUnit::HundredMicroseconds,
    BaseTimeUnit::TenMicroseconds,
    BaseTimeUnit::Microsecond,
    BaseTimeUnit::HundredNanoseconds,
    BaseTimeUnit::TenNanoseconds,
    BaseTimeUnit::Nanosecond,
    BaseTimeUnit::HundredPicoseconds,
    BaseTimeUnit::TenPicoseconds,
    BaseTimeUnit::Picosecond,
];

impl BaseTimeUnit {
    /// Ticks per second for this unit.
    pub fn multiplier(&self) -> i64 {
        match self {
            BaseTimeUnit::Second => 1,
            BaseTimeUnit::Centisecond => 100,
            BaseTimeUnit::Millisecond => 1_000,
            BaseTimeUnit::HundredMicroseconds => 10_000,
            BaseTimeUnit::TenMicroseconds => 100_000,
            BaseTimeUnit::Microsecond => 1_000_000,
            BaseTimeUnit::HundredNanoseconds => 10_000_000,
            BaseTimeUnit::TenNanoseconds => 100_000_000,
            BaseTimeUnit::Nanosecond => 1_000_000_000,
            BaseTimeUnit::HundredPicoseconds => 10_000_000_000,
            BaseTimeUnit::TenPicoseconds => 100_000_000_000,
            BaseTimeUnit::Picosecond => 1_000_000_000_000,
        }
    }

    /// The unit matching a tick multiplier, if the multiplier belongs to
    /// the supported enumeration.
    pub fn from_multiplier(multiplier: i64) -> Result<Self, TimeError> {
        BASE_TIME_UNITS
            .iter()
            .find(|unit| unit.multiplier() == multiplier)
            .copied()
            .ok_or(TimeError::UnsupportedMultiplier { multiplier })
    }
}

impl fmt::Display for BaseTimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BaseTimeUnit::Second => "s",
            BaseTimeUnit::Centisecond => "cs",
            BaseTimeUnit::Millisecond => "ms",
            BaseTimeUnit::HundredMicroseconds => "100us",
            BaseTimeUnit::TenMicroseconds => "10us",
            BaseTimeUnit::Microsecond => "us",
            BaseTimeUnit::HundredNanoseconds => "100ns",
            BaseTimeUnit::TenNanoseconds => "10ns",
            BaseTimeUnit::Nanosecond => "ns",
            BaseTimeUnit::HundredPicoseconds => "100ps",
            BaseTimeUnit::TenPicoseconds => "10ps",
            BaseTimeUnit::Picosecond => "ps",
        };
        write!(f, "{}", label)
    }
}

/// The process-wide integer tick representation of HLA logical time.
///
/// One instance exists per federate process, handed to every component
/// that converts between seconds and ticks. The unit may be changed
/// freely during configuration; once `lock()` runs (at time-regulation
/// enable) any attempt to install a different unit is an error, because
/// every federate in a federation must agree on the multiplier.
#[derive(Clone)]
pub struct BaseTime {
    inner: Arc<BaseTimeInner>,
}

struct BaseTimeInner {
    multiplier: AtomicI64,
    locked: AtomicBool,
}

impl BaseTime {
    pub fn new(unit: BaseTimeUnit) -> Self {
        Self {
            inner: Arc::new(BaseTimeInner {
                multiplier: AtomicI64::new(unit.multiplier()),
                locked: AtomicBool::new(false),
            }),
        }
    }

    /// Install a new tick unit. Rejected once the configuration is locked,
    /// unless the unit is unchanged.
    pub fn set_unit(&self, unit: BaseTimeUnit) -> Result<(), TimeError> {
        let current = self.unit();
        if self.is_locked() && unit != current {
            return Err(TimeError::BaseTimeLocked {
                current,
                requested: unit,
            });
        }
        self.inner
            .multiplier
            .store(unit.multiplier(), Ordering::SeqCst);
        Ok(())
    }

    /// Install a unit by its raw tick multiplier (as carried in the ExCO).
    pub fn set_multiplier(&self, multiplier: i64) -> Result<(), TimeError> {
        self.set_unit(BaseTimeUnit::from_multiplier(multiplier)?)
    }

    /// Freeze the configuration. Called when time regulation is first
    /// enabled; irreversible for the life of the process.
    pub fn lock(&self) {
        self.inner.locked.store(true, Ordering::SeqCst);
    }

    pub fn is_locked(&self) -> bool {
        self.inner.locked.load(Ordering::SeqCst)
    }

    pub fn multiplier(&self) -> i64 {
        self.inner.multiplier.load(Ordering::SeqCst)
    }

    pub fn unit(&self) -> BaseTimeUnit {
        // The stored multiplier always came from a valid unit
        BaseTimeUnit::from_multiplier(self.multiplier())
            .unwrap_or(BaseTimeUnit::Microsecond)
    }

    /// The largest magnitude of seconds representable without saturation.
    pub fn max_logical_time_seconds(&self) -> f64 {
        (i64::MAX / self.multiplier()) as f64
    }

    /// Seconds to ticks, rounded half away from zero, saturating at the
    /// i64 range.
    pub fn to_base_time(&self, seconds: f64) -> i64 {
        if seconds.is_nan() {
            return 0;
        }
        let scaled = seconds * self.multiplier() as f64;
        if scaled >= i64::MAX as f64 {
            return i64::MAX;
        }
        if scaled <= i64::MIN as f64 {
            return i64::MIN;
        }
        // f64::round is round-half-away-from-zero
        scaled.round() as i64
    }

    /// Ticks to seconds. The whole-tick and fractional parts are converted
    /// separately so rounding error stays within one double LSB near zero
    /// and one tick at the extremes.
    pub fn to_seconds(&self, ticks: i64) -> f64 {
        let multiplier = self.multiplier();
        let whole = ticks / multiplier;
        let fraction = ticks % multiplier;
        whole as f64 + fraction as f64 / multiplier as f64
    }

    /// True when `seconds` is non-zero but rounds to zero ticks, i.e. the
    /// value is finer than the configured resolution can carry.
    pub fn exceeds_resolution(&self, seconds: f64) -> bool {
        seconds != 0.0 && self.to_base_time(seconds) == 0
    }

    /// The coarsest unit that still represents `seconds` on an exact tick
    /// boundary. Diagnostic only.
    pub fn best_resolution_for(seconds: f64) -> BaseTimeUnit {
        for unit in BASE_TIME_UNITS {
            let scaled = seconds * unit.multiplier() as f64;
            if scaled.abs() >= i64::MAX as f64 {
                continue;
            }
            if (scaled - scaled.round()).abs() < 1e-9 {
                return unit;
            }
        }
        BaseTimeUnit::Picosecond
    }
}

impl Default for BaseTime {
    fn default() -> Self {
        Self::new(BaseTimeUnit::Microsecond)
    }
}

impl fmt::Debug for BaseTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseTime")
            .field("unit", &self.unit())
            .field("multiplier", &self.multiplier())
            .field("locked", &self.is_locked())
            .finish()
    }
}
