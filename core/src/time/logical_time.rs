use std::{
    fmt,
    ops::{Add, Sub},
};

use super::base_time::BaseTime;

/// HLA logical time: an integer tick count in the process-wide base-time
/// unit. Origin is the federation start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct LogicalTime(i64);

impl LogicalTime {
    pub const ZERO: LogicalTime = LogicalTime(0);
    pub const MAX: LogicalTime = LogicalTime(i64::MAX);

    pub fn from_ticks(ticks: i64) -> Self {
        Self(ticks)
    }

    pub fn from_seconds(base_time: &BaseTime, seconds: f64) -> Self {
        Self(base_time.to_base_time(seconds))
    }

    pub fn ticks(&self) -> i64 {
        self.0
    }

    pub fn to_seconds(&self, base_time: &BaseTime) -> f64 {
        base_time.to_seconds(self.0)
    }

    /// Round this time up to the next multiple of `step` ticks. Used for
    /// aligning mode-transition times to the least-common-time-step
    /// boundary. A non-positive step returns the time unchanged.
    pub fn round_up_to(&self, step: i64) -> Self {
        if step <= 0 {
            return *self;
        }
        let remainder = self.0.rem_euclid(step);
        if remainder == 0 {
            *self
        } else {
            Self(self.0.saturating_add(step - remainder))
        }
    }
}

impl Add for LogicalTime {
    type Output = LogicalTime;

    fn add(self, other: LogicalTime) -> LogicalTime {
        LogicalTime(self.0.saturating_add(other.0))
    }
}

impl Sub for LogicalTime {
    type Output = LogicalTime;

    fn sub(self, other: LogicalTime) -> LogicalTime {
        LogicalTime(self.0.saturating_sub(other.0))
    }
}

impl fmt::Display for LogicalTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
