use thiserror::Error;

use super::base_time::BaseTimeUnit;

/// Errors raised by the base-time configuration and the clock sources
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimeError {
    /// Attempted to change the base-time unit after it was frozen
    #[error("base time is locked to {current}; cannot change to {requested}")]
    BaseTimeLocked {
        current: BaseTimeUnit,
        requested: BaseTimeUnit,
    },

    /// A tick multiplier that is not in the supported unit enumeration
    #[error("unsupported base-time multiplier {multiplier} (not a recognized tick unit)")]
    UnsupportedMultiplier { multiplier: i64 },

    /// A clock source could not be initialized or read
    #[error("{source_name} clock unavailable: {detail}")]
    ClockUnavailable {
        source_name: &'static str,
        detail: String,
    },

    /// System realtime clock is before the UNIX epoch
    #[error("system time is before UNIX epoch")]
    SystemTimeBeforeEpoch,

    /// A clock was read before `init()` was called on it
    #[error("{source_name} clock read before init()")]
    ClockNotInitialized { source_name: &'static str },
}
