use std::{str::FromStr, time::Duration};

use thiserror::Error;

use crate::{federate::roster::KnownFederate, time::base_time::BaseTimeUnit};

/// Errors that can occur while building a federate configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A CTE clock selector that is not `monotonic`, `realtime` or
    /// `tsync:<device-path>`
    #[error("unknown CTE clock selector \"{selector}\"")]
    UnknownClockSelector { selector: String },
}

/// Which wall clock backs the CTE timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CteClockSpec {
    Monotonic,
    Realtime,
    /// External PCIe timing hardware at the given device node.
    Tsync { device_path: String },
}

impl FromStr for CteClockSpec {
    type Err = ConfigError;

    fn from_str(selector: &str) -> Result<Self, ConfigError> {
        match selector {
            "monotonic" => Ok(CteClockSpec::Monotonic),
            "realtime" => Ok(CteClockSpec::Realtime),
            other => match other.strip_prefix("tsync:") {
                Some(device_path) if !device_path.is_empty() => Ok(CteClockSpec::Tsync {
                    device_path: device_path.to_string(),
                }),
                _ => Err(ConfigError::UnknownClockSelector {
                    selector: selector.to_string(),
                }),
            },
        }
    }
}

impl Default for CteClockSpec {
    fn default() -> Self {
        CteClockSpec::Monotonic
    }
}

/// How transient RTI faults are retried before giving up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts before the fault is treated as structural.
    pub max_retries: u32,
    /// First backoff delay; later delays double, jittered.
    pub initial_backoff: Duration,
    /// Backoff ceiling.
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 5,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(5),
        }
    }
}

/// Contains the configuration properties used to stand up one federate.
#[derive(Debug, Clone)]
pub struct FederateConfig {
    /// Federation execution to join.
    pub federation_name: String,
    /// This federate's name within the federation.
    pub federate_name: String,
    /// Whether this federate arbitrates mode transitions.
    pub is_master: bool,
    /// FOM modules handed to the RTI at join.
    pub fom_modules: Vec<String>,
    /// The known-federate roster; required entries gate initialization.
    pub known_federates: Vec<KnownFederate>,
    /// Tick unit for HLA logical time.
    pub base_time_unit: BaseTimeUnit,
    /// Wall clock backing the CTE timeline.
    pub cte_clock: CteClockSpec,
    /// Scenario-time epoch tt0 (Truncated Julian Date seconds).
    pub scenario_time_epoch: f64,
    /// Sim-time offset for late joiners (st0).
    pub sim_offset: f64,
    /// Least common time step across the federation, in seconds.
    pub least_common_time_step: f64,
    /// Lookahead in seconds; at least one base-time tick.
    pub lookahead: f64,
    /// Root reference-frame name published in the ExCO.
    pub root_frame_name: String,
    /// Bound on every initialization wait.
    pub wait_timeout: Duration,
    /// Transient-fault retry policy.
    pub retry: RetryPolicy,
}

impl Default for FederateConfig {
    fn default() -> Self {
        Self {
            federation_name: String::new(),
            federate_name: String::new(),
            is_master: false,
            fom_modules: Vec::new(),
            known_federates: Vec::new(),
            base_time_unit: BaseTimeUnit::Microsecond,
            cte_clock: CteClockSpec::default(),
            scenario_time_epoch: 0.0,
            sim_offset: 0.0,
            least_common_time_step: 0.25,
            lookahead: 0.25,
            root_frame_name: String::new(),
            wait_timeout: Duration::from_secs(60),
            retry: RetryPolicy::default(),
        }
    }
}
