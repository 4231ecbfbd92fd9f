//! The fixed synchronization-point labels. These are exact wire strings
//! (sent wide on the wire) and must not drift between federates.

pub const INITIALIZATION_STARTED: &str = "initialization_started";
pub const INITIALIZATION_COMPLETE: &str = "initialization_complete";
pub const SIM_CONFIG_V2: &str = "sim_config_v2";
pub const INITIALIZE_V2: &str = "initialize_v2";
pub const INITIALIZATION_COMPLETE_V2: &str = "initialization_complete_v2";
pub const STARTUP_V2: &str = "startup_v2";
pub const FEDSAVE_V2: &str = "FEDSAVE_v2";
pub const FEDRUN_V2: &str = "FEDRUN_v2";

/// Gates for master-arbitrated mode transitions.
pub const MTR_RUN: &str = "mtr_run";
pub const MTR_FREEZE: &str = "mtr_freeze";
pub const MTR_SHUTDOWN: &str = "mtr_shutdown";

/// The initialization sync-point set, registered in order during startup.
pub const INITIALIZATION_LABELS: [&str; 8] = [
    INITIALIZATION_STARTED,
    INITIALIZATION_COMPLETE,
    SIM_CONFIG_V2,
    INITIALIZE_V2,
    INITIALIZATION_COMPLETE_V2,
    STARTUP_V2,
    FEDSAVE_V2,
    FEDRUN_V2,
];
