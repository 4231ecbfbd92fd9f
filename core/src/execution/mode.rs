use std::fmt;

use super::error::ExecutionError;

/// The federation execution mode, as carried in the ExCO (wire values
/// 0..4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum ExecutionMode {
    Uninitialized = 0,
    Initializing = 1,
    Running = 2,
    Freeze = 3,
    Shutdown = 4,
}

impl ExecutionMode {
    pub fn as_i16(&self) -> i16 {
        *self as i16
    }
}

impl TryFrom<i16> for ExecutionMode {
    type Error = ExecutionError;

    fn try_from(value: i16) -> Result<Self, ExecutionError> {
        match value {
            0 => Ok(ExecutionMode::Uninitialized),
            1 => Ok(ExecutionMode::Initializing),
            2 => Ok(ExecutionMode::Running),
            3 => Ok(ExecutionMode::Freeze),
            4 => Ok(ExecutionMode::Shutdown),
            _ => Err(ExecutionError::InvalidModeValue { value }),
        }
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExecutionMode::Uninitialized => "UNINITIALIZED",
            ExecutionMode::Initializing => "INITIALIZING",
            ExecutionMode::Running => "RUNNING",
            ExecutionMode::Freeze => "FREEZE",
            ExecutionMode::Shutdown => "SHUTDOWN",
        };
        write!(f, "{}", name)
    }
}

/// The target mode carried by a Mode Transition Request (wire values
/// 0..4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum MtrMode {
    Uninitialized = 0,
    Initializing = 1,
    GotoRun = 2,
    GotoFreeze = 3,
    GotoShutdown = 4,
}

impl MtrMode {
    pub fn as_i16(&self) -> i16 {
        *self as i16
    }

    /// The execution mode this request drives the federation into.
    pub fn target_mode(&self) -> ExecutionMode {
        match self {
            MtrMode::Uninitialized => ExecutionMode::Uninitialized,
            MtrMode::Initializing => ExecutionMode::Initializing,
            MtrMode::GotoRun => ExecutionMode::Running,
            MtrMode::GotoFreeze => ExecutionMode::Freeze,
            MtrMode::GotoShutdown => ExecutionMode::Shutdown,
        }
    }

    /// Master-side validation against the transition table: which requests
    /// are acceptable from the current mode.
    pub fn is_valid_from(&self, current: ExecutionMode) -> bool {
        match self {
            MtrMode::GotoRun => current == ExecutionMode::Freeze,
            MtrMode::GotoFreeze => current == ExecutionMode::Running,
            MtrMode::GotoShutdown => {
                matches!(current, ExecutionMode::Running | ExecutionMode::Freeze)
            }
            // Start-up transitions are driven by the initialization
            // handshake, never by an MTR
            MtrMode::Uninitialized | MtrMode::Initializing => false,
        }
    }
}

impl TryFrom<i16> for MtrMode {
    type Error = ExecutionError;

    fn try_from(value: i16) -> Result<Self, ExecutionError> {
        match value {
            0 => Ok(MtrMode::Uninitialized),
            1 => Ok(MtrMode::Initializing),
            2 => Ok(MtrMode::GotoRun),
            3 => Ok(MtrMode::GotoFreeze),
            4 => Ok(MtrMode::GotoShutdown),
            _ => Err(ExecutionError::InvalidModeValue { value }),
        }
    }
}

impl fmt::Display for MtrMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MtrMode::Uninitialized => "MTR_UNINITIALIZED",
            MtrMode::Initializing => "MTR_INITIALIZING",
            MtrMode::GotoRun => "MTR_GOTO_RUN",
            MtrMode::GotoFreeze => "MTR_GOTO_FREEZE",
            MtrMode::GotoShutdown => "MTR_GOTO_SHUTDOWN",
        };
        write!(f, "{}", name)
    }
}
