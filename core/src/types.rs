use std::fmt;

/// Handle assigned by the RTI when a federate joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FederateHandle(pub u64);

/// Handle identifying one registered object instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectInstanceHandle(pub u64);

/// The reason handed to the RTI when resigning from a federation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResignReason {
    /// Leave without touching owned instances (the clean-shutdown path)
    NoAction,
    /// Delete created object instances on the way out
    DeleteObjects,
}

/// Process exit codes reported by the manager on termination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    CleanShutdown = 0,
    JoinTimeout = 2,
    BaseTimeMismatch = 3,
    RequiredFederateMissing = 4,
    RtiUnrecoverable = 5,
}

impl ExitCode {
    pub fn code(&self) -> i32 {
        *self as i32
    }
}

impl fmt::Display for FederateHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "federate-{}", self.0)
    }
}

impl fmt::Display for ObjectInstanceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object-{}", self.0)
    }
}
