use std::fmt;

use thiserror::Error;

use crate::{
    config::ConfigError,
    execution::error::ExecutionError,
    federate::error::FederateError,
    object::error::ObjectError,
    queue::error::QueueError,
    rti::error::RtiError,
    sync::error::SyncError,
    time::error::TimeError,
    types::ExitCode,
};

/// The aggregate error surfaced at the manager boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FederationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Time(#[from] TimeError),

    #[error(transparent)]
    Federate(#[from] FederateError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Object(#[from] ObjectError),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error(transparent)]
    Rti(#[from] RtiError),

    /// A bounded initialization phase elapsed without completing
    #[error("initialization phase \"{phase}\" timed out after {waited:?}")]
    InitializationTimeout {
        phase: &'static str,
        waited: std::time::Duration,
    },
}

impl FederationError {
    /// The process exit code this error maps to when it is fatal.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            FederationError::Execution(ExecutionError::BaseTimeMismatch { .. }) => {
                ExitCode::BaseTimeMismatch
            }
            FederationError::Federate(FederateError::RequiredFederatesMissing { .. }) => {
                ExitCode::RequiredFederateMissing
            }
            FederationError::Federate(FederateError::GrantTimeout { .. })
            | FederationError::Sync(SyncError::WaitTimeout { .. })
            | FederationError::InitializationTimeout { .. } => ExitCode::JoinTimeout,
            FederationError::Rti(_)
            | FederationError::Federate(FederateError::Rti(_))
            | FederationError::Execution(ExecutionError::Rti(_)) => ExitCode::RtiUnrecoverable,
            _ => ExitCode::RtiUnrecoverable,
        }
    }
}

/// A user-visible fault report: the error, the component it came from and
/// the federate's logical time in seconds when it happened.
#[derive(Debug, Clone)]
pub struct FaultReport {
    pub error: FederationError,
    pub component: &'static str,
    pub federate_time: f64,
}

impl FaultReport {
    pub fn new(error: FederationError, component: &'static str, federate_time: f64) -> Self {
        Self {
            error,
            component,
            federate_time,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        self.error.exit_code()
    }
}

impl fmt::Display for FaultReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} @ t={:.6}s] {}",
            self.component, self.federate_time, self.error
        )
    }
}
