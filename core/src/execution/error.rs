use thiserror::Error;

use crate::{object::error::ObjectError, rti::error::RtiError, sync::error::SyncError};

/// Errors raised by the execution-control state machine
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExecutionError {
    /// A wire value outside the 0..4 mode range
    #[error("invalid execution mode wire value {value}")]
    InvalidModeValue { value: i16 },

    /// An MTR interaction arrived without a decodable execution_mode
    /// parameter
    #[error("mode transition request missing its execution_mode parameter")]
    MtrMissingMode,

    /// A non-master federate attempted a master-only operation
    #[error("only the master may {operation}")]
    NotMaster { operation: &'static str },

    /// The replicated base-time multiplier disagrees with the local one.
    /// Fatal: the federation cannot mix tick units.
    #[error("base-time multiplier mismatch: local {local}, federation {remote}")]
    BaseTimeMismatch { local: i64, remote: i64 },

    /// A peer violated the mode-transition protocol
    #[error("protocol violation: {detail}")]
    ProtocolViolation { detail: String },

    /// Sync-point gating failed underneath a transition
    #[error(transparent)]
    Sync(#[from] SyncError),

    /// Attribute dispatch failed underneath a transition
    #[error(transparent)]
    Object(#[from] ObjectError),

    /// The RTI surface failed underneath a transition
    #[error(transparent)]
    Rti(#[from] RtiError),
}
