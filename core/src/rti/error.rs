use thiserror::Error;

/// Errors surfaced by the RTI binding at the core boundary.
///
/// The state machine transitions on the *kind*, never on a catch-all:
/// transient kinds are retried with bounded backoff, structural kinds send
/// the federate to shutdown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RtiError {
    /// The binding lost (or never had) its connection to the RTI
    #[error("not connected to the RTI")]
    NotConnected,

    /// The RTI rejected the join request
    #[error("join rejected: {reason}")]
    JoinRejected { reason: String },

    /// A second federate attempted to claim the master role
    #[error("master role already claimed by \"{holder}\"")]
    MasterAlreadyClaimed { holder: String },

    /// An operation referenced a synchronization point label the RTI does
    /// not know
    #[error("unknown synchronization point \"{label}\"")]
    UnknownSyncPoint { label: String },

    /// An operation referenced an object instance the RTI does not know
    #[error("unknown object instance {handle}")]
    UnknownObjectInstance { handle: u64 },

    /// A time-management service call was rejected
    #[error("time management rejected: {detail}")]
    TimeManagementRejected { detail: String },

    /// The RTI reported an unrecoverable internal fault
    #[error("unrecoverable RTI fault: {detail}")]
    Unrecoverable { detail: String },
}

impl RtiError {
    /// Whether the caller should retry with backoff rather than shut down.
    pub fn is_transient(&self) -> bool {
        matches!(self, RtiError::NotConnected)
    }
}
