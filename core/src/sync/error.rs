use std::time::Duration;

use thiserror::Error;

use super::sync_point::SyncPointState;

/// Errors that can occur during synchronization-point operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    /// An operation arrived for a sync point in a state that does not
    /// permit it (e.g. achieve before announce)
    #[error("sync point \"{label}\" cannot {operation} from {from:?}")]
    InvalidTransition {
        label: String,
        from: SyncPointState,
        operation: &'static str,
    },

    /// An operation referenced a label with no local record
    #[error("no record of sync point \"{label}\"")]
    UnknownLabel { label: String },

    /// A bounded wait elapsed before the sync point reached the target
    /// state
    #[error("timed out after {waited:?} waiting for sync point \"{label}\"")]
    WaitTimeout { label: String, waited: Duration },

    /// The sync-point table lock was poisoned by a panicking thread
    #[error("sync point table lock poisoned")]
    LockPoisoned,
}
