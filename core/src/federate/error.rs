use std::time::Duration;

use thiserror::Error;

use crate::{
    rti::error::RtiError,
    time::{error::TimeError, logical_time::LogicalTime},
};

/// Errors that can occur during federate lifecycle and time advance
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FederateError {
    /// An operation that needs a joined federation ran before join
    #[error("federate \"{federate_name}\" has not joined a federation")]
    NotJoined { federate_name: String },

    /// join() ran twice
    #[error("federate \"{federate_name}\" already joined \"{federation_name}\"")]
    AlreadyJoined {
        federate_name: String,
        federation_name: String,
    },

    /// Time regulation needs a lookahead of at least one base-time tick
    #[error("lookahead of {lookahead_ticks} tick(s) is below the 1-tick minimum")]
    LookaheadTooSmall { lookahead_ticks: i64 },

    /// The grant for a requested advance did not arrive in time
    #[error("no grant for advance to {requested} within {waited:?}")]
    GrantTimeout {
        requested: LogicalTime,
        waited: Duration,
    },

    /// A bounded wait for the required roster elapsed
    #[error("required federate(s) missing after {waited:?}: {missing:?}")]
    RequiredFederatesMissing {
        missing: Vec<String>,
        waited: Duration,
    },

    /// Shared federate state lock poisoned by a panicking thread
    #[error("federate state lock poisoned")]
    LockPoisoned,

    /// The RTI surface rejected a call
    #[error(transparent)]
    Rti(#[from] RtiError),

    /// The base-time configuration rejected a change
    #[error(transparent)]
    Time(#[from] TimeError),
}
