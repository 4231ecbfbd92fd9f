//! The local view of one federation member: identity, the required-
//! federate roster, join/resign, time-management flags and the
//! request/grant time-advance loop.

pub mod error;
#[allow(clippy::module_inception)]
pub mod federate;
pub mod roster;
pub mod time_advance;
