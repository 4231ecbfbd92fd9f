//! The Execution Configuration Object: the master-owned replicated record
//! that carries the federation's mode, epochs, least common time step and
//! base-time multiplier to every member.

mod execution_configuration;

pub use execution_configuration::{ExcoSnapshot, ExecutionConfiguration};
