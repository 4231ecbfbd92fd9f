//! # Fedlink
//! Federation-execution control and time-management middleware. Sits
//! between a local discrete-event simulator and a distributed HLA runtime:
//! coordinates the execution lifecycle across federates, keeps four
//! coupled timelines in step, and hands strongly-typed data records across
//! the RTI callback boundary.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

#[macro_use]
extern crate cfg_if;

pub use fedlink_codec::{ByteReader, ByteWriter, CodecError, Encoding};

mod config;
mod error;
pub mod exco;
pub mod execution;
pub mod federate;
mod manager;
pub mod object;
pub mod queue;
pub mod rti;
pub mod sim;
pub mod sync;
pub mod time;
mod types;

pub use config::{ConfigError, CteClockSpec, FederateConfig, RetryPolicy};
pub use error::{FaultReport, FederationError};
pub use exco::{ExcoSnapshot, ExecutionConfiguration};
pub use execution::{
    error::ExecutionError,
    execution_control::{ExecutionControl, MtrDisposition},
    mode::{ExecutionMode, MtrMode},
    mtr::ModeTransitionRequest,
};
pub use federate::{
    error::FederateError,
    federate::Federate,
    roster::{FederationRoster, KnownFederate},
    time_advance::TimeAdvanceState,
};
pub use manager::{CycleStatus, FederationCallbacks, FederationManager};
pub use object::{
    attribute::{Attribute, AttributeBinding, AttributeConfig},
    error::ObjectError,
    object_instance::{DataRecord, ObjectInstance},
    registry::ObjectRegistry,
};
pub use queue::{
    error::QueueError,
    item::{AttributeItem, ParameterItem},
    item_queue::ItemQueue,
};
pub use rti::{error::RtiError, retry::retry_transient, RtiAmbassador, RtiListener};
pub use sim::SimScheduler;
pub use sync::{
    error::SyncError, labels, sync_point::SyncPointState, sync_point_manager::SyncPointManager,
};
pub use time::{
    base_time::{BaseTime, BaseTimeUnit, BASE_TIME_UNITS},
    clock::{ClockSource, HardwareCte, SystemClock},
    cte_timeline::CteTimeline,
    error::TimeError,
    hlt_timeline::{HltTimeline, SharedLogicalTime},
    logical_time::LogicalTime,
    scenario_timeline::ScenarioTimeline,
    sim_timeline::SimTimeline,
    timeline::Timeline,
};
pub use types::{ExitCode, FederateHandle, ObjectInstanceHandle, ResignReason};
