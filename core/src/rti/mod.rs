//! The narrow RTI surface the core consumes. The real transport (publish
//! and subscribe plumbing, time-regulating/constrained advance mechanics)
//! lives behind these traits; the in-process bus in `fedlink-test` is one
//! implementation.

pub mod error;
pub mod retry;

pub use error::RtiError;

use crate::{
    queue::item::{AttributeItem, ParameterItem},
    time::logical_time::LogicalTime,
    types::{FederateHandle, ObjectInstanceHandle, ResignReason},
};

/// Outbound calls from the simulator thread into the RTI binding.
pub trait RtiAmbassador: Send {
    /// Join the federation, optionally claiming the master role. At most
    /// one federate may hold the role; a second claim fails here.
    fn join(
        &mut self,
        federation_name: &str,
        federate_name: &str,
        fom_modules: &[String],
        is_master: bool,
    ) -> Result<FederateHandle, RtiError>;

    fn resign(&mut self, reason: ResignReason) -> Result<(), RtiError>;

    /// Declare interest in an object class and its attributes, both as
    /// publisher and subscriber.
    fn publish_and_subscribe(
        &mut self,
        object_class_name: &str,
        attribute_names: &[String],
    ) -> Result<(), RtiError>;

    fn register_object_instance(
        &mut self,
        object_class_name: &str,
        instance_name: &str,
    ) -> Result<ObjectInstanceHandle, RtiError>;

    fn update_attributes(
        &mut self,
        instance: ObjectInstanceHandle,
        values: Vec<AttributeItem>,
    ) -> Result<(), RtiError>;

    fn send_interaction(
        &mut self,
        interaction_class_name: &str,
        parameters: Vec<ParameterItem>,
    ) -> Result<(), RtiError>;

    fn register_sync_point(&mut self, label: &str, tag: &[u8]) -> Result<(), RtiError>;

    fn achieve_sync_point(&mut self, label: &str) -> Result<(), RtiError>;

    fn enable_time_regulation(&mut self, lookahead: LogicalTime) -> Result<(), RtiError>;

    fn disable_time_regulation(&mut self) -> Result<(), RtiError>;

    fn enable_time_constrained(&mut self) -> Result<(), RtiError>;

    /// Request a time advance. The grant arrives asynchronously through
    /// `RtiListener::time_advance_grant` with a time no later than the
    /// requested one.
    fn request_time_advance(&mut self, time: LogicalTime) -> Result<(), RtiError>;
}

/// Inbound callbacks delivered on the RTI's own callback thread.
///
/// Implementations may only touch core state through the operations the
/// concurrency model allows that thread: pushing queue items, moving
/// sync-point states under the manager lock, setting received flags, and
/// signalling the grant condvar.
pub trait RtiListener: Send + Sync {
    fn sync_point_registration_succeeded(&self, label: &str);

    fn sync_point_registration_failed(&self, label: &str);

    fn sync_point_announced(&self, label: &str, tag: &[u8]);

    fn federation_synchronized(&self, label: &str);

    /// A subscribed object instance became known, with its handle.
    fn object_instance_discovered(&self, instance_name: &str, handle: ObjectInstanceHandle);

    fn reflect_attributes(&self, instance: ObjectInstanceHandle, values: &[(i32, Vec<u8>)]);

    fn receive_interaction(&self, interaction_class_name: &str, parameters: &[(i32, Vec<u8>)]);

    fn time_advance_grant(&self, time: LogicalTime);

    /// Time regulation took effect at the given federation time. Late
    /// joiners align their logical clock here.
    fn time_regulation_enabled(&self, time: LogicalTime);

    /// A federation member became visible (join or discovery).
    fn federate_discovered(&self, federate_name: &str);

    fn federate_resigned(&self, federate_name: &str);
}
