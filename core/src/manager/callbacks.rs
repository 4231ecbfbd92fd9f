use std::sync::Arc;

use log::{debug, warn};

use crate::{
    execution::mtr::ModeTransitionRequest,
    federate::{roster::FederationRoster, time_advance::TimeAdvanceState},
    object::registry::ObjectRegistry,
    queue::{item::ParameterItem, item_queue::ItemQueue},
    rti::RtiListener,
    sync::sync_point_manager::SyncPointManager,
    time::logical_time::LogicalTime,
    types::ObjectInstanceHandle,
};

/// The RTI-callback-thread side of the core.
///
/// Everything here obeys the callback thread's narrow contract: push items
/// onto queues, move sync-point states under the manager lock, set
/// received flags, signal the grant condvar. Errors cannot propagate out
/// of an RTI callback, so they are logged and dropped.
pub struct FederationCallbacks {
    sync_points: SyncPointManager,
    objects: Arc<ObjectRegistry>,
    roster: FederationRoster,
    advance: TimeAdvanceState,
    mtr_queue: Arc<ItemQueue<Vec<ParameterItem>>>,
}

impl FederationCallbacks {
    pub fn new(
        sync_points: SyncPointManager,
        objects: Arc<ObjectRegistry>,
        roster: FederationRoster,
        advance: TimeAdvanceState,
        mtr_queue: Arc<ItemQueue<Vec<ParameterItem>>>,
    ) -> Self {
        Self {
            sync_points,
            objects,
            roster,
            advance,
            mtr_queue,
        }
    }
}

impl RtiListener for FederationCallbacks {
    fn sync_point_registration_succeeded(&self, label: &str) {
        debug!("sync point \"{}\" registration confirmed", label);
    }

    fn sync_point_registration_failed(&self, label: &str) {
        self.sync_points.on_registration_failed(label);
    }

    fn sync_point_announced(&self, label: &str, tag: &[u8]) {
        if let Err(sync_error) = self.sync_points.on_announce(label, tag) {
            warn!("announce for \"{}\" rejected: {}", label, sync_error);
        }
    }

    fn federation_synchronized(&self, label: &str) {
        if let Err(sync_error) = self.sync_points.on_synchronized(label) {
            warn!("synchronized for \"{}\" rejected: {}", label, sync_error);
        }
    }

    fn object_instance_discovered(&self, instance_name: &str, handle: ObjectInstanceHandle) {
        debug!("discovered instance \"{}\" as {}", instance_name, handle);
        self.objects.bind_handle(instance_name, handle);
    }

    fn reflect_attributes(&self, instance: ObjectInstanceHandle, values: &[(i32, Vec<u8>)]) {
        let Some(object) = self.objects.by_handle(instance) else {
            warn!("reflection for unknown instance {}", instance);
            return;
        };
        if let Err(object_error) = object.enqueue_reflection(values) {
            warn!(
                "dropping reflection for \"{}\": {}",
                object.instance_name(),
                object_error
            );
        }
    }

    fn receive_interaction(&self, interaction_class_name: &str, parameters: &[(i32, Vec<u8>)]) {
        if interaction_class_name != ModeTransitionRequest::INTERACTION_CLASS {
            warn!(
                "dropping interaction of unsubscribed class \"{}\"",
                interaction_class_name
            );
            return;
        }
        let items: Vec<ParameterItem> = parameters
            .iter()
            .map(|(index, buffer)| ParameterItem::copied_from(*index, buffer))
            .collect();
        if let Err(queue_error) = self.mtr_queue.push(items) {
            warn!("dropping mode transition request: {}", queue_error);
        }
    }

    fn time_advance_grant(&self, time: LogicalTime) {
        self.advance.grant_arrived(time);
    }

    fn time_regulation_enabled(&self, time: LogicalTime) {
        // Same handshake as a grant: the federation time at enable is
        // the joiner's starting logical time
        self.advance.grant_arrived(time);
    }

    fn federate_discovered(&self, federate_name: &str) {
        self.roster.mark_joined(federate_name);
    }

    fn federate_resigned(&self, federate_name: &str) {
        self.roster.mark_resigned(federate_name);
    }
}
