use std::{
    collections::{HashMap, HashSet},
    sync::{mpsc, Arc, Mutex, OnceLock},
    thread,
};

use fedlink::{
    AttributeItem, FederateHandle, LogicalTime, ObjectInstanceHandle, ParameterItem, ResignReason,
    RtiAmbassador, RtiError, RtiListener,
};

/// One queued callback, delivered on the bus's own dispatcher thread so
/// core code sees the same threading as a real RTI binding.
enum Callback {
    RegistrationSucceeded { label: String },
    RegistrationFailed { label: String },
    Announced { label: String, tag: Vec<u8> },
    Synchronized { label: String },
    InstanceDiscovered {
        instance_name: String,
        handle: ObjectInstanceHandle,
    },
    Reflect {
        handle: ObjectInstanceHandle,
        values: Vec<(i32, Vec<u8>)>,
    },
    Interaction {
        class_name: String,
        parameters: Vec<(i32, Vec<u8>)>,
    },
    Grant { time: LogicalTime },
    RegulationEnabled { time: LogicalTime },
    FederateDiscovered { federate_name: String },
    FederateResigned { federate_name: String },
}

struct Delivery {
    listener: Arc<dyn RtiListener>,
    callback: Callback,
}

struct Member {
    listener: Arc<dyn RtiListener>,
    subscribed_classes: HashSet<String>,
    time_regulating: bool,
    granted: i64,
    pending_request: Option<i64>,
}

/// The synchronization set is fixed at registration time; members joining
/// later are not participants and only hear the synchronized report.
struct SyncRecord {
    participants: HashSet<String>,
    achieved: HashSet<String>,
    synchronized: bool,
}

struct InstanceRecord {
    handle: ObjectInstanceHandle,
    class_name: String,
    owner: String,
    last_values: HashMap<i32, Vec<u8>>,
}

#[derive(Default)]
struct BusState {
    next_handle: u64,
    master: Option<String>,
    members: HashMap<String, Member>,
    sync_points: HashMap<String, SyncRecord>,
    instances: HashMap<String, InstanceRecord>,
}

/// An in-process federation: a shared bus connecting every mock
/// ambassador, with one dispatcher thread standing in for the RTI
/// callback thread.
pub struct MockFederation {
    state: Mutex<BusState>,
    sender: Mutex<mpsc::Sender<Delivery>>,
}

impl MockFederation {
    pub fn new() -> Arc<Self> {
        let (sender, receiver) = mpsc::channel::<Delivery>();
        thread::Builder::new()
            .name("mock-rti-callbacks".to_string())
            .spawn(move || {
                while let Ok(delivery) = receiver.recv() {
                    Self::dispatch(delivery);
                }
            })
            .expect("spawn mock RTI dispatcher");
        Arc::new(Self {
            state: Mutex::new(BusState::default()),
            sender: Mutex::new(sender),
        })
    }

    fn dispatch(delivery: Delivery) {
        let listener = delivery.listener;
        match delivery.callback {
            Callback::RegistrationSucceeded { label } => {
                listener.sync_point_registration_succeeded(&label)
            }
            Callback::RegistrationFailed { label } => {
                listener.sync_point_registration_failed(&label)
            }
            Callback::Announced { label, tag } => listener.sync_point_announced(&label, &tag),
            Callback::Synchronized { label } => listener.federation_synchronized(&label),
            Callback::InstanceDiscovered {
                instance_name,
                handle,
            } => listener.object_instance_discovered(&instance_name, handle),
            Callback::Reflect { handle, values } => listener.reflect_attributes(handle, &values),
            Callback::Interaction {
                class_name,
                parameters,
            } => listener.receive_interaction(&class_name, &parameters),
            Callback::Grant { time } => listener.time_advance_grant(time),
            Callback::RegulationEnabled { time } => listener.time_regulation_enabled(time),
            Callback::FederateDiscovered { federate_name } => {
                listener.federate_discovered(&federate_name)
            }
            Callback::FederateResigned { federate_name } => {
                listener.federate_resigned(&federate_name)
            }
        }
    }

    fn deliver(&self, listener: &Arc<dyn RtiListener>, callback: Callback) {
        let sender = self.sender.lock().expect("bus sender lock");
        let _ = sender.send(Delivery {
            listener: Arc::clone(listener),
            callback,
        });
    }

    /// Whether the named member currently regulates time.
    pub fn time_regulating(&self, federate_name: &str) -> Option<bool> {
        let state = self.state.lock().expect("bus state lock");
        state
            .members
            .get(federate_name)
            .map(|member| member.time_regulating)
    }

    /// Whether the named member is currently joined.
    pub fn is_joined(&self, federate_name: &str) -> bool {
        let state = self.state.lock().expect("bus state lock");
        state.members.contains_key(federate_name)
    }

    /// Conservative grant evaluation: a request for T is granted once
    /// every other time-regulating member has itself requested (or been
    /// granted) at least T, so no federate outruns a regulator by more
    /// than one step. Runs after every request and membership change.
    fn evaluate_grants(&self, state: &mut BusState) {
        loop {
            let mut granted_any = false;
            let names: Vec<String> = state.members.keys().cloned().collect();
            for name in &names {
                let Some(member) = state.members.get(name) else {
                    continue;
                };
                let Some(requested) = member.pending_request else {
                    continue;
                };
                let unblocked = state.members.iter().all(|(other_name, other)| {
                    if other_name == name || !other.time_regulating {
                        return true;
                    }
                    other.granted.max(other.pending_request.unwrap_or(other.granted))
                        >= requested
                });
                if unblocked {
                    let listener = Arc::clone(&member.listener);
                    // Grants never regress; a joiner still catching up is
                    // granted the time it was aligned to at enable
                    let grant_time = member.granted.max(requested);
                    if let Some(member) = state.members.get_mut(name) {
                        member.granted = grant_time;
                        member.pending_request = None;
                    }
                    self.deliver(
                        &listener,
                        Callback::Grant {
                            time: LogicalTime::from_ticks(grant_time),
                        },
                    );
                    granted_any = true;
                }
            }
            if !granted_any {
                break;
            }
        }
    }

    /// Re-check outstanding sync records after the member set shrank.
    fn recheck_sync_points(&self, state: &mut BusState) {
        let present: HashSet<String> = state.members.keys().cloned().collect();
        let mut newly_synchronized = Vec::new();
        for (label, record) in state.sync_points.iter_mut() {
            if record.synchronized {
                continue;
            }
            let outstanding: Vec<&String> = record
                .participants
                .iter()
                .filter(|name| present.contains(*name) && !record.achieved.contains(*name))
                .collect();
            if outstanding.is_empty() && !record.participants.is_empty() {
                record.synchronized = true;
                newly_synchronized.push(label.clone());
            }
        }
        for label in newly_synchronized {
            for member in state.members.values() {
                self.deliver(
                    &member.listener,
                    Callback::Synchronized {
                        label: label.clone(),
                    },
                );
            }
        }
    }
}

/// The per-federate side of the bus. The listener slot is filled by the
/// harness once the manager's callbacks exist; join fails before that.
pub struct MockRtiAmbassador {
    bus: Arc<MockFederation>,
    listener: Arc<OnceLock<Arc<dyn RtiListener>>>,
    joined_name: Option<String>,
}

impl MockRtiAmbassador {
    pub fn new(bus: &Arc<MockFederation>) -> (Self, Arc<OnceLock<Arc<dyn RtiListener>>>) {
        let listener = Arc::new(OnceLock::new());
        (
            Self {
                bus: Arc::clone(bus),
                listener: Arc::clone(&listener),
                joined_name: None,
            },
            listener,
        )
    }

    fn my_listener(&self) -> Result<Arc<dyn RtiListener>, RtiError> {
        self.listener
            .get()
            .cloned()
            .ok_or(RtiError::NotConnected)
    }

    fn my_name(&self) -> Result<&str, RtiError> {
        self.joined_name.as_deref().ok_or(RtiError::NotConnected)
    }
}

impl RtiAmbassador for MockRtiAmbassador {
    fn join(
        &mut self,
        _federation_name: &str,
        federate_name: &str,
        _fom_modules: &[String],
        is_master: bool,
    ) -> Result<FederateHandle, RtiError> {
        let listener = self.my_listener()?;
        let mut state = self.bus.state.lock().expect("bus state lock");

        if state.members.contains_key(federate_name) {
            return Err(RtiError::JoinRejected {
                reason: format!("federate name \"{}\" already in use", federate_name),
            });
        }
        if is_master {
            if let Some(holder) = &state.master {
                return Err(RtiError::MasterAlreadyClaimed {
                    holder: holder.clone(),
                });
            }
            state.master = Some(federate_name.to_string());
        }

        // Mutual discovery with every existing member
        for (existing_name, existing) in state.members.iter() {
            self.bus.deliver(
                &existing.listener,
                Callback::FederateDiscovered {
                    federate_name: federate_name.to_string(),
                },
            );
            self.bus.deliver(
                &listener,
                Callback::FederateDiscovered {
                    federate_name: existing_name.clone(),
                },
            );
        }

        // A late joiner hears already-synchronized points as synchronized,
        // never announced
        for (label, record) in state.sync_points.iter() {
            if record.synchronized {
                self.bus.deliver(
                    &listener,
                    Callback::Synchronized {
                        label: label.clone(),
                    },
                );
            }
        }

        state.next_handle += 1;
        let handle = FederateHandle(state.next_handle);
        state.members.insert(
            federate_name.to_string(),
            Member {
                listener,
                subscribed_classes: HashSet::new(),
                time_regulating: false,
                granted: 0,
                pending_request: None,
            },
        );
        self.joined_name = Some(federate_name.to_string());
        Ok(handle)
    }

    fn resign(&mut self, _reason: ResignReason) -> Result<(), RtiError> {
        let name = self.my_name()?.to_string();
        let mut state = self.bus.state.lock().expect("bus state lock");
        state.members.remove(&name);
        if state.master.as_deref() == Some(&name) {
            state.master = None;
        }
        for member in state.members.values() {
            self.bus.deliver(
                &member.listener,
                Callback::FederateResigned {
                    federate_name: name.clone(),
                },
            );
        }
        self.bus.recheck_sync_points(&mut state);
        self.bus.evaluate_grants(&mut state);
        self.joined_name = None;
        Ok(())
    }

    fn publish_and_subscribe(
        &mut self,
        object_class_name: &str,
        _attribute_names: &[String],
    ) -> Result<(), RtiError> {
        let name = self.my_name()?.to_string();
        let listener = self.my_listener()?;
        let mut state = self.bus.state.lock().expect("bus state lock");

        // Existing instances of the class become visible now, along with
        // their latest values (the provide-update a real RTI would run)
        for (instance_name, instance) in state.instances.iter() {
            if instance.class_name == object_class_name && instance.owner != name {
                self.bus.deliver(
                    &listener,
                    Callback::InstanceDiscovered {
                        instance_name: instance_name.clone(),
                        handle: instance.handle,
                    },
                );
                if !instance.last_values.is_empty() {
                    let values: Vec<(i32, Vec<u8>)> = instance
                        .last_values
                        .iter()
                        .map(|(index, buffer)| (*index, buffer.clone()))
                        .collect();
                    self.bus.deliver(
                        &listener,
                        Callback::Reflect {
                            handle: instance.handle,
                            values,
                        },
                    );
                }
            }
        }

        let member = state
            .members
            .get_mut(&name)
            .ok_or(RtiError::NotConnected)?;
        member
            .subscribed_classes
            .insert(object_class_name.to_string());
        Ok(())
    }

    fn register_object_instance(
        &mut self,
        object_class_name: &str,
        instance_name: &str,
    ) -> Result<ObjectInstanceHandle, RtiError> {
        let name = self.my_name()?.to_string();
        let mut state = self.bus.state.lock().expect("bus state lock");
        if state.instances.contains_key(instance_name) {
            return Err(RtiError::Unrecoverable {
                detail: format!("instance name \"{}\" already reserved", instance_name),
            });
        }
        state.next_handle += 1;
        let handle = ObjectInstanceHandle(state.next_handle);
        state.instances.insert(
            instance_name.to_string(),
            InstanceRecord {
                handle,
                class_name: object_class_name.to_string(),
                owner: name.clone(),
                last_values: HashMap::new(),
            },
        );
        for (member_name, member) in state.members.iter() {
            if member_name != &name && member.subscribed_classes.contains(object_class_name) {
                self.bus.deliver(
                    &member.listener,
                    Callback::InstanceDiscovered {
                        instance_name: instance_name.to_string(),
                        handle,
                    },
                );
            }
        }
        Ok(handle)
    }

    fn update_attributes(
        &mut self,
        instance: ObjectInstanceHandle,
        values: Vec<AttributeItem>,
    ) -> Result<(), RtiError> {
        let name = self.my_name()?.to_string();
        let mut guard = self.bus.state.lock().expect("bus state lock");
        let state = &mut *guard;
        let Some(record) = state
            .instances
            .values_mut()
            .find(|record| record.handle == instance)
        else {
            return Err(RtiError::UnknownObjectInstance { handle: instance.0 });
        };
        let class_name = record.class_name.clone();
        let wire_values: Vec<(i32, Vec<u8>)> = values
            .iter()
            .map(|item| (item.index, item.data.to_vec()))
            .collect();
        for (index, buffer) in &wire_values {
            record.last_values.insert(*index, buffer.clone());
        }
        for (member_name, member) in state.members.iter() {
            if member_name != &name && member.subscribed_classes.contains(&class_name) {
                self.bus.deliver(
                    &member.listener,
                    Callback::Reflect {
                        handle: instance,
                        values: wire_values.clone(),
                    },
                );
            }
        }
        Ok(())
    }

    fn send_interaction(
        &mut self,
        interaction_class_name: &str,
        parameters: Vec<ParameterItem>,
    ) -> Result<(), RtiError> {
        self.my_name()?;
        let state = self.bus.state.lock().expect("bus state lock");
        let wire_parameters: Vec<(i32, Vec<u8>)> = parameters
            .iter()
            .map(|item| (item.index, item.data.to_vec()))
            .collect();
        // Interactions loop back to the sender too: a master requesting a
        // transition arbitrates its own request
        for member in state.members.values() {
            self.bus.deliver(
                &member.listener,
                Callback::Interaction {
                    class_name: interaction_class_name.to_string(),
                    parameters: wire_parameters.clone(),
                },
            );
        }
        Ok(())
    }

    fn register_sync_point(&mut self, label: &str, tag: &[u8]) -> Result<(), RtiError> {
        self.my_name()?;
        let listener = self.my_listener()?;
        let mut state = self.bus.state.lock().expect("bus state lock");

        // A label still working toward synchronized belongs to its first
        // registrar; re-registration after synchronized starts a new round
        let in_flight = state
            .sync_points
            .get(label)
            .map(|record| !record.synchronized)
            .unwrap_or(false);
        if in_flight {
            self.bus.deliver(
                &listener,
                Callback::RegistrationFailed {
                    label: label.to_string(),
                },
            );
            return Ok(());
        }

        let participants: HashSet<String> = state.members.keys().cloned().collect();
        state.sync_points.insert(
            label.to_string(),
            SyncRecord {
                participants: participants.clone(),
                achieved: HashSet::new(),
                synchronized: false,
            },
        );
        self.bus.deliver(
            &listener,
            Callback::RegistrationSucceeded {
                label: label.to_string(),
            },
        );
        for participant in &participants {
            if let Some(member) = state.members.get(participant) {
                self.bus.deliver(
                    &member.listener,
                    Callback::Announced {
                        label: label.to_string(),
                        tag: tag.to_vec(),
                    },
                );
            }
        }
        Ok(())
    }

    fn achieve_sync_point(&mut self, label: &str) -> Result<(), RtiError> {
        let name = self.my_name()?.to_string();
        let mut state = self.bus.state.lock().expect("bus state lock");
        let Some(record) = state.sync_points.get_mut(label) else {
            return Err(RtiError::UnknownSyncPoint {
                label: label.to_string(),
            });
        };
        record.achieved.insert(name);
        self.bus.recheck_sync_points(&mut state);
        Ok(())
    }

    fn enable_time_regulation(&mut self, _lookahead: LogicalTime) -> Result<(), RtiError> {
        let name = self.my_name()?.to_string();
        let listener = self.my_listener()?;
        let mut state = self.bus.state.lock().expect("bus state lock");
        // Regulation takes effect at the current federation time, which a
        // late joiner adopts as its starting logical time
        let federation_time = state
            .members
            .values()
            .filter(|member| member.time_regulating)
            .map(|member| member.granted)
            .max()
            .unwrap_or(0);
        if let Some(member) = state.members.get_mut(&name) {
            member.time_regulating = true;
            member.granted = member.granted.max(federation_time);
        }
        self.bus.deliver(
            &listener,
            Callback::RegulationEnabled {
                time: LogicalTime::from_ticks(federation_time),
            },
        );
        Ok(())
    }

    fn disable_time_regulation(&mut self) -> Result<(), RtiError> {
        let name = self.my_name()?.to_string();
        let mut state = self.bus.state.lock().expect("bus state lock");
        if let Some(member) = state.members.get_mut(&name) {
            member.time_regulating = false;
        }
        // A departing regulator may unblock everyone else
        self.bus.evaluate_grants(&mut state);
        Ok(())
    }

    fn enable_time_constrained(&mut self) -> Result<(), RtiError> {
        self.my_name()?;
        Ok(())
    }

    fn request_time_advance(&mut self, time: LogicalTime) -> Result<(), RtiError> {
        let name = self.my_name()?.to_string();
        let mut state = self.bus.state.lock().expect("bus state lock");
        if let Some(member) = state.members.get_mut(&name) {
            member.pending_request = Some(time.ticks());
        }
        self.bus.evaluate_grants(&mut state);
        Ok(())
    }
}
