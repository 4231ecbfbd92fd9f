use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex,
    },
};

use log::warn;

use crate::{
    queue::{item::AttributeItem, item_queue::ItemQueue},
    types::ObjectInstanceHandle,
};

use super::{
    attribute::{Attribute, AttributeBinding},
    error::ObjectError,
};

/// A record type bound to an object instance: `pack` encodes the local
/// struct into the attribute buffers before a send, `unpack` decodes
/// received buffers back into the struct after a drain.
///
/// Both run on the simulator thread over a consistent snapshot; the object
/// guarantees reflections drained before `unpack` are visible in the
/// buffers, and `pack` output is collected atomically per cycle.
pub trait DataRecord: Send {
    fn pack(&mut self, object: &ObjectInstance) -> Result<(), ObjectError>;

    fn unpack(&mut self, object: &ObjectInstance) -> Result<(), ObjectError>;
}

/// One published/subscribed object instance: the immutable binding table,
/// the per-attribute value buffers, and the reflection queue filled by the
/// RTI callback thread.
pub struct ObjectInstance {
    class_name: String,
    instance_name: String,
    handle: AtomicU64,
    attributes: Mutex<Vec<Attribute>>,
    index_by_fom_name: Mutex<HashMap<String, usize>>,
    reflections: ItemQueue<AttributeItem>,
}

const NO_HANDLE: u64 = u64::MAX;

impl ObjectInstance {
    pub fn new(class_name: impl Into<String>, instance_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            instance_name: instance_name.into(),
            handle: AtomicU64::new(NO_HANDLE),
            attributes: Mutex::new(Vec::new()),
            index_by_fom_name: Mutex::new(HashMap::new()),
            reflections: ItemQueue::new(),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    pub fn handle(&self) -> Option<ObjectInstanceHandle> {
        match self.handle.load(Ordering::SeqCst) {
            NO_HANDLE => None,
            raw => Some(ObjectInstanceHandle(raw)),
        }
    }

    pub fn set_handle(&self, handle: ObjectInstanceHandle) {
        self.handle.store(handle.0, Ordering::SeqCst);
    }

    /// Install the binding table. Bindings are immutable afterwards.
    pub fn configure_attributes(
        &self,
        bindings: Vec<AttributeBinding>,
        locally_owned: bool,
    ) -> Result<(), ObjectError> {
        let mut attributes = self
            .attributes
            .lock()
            .map_err(|_| ObjectError::LockPoisoned)?;
        if !attributes.is_empty() {
            return Err(ObjectError::AlreadyConfigured {
                instance_name: self.instance_name.clone(),
            });
        }
        let mut index_by_fom_name = self
            .index_by_fom_name
            .lock()
            .map_err(|_| ObjectError::LockPoisoned)?;
        for (index, binding) in bindings.into_iter().enumerate() {
            index_by_fom_name.insert(binding.fom_name.clone(), index);
            attributes.push(Attribute::new(binding, locally_owned));
        }
        Ok(())
    }

    pub fn is_configured(&self) -> bool {
        self.attributes
            .lock()
            .map(|attributes| !attributes.is_empty())
            .unwrap_or(false)
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes
            .lock()
            .map(|attributes| attributes.len())
            .unwrap_or(0)
    }

    /// Run `access` against the attribute at `index`.
    pub fn with_attribute<R>(
        &self,
        index: i32,
        access: impl FnOnce(&Attribute) -> R,
    ) -> Result<R, ObjectError> {
        let attributes = self
            .attributes
            .lock()
            .map_err(|_| ObjectError::LockPoisoned)?;
        if attributes.is_empty() {
            return Err(ObjectError::NotConfigured {
                instance_name: self.instance_name.clone(),
            });
        }
        let slot = usize::try_from(index).ok().and_then(|i| attributes.get(i));
        match slot {
            Some(attribute) => Ok(access(attribute)),
            None => Err(ObjectError::IndexOutOfRange {
                index,
                count: attributes.len(),
            }),
        }
    }

    /// Run `access` against the attribute bound to `fom_name`.
    pub fn with_attribute_named<R>(
        &self,
        fom_name: &str,
        access: impl FnOnce(&Attribute) -> R,
    ) -> Result<R, ObjectError> {
        let index = {
            let index_by_fom_name = self
                .index_by_fom_name
                .lock()
                .map_err(|_| ObjectError::LockPoisoned)?;
            *index_by_fom_name
                .get(fom_name)
                .ok_or_else(|| ObjectError::UnknownAttribute {
                    fom_name: fom_name.to_string(),
                })?
        };
        self.with_attribute(index as i32, access)
    }

    /// Callback-thread entry: queue one reflection's worth of attribute
    /// values and flag them received. Values for indices outside the
    /// binding table are dropped with a warning.
    pub fn enqueue_reflection(&self, values: &[(i32, Vec<u8>)]) -> Result<(), ObjectError> {
        for (index, buffer) in values {
            match self.with_attribute(*index, |attribute| {
                if attribute.is_locally_owned() {
                    // Stale echo of our own value; never overwrite
                    return false;
                }
                attribute.mark_received();
                true
            }) {
                Ok(true) => {
                    self.reflections
                        .push(AttributeItem::copied_from(*index, buffer))?;
                }
                Ok(false) => {}
                Err(ObjectError::IndexOutOfRange { index, count }) => {
                    warn!(
                        "object \"{}\": dropping reflected attribute index {} (table has {})",
                        self.instance_name, index, count
                    );
                }
                Err(other) => return Err(other),
            }
        }
        Ok(())
    }

    /// Simulator-thread entry: move every queued reflection into its
    /// attribute buffer. Returns the number of items consumed.
    pub fn drain_reflections(&self) -> Result<usize, ObjectError> {
        self.reflections.rewind()?;
        let mut consumed = 0;
        while let Some(item) = self.reflections.pop()? {
            self.with_attribute(item.index, |attribute| {
                attribute.store_encoded(item.data.into_vec())
            })??;
            consumed += 1;
        }
        Ok(consumed)
    }

    pub fn pending_reflections(&self) -> usize {
        self.reflections.size().unwrap_or(0)
    }

    /// Collect the encoded values to publish this cycle. `initialization`
    /// selects the initialize set; otherwise the cyclic + intermittent
    /// sets are collected (intermittent attributes only when flagged by
    /// the caller having repacked them).
    pub fn collect_updates(&self, initialization: bool) -> Result<Vec<AttributeItem>, ObjectError> {
        let attributes = self
            .attributes
            .lock()
            .map_err(|_| ObjectError::LockPoisoned)?;
        if attributes.is_empty() {
            return Err(ObjectError::NotConfigured {
                instance_name: self.instance_name.clone(),
            });
        }
        let mut updates = Vec::new();
        for (index, attribute) in attributes.iter().enumerate() {
            if !attribute.is_locally_owned() {
                continue;
            }
            let config = attribute.binding().config;
            let due = if initialization {
                config.sends_at_initialization()
            } else {
                config.sends_cyclically() || config.sends_intermittently()
            };
            if due {
                updates.push(AttributeItem {
                    index: index as i32,
                    data: attribute.encoded()?.into_boxed_slice(),
                });
            }
        }
        Ok(updates)
    }
}
