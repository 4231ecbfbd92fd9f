use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use crate::types::ObjectInstanceHandle;

use super::object_instance::ObjectInstance;

/// The shared table of object instances, keyed by instance name and by
/// RTI handle. The simulator thread registers instances; the callback
/// thread resolves reflection targets.
#[derive(Default)]
pub struct ObjectRegistry {
    by_name: Mutex<HashMap<String, Arc<ObjectInstance>>>,
    by_handle: Mutex<HashMap<u64, Arc<ObjectInstance>>>,
}

impl ObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, object: Arc<ObjectInstance>) {
        if let Ok(mut by_name) = self.by_name.lock() {
            by_name.insert(object.instance_name().to_string(), Arc::clone(&object));
        }
        if let Some(handle) = object.handle() {
            if let Ok(mut by_handle) = self.by_handle.lock() {
                by_handle.insert(handle.0, object);
            }
        }
    }

    /// Bind the RTI handle for a known instance (registration result on
    /// the owner, discovery callback on subscribers).
    pub fn bind_handle(&self, instance_name: &str, handle: ObjectInstanceHandle) {
        let object = self
            .by_name
            .lock()
            .ok()
            .and_then(|by_name| by_name.get(instance_name).cloned());
        if let Some(object) = object {
            object.set_handle(handle);
            if let Ok(mut by_handle) = self.by_handle.lock() {
                by_handle.insert(handle.0, object);
            }
        }
    }

    pub fn by_name(&self, instance_name: &str) -> Option<Arc<ObjectInstance>> {
        self.by_name
            .lock()
            .ok()
            .and_then(|by_name| by_name.get(instance_name).cloned())
    }

    pub fn by_handle(&self, handle: ObjectInstanceHandle) -> Option<Arc<ObjectInstance>> {
        self.by_handle
            .lock()
            .ok()
            .and_then(|by_handle| by_handle.get(&handle.0).cloned())
    }

    pub fn all(&self) -> Vec<Arc<ObjectInstance>> {
        self.by_name
            .lock()
            .map(|by_name| by_name.values().cloned().collect())
            .unwrap_or_default()
    }
}
