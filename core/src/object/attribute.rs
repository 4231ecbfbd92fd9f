use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use fedlink_codec::Encoding;

use super::error::ObjectError;

/// When an attribute's value travels: once at initialization, every cycle,
/// on demand, or both of the first and last.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeConfig {
    Initialize,
    Cyclic,
    Intermittent,
    InitializeIntermittent,
}

impl AttributeConfig {
    pub fn sends_at_initialization(&self) -> bool {
        matches!(
            self,
            AttributeConfig::Initialize | AttributeConfig::InitializeIntermittent
        )
    }

    pub fn sends_cyclically(&self) -> bool {
        matches!(self, AttributeConfig::Cyclic)
    }

    pub fn sends_intermittently(&self) -> bool {
        matches!(
            self,
            AttributeConfig::Intermittent | AttributeConfig::InitializeIntermittent
        )
    }
}

/// One FOM-attribute binding. Immutable after `configure_attributes()`.
#[derive(Debug, Clone)]
pub struct AttributeBinding {
    /// Name in the federation object model.
    pub fom_name: String,
    /// Name of the bound local variable, for diagnostics.
    pub local_name: String,
    pub config: AttributeConfig,
    pub encoding: Encoding,
}

impl AttributeBinding {
    pub fn new(
        fom_name: impl Into<String>,
        local_name: impl Into<String>,
        config: AttributeConfig,
        encoding: Encoding,
    ) -> Self {
        Self {
            fom_name: fom_name.into(),
            local_name: local_name.into(),
            config,
            encoding,
        }
    }
}

/// A bound attribute: the immutable binding, the latest encoded value, and
/// the cross-thread received flag.
///
/// The flag contract is strict: only the RTI callback thread sets it (at
/// reflection enqueue) and only the simulator thread clears it (after
/// unpack consumes the value).
pub struct Attribute {
    binding: AttributeBinding,
    buffer: Mutex<Vec<u8>>,
    is_received: AtomicBool,
    locally_owned: AtomicBool,
}

impl Attribute {
    pub fn new(binding: AttributeBinding, locally_owned: bool) -> Self {
        Self {
            binding,
            buffer: Mutex::new(Vec::new()),
            is_received: AtomicBool::new(false),
            locally_owned: AtomicBool::new(locally_owned),
        }
    }

    pub fn binding(&self) -> &AttributeBinding {
        &self.binding
    }

    pub fn is_received(&self) -> bool {
        self.is_received.load(Ordering::SeqCst)
    }

    /// Callback-thread side of the received handshake.
    pub fn mark_received(&self) {
        self.is_received.store(true, Ordering::SeqCst);
    }

    /// Simulator-thread side: called once the value is consumed.
    pub fn clear_received(&self) {
        self.is_received.store(false, Ordering::SeqCst);
    }

    pub fn is_locally_owned(&self) -> bool {
        self.locally_owned.load(Ordering::SeqCst)
    }

    pub fn set_locally_owned(&self, owned: bool) {
        self.locally_owned.store(owned, Ordering::SeqCst);
    }

    /// Replace the encoded value (pack output or a drained reflection).
    pub fn store_encoded(&self, bytes: Vec<u8>) -> Result<(), ObjectError> {
        let mut buffer = self.buffer.lock().map_err(|_| ObjectError::LockPoisoned)?;
        *buffer = bytes;
        Ok(())
    }

    /// Copy of the current encoded value.
    pub fn encoded(&self) -> Result<Vec<u8>, ObjectError> {
        let buffer = self.buffer.lock().map_err(|_| ObjectError::LockPoisoned)?;
        Ok(buffer.clone())
    }
}
