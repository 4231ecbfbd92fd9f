use fedlink_codec::CodecError;
use thiserror::Error;

use crate::queue::error::QueueError;

/// Errors that can occur during object and attribute dispatch
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ObjectError {
    /// pack()/unpack() touched an object before configure_attributes()
    #[error("object \"{instance_name}\" has no configured attributes")]
    NotConfigured { instance_name: String },

    /// configure_attributes() ran twice; bindings are immutable
    #[error("object \"{instance_name}\" attributes already configured")]
    AlreadyConfigured { instance_name: String },

    /// A lookup referenced an attribute index outside the binding table
    #[error("attribute index {index} out of range (object has {count})")]
    IndexOutOfRange { index: i32, count: usize },

    /// A lookup referenced a FOM name with no binding
    #[error("no attribute bound to FOM name \"{fom_name}\"")]
    UnknownAttribute { fom_name: String },

    /// A reflected buffer failed to decode into its bound field
    #[error("attribute \"{fom_name}\" failed to decode: {source}")]
    DecodeFailed {
        fom_name: String,
        source: CodecError,
    },

    /// The attribute value lock was poisoned by a panicking thread
    #[error("attribute buffer lock poisoned")]
    LockPoisoned,

    /// The object's reflection queue failed
    #[error(transparent)]
    Queue(#[from] QueueError),
}
