//! Object & attribute dispatch: binding descriptors fixed at
//! configuration, pack/unpack hooks around each cycle, and ownership
//! tracking per attribute.

pub mod attribute;
pub mod error;
pub mod object_instance;
pub mod registry;
