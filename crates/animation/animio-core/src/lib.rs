//! AnimIO core (host-agnostic)
//!
//! Captures the translation and rotation curves of an animatable object into a
//! flat JSON document and re-applies them to another object, optionally moved
//! to a new start frame. Hosts plug in through the traits in [`host`];
//! [`memory`] is a complete in-memory host.

pub mod channels;
pub mod codec;
pub mod config;
pub mod data;
pub mod error;
pub mod host;
pub mod io;
pub mod memory;
pub mod session;
pub mod stored_document;

// Re-exports for consumers (adapters)
pub use channels::{compute_offset, export_channel, export_document, import_document};
pub use codec::{decode, encode};
pub use config::CodecConfig;
pub use data::{
    AnimationDocument, ChannelEntry, ChannelKind, ConstantMode, Interpolation, Keyframe,
    TangentMode,
};
pub use error::{AnimIoError, Result};
pub use host::{selected_objects, Animatable, Curve, Scene};
pub use io::{read_document, write_document};
pub use memory::{MemoryCurve, MemoryObject, MemoryScene, ObjectId};
pub use session::Session;
pub use stored_document::{document_to_json, parse_document_json};
