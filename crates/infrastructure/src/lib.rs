//! Applymail Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer.

pub mod adapters;
pub mod persistence;
pub mod serialization;

pub use adapters::{CodeEditorBuffer, ManualClock, SystemClock, TextAreaBuffer, TokioTimer};
pub use persistence::{FileKeyValueStore, MemoryKeyValueStore};
pub use serialization::{
    SerializationError, from_json, from_json_bytes, read_json_file, to_json_stable,
    to_json_stable_bytes,
};
