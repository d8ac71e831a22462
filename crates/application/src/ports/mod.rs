//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the template core and its host.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod clock;
mod editable_buffer;
mod storage;
mod timer;

pub use clock::Clock;
pub use editable_buffer::EditableBuffer;
pub use storage::{KeyValueStore, StorageError};
pub use timer::CancellableTimer;
