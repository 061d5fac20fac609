pub mod backend;
pub mod file;
pub mod memory;

pub use backend::{AccessMode, StorageBackend};
pub use file::{DurabilityMode, FileBackend};
pub use memory::{InMemoryBackend, OpenEvent, OpenKind};
