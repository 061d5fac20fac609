// ============================================================================
// Persistor Library
// ============================================================================

//! Type-scoped entity persistence.
//!
//! A [`Persistor`] saves an ordered collection of one entity type to a
//! [`StorageBackend`], loads it back unchanged, and hands out a durable
//! 1, 2, 3, ... identifier sequence for that type. Each type lives under its
//! own namespace: `<identity>.data` for the collection, `<identity>.id` for
//! the counter.
//!
//! All operations are synchronous. Nothing spans the data and counter
//! streams transactionally, and a write interrupted midway leaves that
//! stream in an unspecified state.

pub mod codec;
pub mod core;
pub mod persist;
pub mod storage;

// Re-export main types for convenience
pub use codec::{CodecError, CodecFormat, EntityCodec, JsonCodec, MessagePackCodec};
pub use core::{PersistError, Result};
pub use persist::{
    Entity, EntityStore, Namespace, Persistor, PersistorConfig, SequenceGenerator,
    SynchronizedSequence, TypedEntity,
};
pub use storage::{
    AccessMode, DurabilityMode, FileBackend, InMemoryBackend, OpenEvent, OpenKind,
    StorageBackend,
};
