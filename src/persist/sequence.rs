use super::namespace::Namespace;
use super::stream;
use crate::codec::{decode_counter, encode_counter};
use crate::core::{PersistError, Result};
use crate::storage::{AccessMode, StorageBackend};
use log::{debug, warn};
use std::sync::Mutex;

/// Durable per-namespace identifier counter
///
/// Each call reads the counter, adds one and writes it back. Calls that run
/// one at a time yield 1, 2, 3, ... regardless of how many generators share
/// the backend. Overlapping calls are not serialized and may hand out the
/// same value twice; see [`SynchronizedSequence`] for an in-process guard.
#[derive(Debug, Clone)]
pub struct SequenceGenerator {
    namespace: Namespace,
    access_mode: AccessMode,
}

impl SequenceGenerator {
    pub fn new(namespace: Namespace, access_mode: AccessMode) -> Self {
        Self {
            namespace,
            access_mode,
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Last identifier handed out, 0 if none
    pub fn current<B: StorageBackend + ?Sized>(&self, backend: &B) -> Result<u64> {
        let name = self.namespace.id_name();
        match stream::read_all(backend, &name)? {
            None => Ok(0),
            Some(bytes) => decode_counter(&bytes).map_err(|e| {
                warn!("Counter '{}' is unreadable: {}", name, e);
                PersistError::corrupt(&name, e)
            }),
        }
    }

    /// Advance the counter and return the new value
    pub fn next_id<B: StorageBackend + ?Sized>(&self, backend: &B) -> Result<u64> {
        let name = self.namespace.id_name();
        let current = self.current(backend)?;
        let next = current
            .checked_add(1)
            .ok_or_else(|| PersistError::corrupt(&name, "counter is exhausted"))?;
        stream::write_all(backend, &name, self.access_mode, &encode_counter(next))?;
        debug!("Issued id {} for '{}'", next, self.namespace);
        Ok(next)
    }
}

/// [`SequenceGenerator`] with a mutex around read-increment-write
///
/// This adds a guarantee the plain generator does not make: threads of one
/// process sharing this value never receive duplicate identifiers. Other
/// processes or other instances writing the same namespace are not covered.
#[derive(Debug)]
pub struct SynchronizedSequence<B> {
    backend: B,
    sequence: SequenceGenerator,
    gate: Mutex<()>,
}

impl<B: StorageBackend> SynchronizedSequence<B> {
    pub fn new(sequence: SequenceGenerator, backend: B) -> Self {
        Self {
            backend,
            sequence,
            gate: Mutex::new(()),
        }
    }

    pub fn next_id(&self) -> Result<u64> {
        let _guard = self.gate.lock()?;
        self.sequence.next_id(&self.backend)
    }

    pub fn current(&self) -> Result<u64> {
        let _guard = self.gate.lock()?;
        self.sequence.current(&self.backend)
    }
}
