use super::entity::Entity;
use super::namespace::Namespace;
use super::stream;
use crate::codec::{CodecError, CodecFormat, EntityCodec};
use crate::core::{PersistError, Result};
use crate::storage::{AccessMode, StorageBackend};
use log::{debug, warn};
use std::marker::PhantomData;

/// Loads and fully replaces one namespace's entity collection
#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    namespace: Namespace,
    codec: CodecFormat,
    access_mode: AccessMode,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Entity> EntityStore<T> {
    pub fn new(namespace: Namespace, codec: CodecFormat, access_mode: AccessMode) -> Self {
        Self {
            namespace,
            codec,
            access_mode,
            _entity: PhantomData,
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Load the stored collection in its saved order
    ///
    /// A namespace that was never persisted loads as an empty collection.
    pub fn load<B: StorageBackend + ?Sized>(&self, backend: &B) -> Result<Vec<T>> {
        let name = self.namespace.data_name();
        let Some(bytes) = stream::read_all(backend, &name)? else {
            debug!("No stored collection for '{}'", self.namespace);
            return Ok(Vec::new());
        };

        let items: Vec<T> = self.codec.decode(&bytes).map_err(|e| {
            warn!("Stored collection '{}' is unreadable: {}", name, e);
            PersistError::corrupt(&name, e)
        })?;
        debug!("Loaded {} entities from '{}'", items.len(), name);
        Ok(items)
    }

    /// Replace the stored collection with `items`
    pub fn persist<B: StorageBackend + ?Sized>(&self, backend: &B, items: &[T]) -> Result<()> {
        let name = self.namespace.data_name();
        // Encode and verify before opening so a rejected collection leaves prior data intact
        let bytes = self.codec.encode(items).map_err(|e| match e {
            CodecError::Encode(msg) | CodecError::Decode(msg) => PersistError::Encode(msg),
        })?;
        self.verify_round_trip(items, &bytes)?;
        stream::write_all(backend, &name, self.access_mode, &bytes)?;
        debug!(
            "Persisted {} entities to '{}' ({} bytes)",
            items.len(),
            name,
            bytes.len()
        );
        Ok(())
    }

    /// Encoded bytes must decode back to exactly `items`
    fn verify_round_trip(&self, items: &[T], bytes: &[u8]) -> Result<()> {
        let decoded: Vec<T> = self.codec.decode(bytes).map_err(|e| {
            PersistError::Encode(format!(
                "{:?} output for '{}' does not decode: {}",
                self.codec, self.namespace, e
            ))
        })?;
        if decoded.as_slice() != items {
            return Err(PersistError::Encode(format!(
                "{:?} does not preserve the entities of '{}'",
                self.codec, self.namespace
            )));
        }
        Ok(())
    }
}
