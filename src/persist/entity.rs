use serde::{Serialize, de::DeserializeOwned};

/// A value that can be stored in a persistor collection.
///
/// Structural equality is `PartialEq`; encoding is serde. Every type meeting
/// both bounds is an entity, but not every codec preserves every entity
/// (MessagePack folds `Some(None)` into `None`, JSON writes non-finite floats
/// as `null`). A collection that would not decode back equal is refused at
/// persist time with `PersistError::Encode`.
pub trait Entity: Serialize + DeserializeOwned + PartialEq {}

impl<T: Serialize + DeserializeOwned + PartialEq> Entity for T {}

/// An entity that names its own namespace.
///
/// `TYPE_IDENTITY` must be unique among the entity types sharing a backend,
/// a fully qualified type path is the usual choice.
pub trait TypedEntity: Entity {
    const TYPE_IDENTITY: &'static str;
}
