use super::config::PersistorConfig;
use super::entity::{Entity, TypedEntity};
use super::namespace::Namespace;
use super::sequence::SequenceGenerator;
use super::store::EntityStore;
use crate::core::Result;
use crate::storage::StorageBackend;

/// Persistence facade for one entity type on one backend
///
/// Holds no state besides its namespace and backend handle, so two
/// persistors built from the same identity and backend are interchangeable.
///
/// # Examples
///
/// ```
/// use persistor::{InMemoryBackend, Persistor};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, PartialEq, Serialize, Deserialize)]
/// struct Player {
///     id: u64,
///     name: String,
/// }
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let backend = InMemoryBackend::new();
/// let players = Persistor::<Player, _>::create("scorekeeper.Player", &backend)?;
///
/// let ann = Player { id: players.next_id()?, name: "Ann".to_string() };
/// players.persist(&[ann])?;
///
/// let reopened = Persistor::<Player, _>::create("scorekeeper.Player", &backend)?;
/// assert_eq!(reopened.load()?[0].name, "Ann");
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Persistor<T, B> {
    backend: B,
    store: EntityStore<T>,
    sequence: SequenceGenerator,
}

impl<T: Entity, B: StorageBackend> Persistor<T, B> {
    /// Bind `type_identity` and `backend` with the default configuration
    ///
    /// Performs no I/O. Fails only if the identity cannot name a stream.
    pub fn create(type_identity: impl Into<String>, backend: B) -> Result<Self> {
        Self::with_config(type_identity, backend, PersistorConfig::default())
    }

    pub fn with_config(
        type_identity: impl Into<String>,
        backend: B,
        config: PersistorConfig,
    ) -> Result<Self> {
        let namespace = Namespace::new(type_identity)?;
        Ok(Self {
            backend,
            store: EntityStore::new(namespace.clone(), config.codec, config.access_mode),
            sequence: SequenceGenerator::new(namespace, config.access_mode),
        })
    }

    pub fn namespace(&self) -> &Namespace {
        self.store.namespace()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Stored entities in saved order, empty if nothing was persisted yet
    pub fn load(&self) -> Result<Vec<T>> {
        self.store.load(&self.backend)
    }

    /// Replace the stored collection with `items`
    pub fn persist(&self, items: &[T]) -> Result<()> {
        self.store.persist(&self.backend, items)
    }

    /// Next identifier for this entity type, starting at 1
    pub fn next_id(&self) -> Result<u64> {
        self.sequence.next_id(&self.backend)
    }

    /// Last identifier issued, 0 if none
    pub fn current_id(&self) -> Result<u64> {
        self.sequence.current(&self.backend)
    }
}

impl<T: TypedEntity, B: StorageBackend> Persistor<T, B> {
    /// Bind using the entity's declared `TYPE_IDENTITY`
    pub fn for_entity(backend: B) -> Result<Self> {
        Self::create(T::TYPE_IDENTITY, backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecFormat;
    use crate::storage::{AccessMode, InMemoryBackend, OpenKind};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Game {
        title: String,
    }

    impl TypedEntity for Game {
        const TYPE_IDENTITY: &'static str = "scorekeeper.Game";
    }

    #[test]
    fn test_create_performs_no_io() {
        let backend = InMemoryBackend::new();
        let _persistor = Persistor::<Game, _>::create("scorekeeper.Game", &backend).unwrap();
        assert!(backend.opened().is_empty());
    }

    #[test]
    fn test_for_entity_uses_declared_identity() {
        let backend = InMemoryBackend::new();
        let games = Persistor::<Game, _>::for_entity(&backend).unwrap();
        games
            .persist(&[Game { title: "Hearts".to_string() }])
            .unwrap();

        assert_eq!(games.namespace().identity(), "scorekeeper.Game");
        assert!(backend.contains("scorekeeper.Game.data"));
    }

    #[test]
    fn test_config_is_applied_to_both_streams() {
        let backend = InMemoryBackend::new();
        let config = PersistorConfig::new()
            .codec(CodecFormat::Json)
            .access_mode(AccessMode::Shared);
        let games = Persistor::<Game, _>::with_config("Game", &backend, config).unwrap();

        games
            .persist(&[Game { title: "Spades".to_string() }])
            .unwrap();
        games.next_id().unwrap();

        assert_eq!(
            backend.contents("Game.data").unwrap(),
            br#"[{"title":"Spades"}]"#.to_vec()
        );
        assert_eq!(backend.mode_of("Game.data"), Some(AccessMode::Shared));
        assert_eq!(backend.mode_of("Game.id"), Some(AccessMode::Shared));
    }

    #[test]
    fn test_next_id_reads_then_writes_id_name() {
        let backend = InMemoryBackend::new();
        let games = Persistor::<Game, _>::create("Game", &backend).unwrap();
        games.next_id().unwrap();

        let events = backend.opened();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].name, "Game.id");
        assert_eq!(events[0].kind, OpenKind::Read);
        assert_eq!(events[1].name, "Game.id");
        assert_eq!(events[1].kind, OpenKind::Write(AccessMode::Private));
    }
}
