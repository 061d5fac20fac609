pub mod config;
pub mod entity;
pub mod namespace;
pub mod persistor;
pub mod sequence;
pub mod store;
mod stream;

pub use config::PersistorConfig;
pub use entity::{Entity, TypedEntity};
pub use namespace::Namespace;
pub use persistor::Persistor;
pub use sequence::{SequenceGenerator, SynchronizedSequence};
pub use store::EntityStore;
