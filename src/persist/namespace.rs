use crate::core::{PersistError, Result};
use std::fmt;

const DATA_SUFFIX: &str = ".data";
const ID_SUFFIX: &str = ".id";

/// Storage-name prefix scoping one entity type's data and counter
///
/// The identity is used verbatim, so distinct identities always yield
/// distinct storage names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    identity: String,
}

impl Namespace {
    pub fn new(identity: impl Into<String>) -> Result<Self> {
        let identity = identity.into();
        if identity.is_empty() || identity.contains(['/', '\\', '\0']) {
            return Err(PersistError::InvalidNamespace(identity));
        }
        Ok(Self { identity })
    }

    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Name of the entity collection stream, `<identity>.data`
    pub fn data_name(&self) -> String {
        format!("{}{}", self.identity, DATA_SUFFIX)
    }

    /// Name of the identifier counter stream, `<identity>.id`
    pub fn id_name(&self) -> String {
        format!("{}{}", self.identity, ID_SUFFIX)
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_names() {
        let ns = Namespace::new("net.todd.scorekeeper.Player").unwrap();
        assert_eq!(ns.data_name(), "net.todd.scorekeeper.Player.data");
        assert_eq!(ns.id_name(), "net.todd.scorekeeper.Player.id");
    }

    #[test]
    fn test_invalid_identities() {
        assert!(matches!(Namespace::new(""), Err(PersistError::InvalidNamespace(_))));
        assert!(Namespace::new("../Player").is_err());
        assert!(Namespace::new("a\\b").is_err());
    }
}
