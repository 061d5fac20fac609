use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("I/O error on '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("Corrupt data in '{name}': {reason}")]
    CorruptData { name: String, reason: String },

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Invalid namespace '{0}'")]
    InvalidNamespace(String),

    #[error("Lock error: {0}")]
    LockError(String),
}

pub type Result<T> = std::result::Result<T, PersistError>;

impl PersistError {
    pub fn io(name: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            name: name.into(),
            source,
        }
    }

    pub fn corrupt(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::CorruptData {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Storage was readable but its bytes did not decode.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::CorruptData { .. })
    }

    /// Storage itself failed (permissions, device, quota).
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }
}

impl<T> From<std::sync::PoisonError<T>> for PersistError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        Self::LockError(err.to_string())
    }
}
