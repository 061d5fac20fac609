use crate::codec::CodecFormat;
use crate::storage::AccessMode;

/// Persistor configuration
///
/// Defaults to MessagePack entities written in private mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PersistorConfig {
    /// Codec used for the entity collection
    pub codec: CodecFormat,

    /// Access mode for both the data and the counter streams
    pub access_mode: AccessMode,
}

impl PersistorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entity codec
    pub fn codec(mut self, codec: CodecFormat) -> Self {
        self.codec = codec;
        self
    }

    /// Set the access mode
    pub fn access_mode(mut self, mode: AccessMode) -> Self {
        self.access_mode = mode;
        self
    }
}
