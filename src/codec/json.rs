use super::{CodecError, EntityCodec};
use serde::{Serialize, de::DeserializeOwned};

/// Human-readable codec, a JSON array of entities
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec {
    pretty: bool,
}

impl JsonCodec {
    pub fn compact() -> Self {
        Self { pretty: false }
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl EntityCodec for JsonCodec {
    fn encode<T: Serialize>(&self, items: &[T]) -> Result<Vec<u8>, CodecError> {
        let encoded = if self.pretty {
            serde_json::to_vec_pretty(items)
        } else {
            serde_json::to_vec(items)
        };
        encoded.map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Vec<T>, CodecError> {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decode(e.to_string()))
    }
}
