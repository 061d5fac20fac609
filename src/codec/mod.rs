//! Entity collection codecs
//!
//! A codec turns an ordered `[T]` into bytes and back. Decoding must never
//! return a partial collection: either every item decodes or the whole call
//! fails with [`CodecError::Decode`].

pub mod json;
pub mod msgpack;

pub use json::JsonCodec;
pub use msgpack::MessagePackCodec;

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("failed to encode: {0}")]
    Encode(String),

    #[error("failed to decode: {0}")]
    Decode(String),
}

pub trait EntityCodec {
    fn encode<T: Serialize>(&self, items: &[T]) -> Result<Vec<u8>, CodecError>;

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Vec<T>, CodecError>;
}

/// Selects which codec a persistor writes and reads with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CodecFormat {
    #[default]
    MessagePack,
    Json,
    JsonPretty,
}

impl EntityCodec for CodecFormat {
    fn encode<T: Serialize>(&self, items: &[T]) -> Result<Vec<u8>, CodecError> {
        match self {
            CodecFormat::MessagePack => MessagePackCodec.encode(items),
            CodecFormat::Json => JsonCodec::compact().encode(items),
            CodecFormat::JsonPretty => JsonCodec::pretty().encode(items),
        }
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Vec<T>, CodecError> {
        match self {
            CodecFormat::MessagePack => MessagePackCodec.decode(bytes),
            CodecFormat::Json | CodecFormat::JsonPretty => JsonCodec::compact().decode(bytes),
        }
    }
}

// ============================================================================
// Counter encoding
// ============================================================================

/// Byte width of a stored counter
pub const COUNTER_WIDTH: usize = 8;

/// Counters are a fixed-width little-endian `u64`, independent of the entity codec
pub fn encode_counter(value: u64) -> [u8; COUNTER_WIDTH] {
    value.to_le_bytes()
}

pub fn decode_counter(bytes: &[u8]) -> Result<u64, CodecError> {
    let raw: [u8; COUNTER_WIDTH] = bytes.try_into().map_err(|_| {
        CodecError::Decode(format!(
            "expected {} counter bytes, found {}",
            COUNTER_WIDTH,
            bytes.len()
        ))
    })?;
    Ok(u64::from_le_bytes(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Player {
        name: String,
        score: i32,
    }

    fn players() -> Vec<Player> {
        vec![
            Player { name: "Ann".to_string(), score: 3 },
            Player { name: "Bob".to_string(), score: -1 },
            Player { name: "Ann".to_string(), score: 3 },
        ]
    }

    #[test]
    fn test_every_format_preserves_order_and_duplicates() {
        for format in [CodecFormat::MessagePack, CodecFormat::Json, CodecFormat::JsonPretty] {
            let bytes = format.encode(&players()).unwrap();
            let decoded: Vec<Player> = format.decode(&bytes).unwrap();
            assert_eq!(decoded, players(), "format {:?}", format);
        }
    }

    #[test]
    fn test_empty_collection_is_encodable() {
        for format in [CodecFormat::MessagePack, CodecFormat::Json] {
            let bytes = format.encode::<Player>(&[]).unwrap();
            assert!(!bytes.is_empty());
            let decoded: Vec<Player> = format.decode(&bytes).unwrap();
            assert!(decoded.is_empty());
        }
    }

    #[test]
    fn test_counter_width_is_enforced() {
        assert_eq!(decode_counter(&encode_counter(42)).unwrap(), 42);
        assert!(decode_counter(&[1, 2, 3]).is_err());
        assert!(decode_counter(&[]).is_err());
        assert!(decode_counter(&[0; 9]).is_err());
    }
}
