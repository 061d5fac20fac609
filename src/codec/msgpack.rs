use super::{CodecError, EntityCodec};
use serde::{Serialize, de::DeserializeOwned};

/// Compact binary codec (MessagePack with named struct fields)
#[derive(Debug, Clone, Copy, Default)]
pub struct MessagePackCodec;

impl EntityCodec for MessagePackCodec {
    fn encode<T: Serialize>(&self, items: &[T]) -> Result<Vec<u8>, CodecError> {
        rmp_serde::to_vec_named(items).map_err(|e| CodecError::Encode(e.to_string()))
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<Vec<T>, CodecError> {
        let mut reader = bytes;
        let items: Vec<T> =
            rmp_serde::from_read(&mut reader).map_err(|e| CodecError::Decode(e.to_string()))?;
        if !reader.is_empty() {
            return Err(CodecError::Decode(format!(
                "{} trailing bytes after collection",
                reader.len()
            )));
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_garbage() {
        let result: Result<Vec<String>, _> = MessagePackCodec.decode(b"definitely not msgpack");
        assert!(matches!(result, Err(CodecError::Decode(_))));
    }

    #[test]
    fn test_rejects_truncated_stream() {
        let bytes = MessagePackCodec
            .encode(&["alpha".to_string(), "beta".to_string()])
            .unwrap();
        let result: Result<Vec<String>, _> = MessagePackCodec.decode(&bytes[..bytes.len() - 2]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_trailing_bytes() {
        let mut bytes = MessagePackCodec.encode(&[1u32, 2, 3]).unwrap();
        bytes.push(0x01);
        let result: Result<Vec<u32>, _> = MessagePackCodec.decode(&bytes);
        assert!(result.is_err());
    }

    #[test]
    fn test_larger_collection_is_not_smaller() {
        let one = MessagePackCodec.encode(&[7u64]).unwrap();
        let two = MessagePackCodec.encode(&[7u64, 7]).unwrap();
        assert!(two.len() >= one.len());
    }
}
