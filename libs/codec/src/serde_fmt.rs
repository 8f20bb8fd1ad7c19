//! Serialization helpers for typed views

use serde::Serializer;

/// u64 as a decimal string, for consumers without 64-bit integers
pub(crate) fn u64_string<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

pub(crate) fn hex_bytes<S: Serializer>(value: &[u8; 32], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(value))
}
