//! Bounds-checked little-endian cursor

use ivy_config::ADDRESS_LEN;
use ivy_types::Address;

use crate::error::{DecodeError, DecodeResult};

/// Text up to the first NUL, or the whole slice when there is none
///
/// Invalid UTF-8 is replaced rather than rejected.
pub fn zt_to_string(bytes: &[u8]) -> String {
    let len = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..len]).into_owned()
}

#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    pub fn at(buf: &'a [u8], offset: usize) -> Self {
        Self { buf, offset }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.offset)
    }

    fn take(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        if len > self.remaining() {
            return Err(DecodeError::TruncatedField {
                field: String::new(),
                offset: self.offset,
                need: len,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.buf[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    pub fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
        let mut array = [0u8; N];
        array.copy_from_slice(self.take(N)?);
        Ok(array)
    }

    pub fn read_u8(&mut self) -> DecodeResult<u8> {
        Ok(self.take(1)?[0])
    }

    /// Strict: only 0 and 1 are valid
    pub fn read_bool(&mut self) -> DecodeResult<bool> {
        let offset = self.offset;
        match self.read_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            value => Err(DecodeError::InvalidBool { offset, value }),
        }
    }

    pub fn read_u32(&mut self) -> DecodeResult<u32> {
        self.read_array().map(u32::from_le_bytes)
    }

    pub fn read_u64(&mut self) -> DecodeResult<u64> {
        self.read_array().map(u64::from_le_bytes)
    }

    pub fn read_address(&mut self) -> DecodeResult<Address> {
        self.read_array::<ADDRESS_LEN>().map(Address::new)
    }

    pub fn read_bytes(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
        self.take(len)
    }

    /// Fixed-width NUL-padded text field
    pub fn read_zt_string(&mut self, len: usize) -> DecodeResult<String> {
        self.take(len).map(zt_to_string)
    }

    /// Length-prefixed string: u32 LE length then UTF-8 bytes
    pub fn read_string(&mut self) -> DecodeResult<String> {
        let len = self.read_u32()? as usize;
        let bytes = self.take(len)?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    pub fn skip(&mut self, len: usize) -> DecodeResult<()> {
        self.take(len).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zt_to_string() {
        assert_eq!(zt_to_string(b"hello\0world"), "hello");
        assert_eq!(zt_to_string(b"no terminator"), "no terminator");
        assert_eq!(zt_to_string(b"\0\0\0"), "");
        assert_eq!(zt_to_string(&[0xff, b'a', 0]), "\u{fffd}a");
    }

    #[test]
    fn test_little_endian_reads() {
        let data = [
            0x01, // u8
            0x00, // bool
            0x78, 0x56, 0x34, 0x12, // u32
            0xef, 0xcd, 0xab, 0x89, 0x67, 0x45, 0x23, 0x01, // u64
        ];
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_u8().unwrap(), 1);
        assert!(!reader.read_bool().unwrap());
        assert_eq!(reader.read_u32().unwrap(), 0x1234_5678);
        assert_eq!(reader.read_u64().unwrap(), 0x0123_4567_89ab_cdef);
        assert_eq!(reader.remaining(), 0);
    }

    #[test]
    fn test_truncation_reports_position() {
        let data = [1u8, 2, 3];
        let mut reader = ByteReader::at(&data, 1);
        let err = reader.read_u32().unwrap_err().in_field("amount");
        assert_eq!(
            err,
            DecodeError::TruncatedField {
                field: "amount".to_string(),
                offset: 1,
                need: 4,
                remaining: 2,
            }
        );
        // A failed read does not advance
        assert_eq!(reader.offset(), 1);
    }

    #[test]
    fn test_bool_rejects_other_bytes() {
        let data = [1u8, 2];
        let mut reader = ByteReader::new(&data);
        assert!(reader.read_bool().unwrap());
        assert_eq!(
            reader.read_bool().unwrap_err(),
            DecodeError::InvalidBool {
                offset: 1,
                value: 2
            }
        );
    }

    #[test]
    fn test_length_prefixed_string() {
        let mut data = 5u32.to_le_bytes().to_vec();
        data.extend_from_slice(b"hello!");
        let mut reader = ByteReader::new(&data);
        assert_eq!(reader.read_string().unwrap(), "hello");
        assert_eq!(reader.remaining(), 1);

        let short = 9u32.to_le_bytes();
        assert!(ByteReader::new(&short).read_string().is_err());
    }
}
