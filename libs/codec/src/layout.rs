//! Fixed-offset record layouts and generic record decoding

use ivy_config::events::RAW_IDENTIFIER_LEN;
use ivy_config::ADDRESS_LEN;
use ivy_types::Address;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{DecodeError, DecodeResult};
use crate::reader::ByteReader;

/// Length of the account discriminator that prefixes every account
pub const DISCRIMINATOR_LEN: usize = 8;

/// Wire type of a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    U8,
    /// One byte, 0 or 1
    Bool,
    U32,
    U64,
    /// 32-byte account address
    Address,
    /// 32-byte opaque identifier
    Bytes32,
    /// Fixed-width NUL-padded text
    Text(usize),
    /// Skipped padding
    Reserved(usize),
    /// u32 length-prefixed UTF-8, only valid in event payloads
    String,
}

impl FieldKind {
    /// Byte array of `len` bytes: 32-byte arrays stay raw, anything else is text
    pub const fn bytes(len: usize) -> Self {
        if len == RAW_IDENTIFIER_LEN {
            FieldKind::Bytes32
        } else {
            FieldKind::Text(len)
        }
    }

    /// Encoded width, `None` for variable-length kinds
    pub const fn size(&self) -> Option<usize> {
        match self {
            FieldKind::U8 | FieldKind::Bool => Some(1),
            FieldKind::U32 => Some(4),
            FieldKind::U64 => Some(8),
            FieldKind::Address => Some(ADDRESS_LEN),
            FieldKind::Bytes32 => Some(RAW_IDENTIFIER_LEN),
            FieldKind::Text(len) | FieldKind::Reserved(len) => Some(*len),
            FieldKind::String => None,
        }
    }

    /// Read one value, `None` for reserved padding
    pub(crate) fn read(&self, reader: &mut ByteReader<'_>) -> DecodeResult<Option<FieldValue>> {
        let value = match self {
            FieldKind::U8 => FieldValue::U8(reader.read_u8()?),
            FieldKind::Bool => FieldValue::Bool(reader.read_bool()?),
            FieldKind::U32 => FieldValue::U32(reader.read_u32()?),
            FieldKind::U64 => FieldValue::U64(reader.read_u64()?),
            FieldKind::Address => FieldValue::Address(reader.read_address()?),
            FieldKind::Bytes32 => FieldValue::Identifier(reader.read_array()?),
            FieldKind::Text(len) => FieldValue::Text(reader.read_zt_string(*len)?),
            FieldKind::String => FieldValue::Text(reader.read_string()?),
            FieldKind::Reserved(len) => {
                reader.skip(*len)?;
                return Ok(None);
            }
        };
        Ok(Some(value))
    }
}

/// A named field at a fixed offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub offset: usize,
    pub kind: FieldKind,
}

impl FieldSpec {
    pub const fn new(name: &'static str, offset: usize, kind: FieldKind) -> Self {
        Self { name, offset, kind }
    }
}

/// Static description of a fixed-size record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    pub name: &'static str,
    /// Total bytes the buffer must hold
    pub size: usize,
    /// Expected leading u64 LE discriminator, if the record carries one
    pub discriminator: Option<u64>,
    pub fields: &'static [FieldSpec],
}

impl RecordLayout {
    /// Check that every field fits, none overlap and none collide with the discriminator
    pub fn validate(&self) -> DecodeResult<()> {
        let invalid = |reason: String| DecodeError::invalid_layout(self.name, reason);

        let mut spans = Vec::with_capacity(self.fields.len() + 1);
        if self.discriminator.is_some() {
            if self.size < DISCRIMINATOR_LEN {
                return Err(invalid(format!(
                    "record size {} cannot hold a discriminator",
                    self.size
                )));
            }
            spans.push(("discriminator", 0, DISCRIMINATOR_LEN));
        }

        for field in self.fields {
            let size = match field.kind {
                FieldKind::String => {
                    return Err(invalid(format!(
                        "field '{}' is variable-length",
                        field.name
                    )))
                }
                FieldKind::Text(0) | FieldKind::Reserved(0) => {
                    return Err(invalid(format!("field '{}' has zero length", field.name)))
                }
                kind => kind.size().unwrap_or(0),
            };
            let end = field.offset + size;
            if end > self.size {
                return Err(invalid(format!(
                    "field '{}' ends at {} past record size {}",
                    field.name, end, self.size
                )));
            }
            spans.push((field.name, field.offset, end));
        }

        spans.sort_by_key(|&(_, start, _)| start);
        for pair in spans.windows(2) {
            let (first, _, first_end) = pair[0];
            let (second, second_start, _) = pair[1];
            if second_start < first_end {
                return Err(invalid(format!(
                    "fields '{first}' and '{second}' overlap"
                )));
            }
        }
        Ok(())
    }
}

/// A decoded field value
///
/// Serializes with u64 as a decimal string, addresses as base58 and
/// identifiers as hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    U8(u8),
    Bool(bool),
    U32(u32),
    U64(u64),
    Address(Address),
    Identifier([u8; RAW_IDENTIFIER_LEN]),
    Text(String),
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            FieldValue::U8(v) => serializer.serialize_u8(*v),
            FieldValue::Bool(v) => serializer.serialize_bool(*v),
            FieldValue::U32(v) => serializer.serialize_u32(*v),
            FieldValue::U64(v) => serializer.collect_str(v),
            FieldValue::Address(v) => v.serialize(serializer),
            FieldValue::Identifier(v) => serializer.serialize_str(&hex::encode(v)),
            FieldValue::Text(v) => serializer.serialize_str(v),
        }
    }
}

/// Ordered name/value pairs; serializes as a map in field order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(Vec<(&'static str, FieldValue)>);

impl Fields {
    pub fn push(&mut self, name: &'static str, value: FieldValue) {
        self.0.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(&'static str, FieldValue)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Fields {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// A decoded fixed-layout record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub name: &'static str,
    pub fields: Fields,
}

macro_rules! typed_getter {
    ($fn_name:ident, $variant:ident, $ty:ty) => {
        pub fn $fn_name(&self, name: &str) -> DecodeResult<$ty> {
            match self.fields.get(name) {
                Some(FieldValue::$variant(v)) => Ok(v.clone()),
                _ => Err(DecodeError::invalid_layout(
                    self.name,
                    format!("no {} field '{}'", stringify!($variant), name),
                )),
            }
        }
    };
}

impl Record {
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    typed_getter!(u8, U8, u8);
    typed_getter!(bool, Bool, bool);
    typed_getter!(u32, U32, u32);
    typed_getter!(u64, U64, u64);
    typed_getter!(address, Address, Address);
    typed_getter!(identifier, Identifier, [u8; RAW_IDENTIFIER_LEN]);
    typed_getter!(text, Text, String);
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}

/// Decode `buffer` against a fixed layout
///
/// Fields are read at their declared offsets; reserved spans are skipped.
/// Bytes past `layout.size` are ignored.
pub fn decode_fixed_record(buffer: &[u8], layout: &RecordLayout) -> DecodeResult<Record> {
    layout.validate()?;

    if buffer.len() < layout.size {
        return Err(DecodeError::buffer_too_small(
            layout.size,
            buffer.len(),
            layout.name,
        ));
    }

    if let Some(expected) = layout.discriminator {
        let actual = ByteReader::new(buffer).read_u64()?;
        if actual != expected {
            return Err(DecodeError::discriminator_mismatch(
                layout.name,
                expected,
                actual,
            ));
        }
    }

    let mut fields = Fields::default();
    for field in layout.fields {
        let mut reader = ByteReader::at(buffer, field.offset);
        let value = field
            .kind
            .read(&mut reader)
            .map_err(|e| e.in_field(field.name))?;
        if let Some(value) = value {
            fields.push(field.name, value);
        }
    }

    Ok(Record {
        name: layout.name,
        fields,
    })
}
