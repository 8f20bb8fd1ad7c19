//! Decoder errors
//!
//! Only format violations are errors: a buffer shorter than its layout, a
//! wrong discriminator, an unknown event, a corrupt bool, a malformed layout. Frames that are
//! not events and partially written comments are ordinary `None`/empty
//! results.

use thiserror::Error;

/// Decoding errors with diagnostic context
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Buffer is shorter than the layout requires
    #[error("Buffer too small: need {need} bytes, got {got} (context: {context})")]
    BufferTooSmall {
        need: usize,
        got: usize,
        context: String,
    },

    /// Leading account discriminator does not match the layout
    #[error("Discriminator mismatch for {record}: expected {expected:#018x}, got {actual:#018x} (indicates: {diagnosis})")]
    DiscriminatorMismatch {
        record: &'static str,
        expected: u64,
        actual: u64,
        diagnosis: String,
    },

    /// Event discriminator is not in the registry
    #[error("Unknown event discriminator {discriminator:#018x}")]
    UnknownEvent { discriminator: u64 },

    /// A field runs past the end of the buffer
    #[error("Truncated field '{field}' at offset {offset}: need {need} bytes, {remaining} remaining")]
    TruncatedField {
        field: String,
        offset: usize,
        need: usize,
        remaining: usize,
    },

    /// A bool byte other than 0 or 1
    #[error("Invalid bool byte {value:#04x} at offset {offset}")]
    InvalidBool { offset: usize, value: u8 },

    /// Layout description is malformed
    #[error("Invalid layout '{layout}': {reason}")]
    InvalidLayout { layout: String, reason: String },

    /// Two event schemas share a discriminator
    #[error("Duplicate event discriminator {discriminator:#018x} for '{first}' and '{second}'")]
    DuplicateDiscriminator {
        discriminator: u64,
        first: &'static str,
        second: &'static str,
    },
}

impl DecodeError {
    pub fn buffer_too_small(need: usize, got: usize, context: impl Into<String>) -> Self {
        Self::BufferTooSmall {
            need,
            got,
            context: context.into(),
        }
    }

    pub fn discriminator_mismatch(record: &'static str, expected: u64, actual: u64) -> Self {
        let diagnosis = if actual == 0 {
            "uninitialized account"
        } else if actual.swap_bytes() == expected {
            "byte order (endianness) mismatch"
        } else {
            "account of a different type"
        };

        Self::DiscriminatorMismatch {
            record,
            expected,
            actual,
            diagnosis: diagnosis.to_string(),
        }
    }

    pub fn invalid_layout(layout: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidLayout {
            layout: layout.into(),
            reason: reason.into(),
        }
    }

    /// Attach a field name to a truncation raised by the reader
    pub fn in_field(self, name: &str) -> Self {
        match self {
            Self::TruncatedField {
                offset,
                need,
                remaining,
                ..
            } => Self::TruncatedField {
                field: name.to_string(),
                offset,
                need,
                remaining,
            },
            other => other,
        }
    }
}

/// Result type for decoding operations
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
