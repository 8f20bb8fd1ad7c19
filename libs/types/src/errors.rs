//! Error types for address parsing and amount conversion

use thiserror::Error;

/// Errors raised at the raw/human boundary
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TypeError {
    /// Input is not valid base58
    #[error("Invalid base58 address '{input}': {reason}")]
    InvalidAddress { input: String, reason: String },

    /// Decoded address has the wrong number of bytes
    #[error("Address must be {expected} bytes, got {actual}")]
    AddressLength { expected: usize, actual: usize },

    /// Decimal places beyond what `Decimal` can represent
    #[error("Scale {decimals} exceeds the maximum of {max} decimal places")]
    ScaleTooLarge { decimals: u32, max: u32 },

    /// Value cannot be represented as a raw u64 amount
    #[error("Amount {value} cannot be represented as a raw u64 with {decimals} decimals")]
    AmountOutOfRange { value: String, decimals: u32 },
}

pub type Result<T> = std::result::Result<T, TypeError>;
