//! Curve engine error types
//!
//! Only precondition violations are errors. Domain outcomes such as zero
//! liquidity or an exhausted curve are `Ok(None)`.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CurveError {
    /// A quantity whose domain is non-negative was negative
    #[error("Negative input: {name} = {value}")]
    NegativeInput { name: &'static str, value: Decimal },

    /// Fee outside `[0, 10000]` under the rejecting policy
    #[error("Fee of {bps} bps exceeds the maximum of {max} bps")]
    FeeOutOfRange { bps: u32, max: u32 },

    /// Curve input scale with a zero denominator
    #[error("Invalid curve input scale {num}/{den}")]
    InvalidScale { num: u32, den: u32 },

    /// Intermediate value left the range of `Decimal`
    #[error("Arithmetic overflow in {operation}")]
    Overflow { operation: &'static str },
}

impl CurveError {
    pub fn negative(name: &'static str, value: Decimal) -> Self {
        Self::NegativeInput { name, value }
    }

    pub fn overflow(operation: &'static str) -> Self {
        Self::Overflow { operation }
    }
}

pub type CurveResult<T> = std::result::Result<T, CurveError>;

/// Fail loud on a negative value before it reaches a fractional power
pub(crate) fn ensure_non_negative(name: &'static str, value: Decimal) -> CurveResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(CurveError::negative(name, value));
    }
    Ok(())
}
