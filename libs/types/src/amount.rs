//! Raw ↔ human amount conversion
//!
//! On-chain balances are u64 integers in the token's smallest unit. The
//! curve engine works in human units (`1.5` IVY rather than `1500000000`),
//! which keeps every intermediate product well inside `Decimal`'s 96-bit
//! mantissa. These helpers are the only place that crossing happens.

use rust_decimal::Decimal;

use crate::errors::{Result, TypeError};

/// Largest scale `Decimal` supports
pub const MAX_SCALE: u32 = 28;

/// Convert a raw integer amount to human units (`raw / 10^decimals`)
pub fn from_raw(raw: u64, decimals: u32) -> Result<Decimal> {
    Decimal::try_from_i128_with_scale(i128::from(raw), decimals).map_err(|_| {
        TypeError::ScaleTooLarge {
            decimals,
            max: MAX_SCALE,
        }
    })
}

/// Convert a human amount back to raw units, truncating extra precision
///
/// Truncation matches how the program floors token amounts; negative values
/// and values past `u64::MAX` are rejected.
pub fn to_raw(amount: Decimal, decimals: u32) -> Result<u64> {
    if decimals > MAX_SCALE {
        return Err(TypeError::ScaleTooLarge {
            decimals,
            max: MAX_SCALE,
        });
    }
    let out_of_range = || TypeError::AmountOutOfRange {
        value: amount.to_string(),
        decimals,
    };
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(out_of_range());
    }

    let mut scaled = amount.trunc_with_scale(decimals);
    scaled.rescale(decimals);
    if scaled.scale() != decimals {
        return Err(out_of_range());
    }
    u64::try_from(scaled.mantissa()).map_err(|_| out_of_range())
}

/// `num / den` as a Decimal, `None` for a zero denominator
pub fn ratio(num: u32, den: u32) -> Option<Decimal> {
    if den == 0 {
        return None;
    }
    Decimal::from(num).checked_div(Decimal::from(den))
}
