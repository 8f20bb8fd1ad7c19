//! Decimal helpers shared by both curves
//!
//! `rust_decimal` panics on overflow with the plain operators, so curve code
//! goes through these checked wrappers. Roots use Newton's method seeded
//! from `f64` and refined entirely in `Decimal`.

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{ensure_non_negative, CurveError, CurveResult};

const MAX_ITERATIONS: usize = 100;
const EPSILON: Decimal = dec!(0.0000000000000000000001);

pub fn add(a: Decimal, b: Decimal) -> CurveResult<Decimal> {
    a.checked_add(b).ok_or(CurveError::overflow("add"))
}

pub fn sub(a: Decimal, b: Decimal) -> CurveResult<Decimal> {
    a.checked_sub(b).ok_or(CurveError::overflow("sub"))
}

pub fn mul(a: Decimal, b: Decimal) -> CurveResult<Decimal> {
    a.checked_mul(b).ok_or(CurveError::overflow("mul"))
}

/// Checked division; a zero divisor is `Ok(None)`
pub fn div(a: Decimal, b: Decimal) -> CurveResult<Option<Decimal>> {
    if b.is_zero() {
        return Ok(None);
    }
    a.checked_div(b).map(Some).ok_or(CurveError::overflow("div"))
}

/// `x · bps / 10000`
pub fn bps_of(amount: Decimal, bps: u32) -> CurveResult<Decimal> {
    let scaled = mul(amount, Decimal::from(bps))?;
    div(scaled, Decimal::from(ivy_config::BPS_DENOMINATOR))?.ok_or(CurveError::overflow("bps"))
}

fn seed(value: Decimal, root: fn(f64) -> f64) -> Decimal {
    value
        .to_f64()
        .map(root)
        .and_then(Decimal::from_f64)
        .filter(|s| *s > Decimal::ZERO)
        .unwrap_or(Decimal::ONE)
}

/// Square root via Newton's method: x' = (x + v/x) / 2
pub fn sqrt(value: Decimal) -> CurveResult<Decimal> {
    ensure_non_negative("sqrt", value)?;
    if value.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let mut x = seed(value, f64::sqrt);
    let mut last_x = Decimal::ZERO;
    for _ in 0..MAX_ITERATIONS {
        let quotient = value.checked_div(x).ok_or(CurveError::overflow("sqrt"))?;
        let next_x = add(x, quotient)? / dec!(2);

        // Rounding can make the iteration flip between two neighbours
        if (next_x - x).abs() <= EPSILON || next_x == last_x {
            return Ok(next_x);
        }
        last_x = x;
        x = next_x;
    }
    Ok(x)
}

/// Cube root via Newton's method: x' = (2x + v/x²) / 3
pub fn cbrt(value: Decimal) -> CurveResult<Decimal> {
    ensure_non_negative("cbrt", value)?;
    if value.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let mut x = seed(value, f64::cbrt);
    let mut last_x = Decimal::ZERO;
    for _ in 0..MAX_ITERATIONS {
        let square = mul(x, x)?;
        let quotient = value
            .checked_div(square)
            .ok_or(CurveError::overflow("cbrt"))?;
        let next_x = add(mul(x, dec!(2))?, quotient)? / dec!(3);

        if (next_x - x).abs() <= EPSILON || next_x == last_x {
            return Ok(next_x);
        }
        last_x = x;
        x = next_x;
    }
    Ok(x)
}

/// `x^(3/2)` computed as `x · sqrt(x)`
pub fn pow_three_halves(value: Decimal) -> CurveResult<Decimal> {
    mul(value, sqrt(value)?)
}

/// `x^(2/3)` computed as `cbrt(x)²`
pub fn pow_two_thirds(value: Decimal) -> CurveResult<Decimal> {
    let root = cbrt(value)?;
    mul(root, root)
}
