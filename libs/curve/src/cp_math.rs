//! Constant product (x·y=k) swap math
//!
//! Fee-free: callers deduct fees before and after calling in, the way
//! [`game_quote`](crate::quote::game_quote) does.

use rust_decimal::Decimal;

use crate::decimal_math::{add, div, mul, sub};
use crate::error::{ensure_non_negative, CurveResult};

/// Constant product math functions
pub struct ConstantProduct;

impl ConstantProduct {
    /// Output for an exact input: `amount_in · reserve_out / (reserve_in + amount_in)`
    ///
    /// `Ok(None)` when `reserve_in + amount_in` is zero.
    pub fn swap_base_input(
        amount_in: Decimal,
        reserve_in: Decimal,
        reserve_out: Decimal,
    ) -> CurveResult<Option<Decimal>> {
        ensure_non_negative("amount_in", amount_in)?;
        ensure_non_negative("reserve_in", reserve_in)?;
        ensure_non_negative("reserve_out", reserve_out)?;

        let numerator = mul(amount_in, reserve_out)?;
        let denominator = add(reserve_in, amount_in)?;
        div(numerator, denominator)
    }

    /// Input required for an exact output: `reserve_in · amount_out / (reserve_out − amount_out)`
    ///
    /// `Ok(None)` when the output would drain the pool (`amount_out ≥ reserve_out`).
    pub fn swap_base_output(
        amount_out: Decimal,
        reserve_in: Decimal,
        reserve_out: Decimal,
    ) -> CurveResult<Option<Decimal>> {
        ensure_non_negative("amount_out", amount_out)?;
        ensure_non_negative("reserve_in", reserve_in)?;
        ensure_non_negative("reserve_out", reserve_out)?;

        if amount_out >= reserve_out {
            return Ok(None);
        }

        let numerator = mul(reserve_in, amount_out)?;
        let denominator = sub(reserve_out, amount_out)?;
        div(numerator, denominator)
    }

    /// Marginal price of the output token in input units
    pub fn spot_price(reserve_in: Decimal, reserve_out: Decimal) -> CurveResult<Option<Decimal>> {
        ensure_non_negative("reserve_in", reserve_in)?;
        ensure_non_negative("reserve_out", reserve_out)?;
        div(reserve_in, reserve_out)
    }
}
