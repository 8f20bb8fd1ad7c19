//! Sqrt bonding curve math
//!
//! Marginal price is `sqrt(c·x)` where `x` is the cumulative supply sold and
//! `c` the curve input scale. Reserve moved by a trade is the area under the
//! curve between the old and new supply.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::decimal_math::{add, div, mul, pow_three_halves, pow_two_thirds, sqrt, sub};
use crate::error::{ensure_non_negative, CurveResult};

/// Sqrt curve math functions
pub struct SqrtCurve;

impl SqrtCurve {
    /// Area under `sqrt(c·x)` from `a` to `b`: `(2/3)·sqrt(c)·(b^1.5 − a^1.5)`
    ///
    /// Zero when `b ≤ a`.
    pub fn integrate_sqrt(scale: Decimal, a: Decimal, b: Decimal) -> CurveResult<Decimal> {
        ensure_non_negative("scale", scale)?;
        ensure_non_negative("a", a)?;
        ensure_non_negative("b", b)?;

        if b <= a {
            return Ok(Decimal::ZERO);
        }

        let sqrt_c = sqrt(scale)?;
        let diff = sub(pow_three_halves(b)?, pow_three_halves(a)?)?;
        let doubled = mul(mul(sqrt_c, diff)?, dec!(2))?;
        Ok(doubled / dec!(3))
    }

    /// `3·area / (2·sqrt(c))`, the area expressed in `x^1.5` units
    fn area_term(scale: Decimal, area: Decimal) -> CurveResult<Option<Decimal>> {
        let denominator = mul(sqrt(scale)?, dec!(2))?;
        div(mul(area, dec!(3))?, denominator)
    }

    /// Right bound `b` such that the area from `a` to `b` equals `area`
    ///
    /// `b = (a^1.5 + 3·area/(2·sqrt(c)))^(2/3)`; `Ok(None)` when `scale ≤ 0`.
    pub fn right_bound(scale: Decimal, area: Decimal, a: Decimal) -> CurveResult<Option<Decimal>> {
        if scale <= Decimal::ZERO {
            return Ok(None);
        }
        ensure_non_negative("area", area)?;
        ensure_non_negative("a", a)?;

        let Some(area_term) = Self::area_term(scale, area)? else {
            return Ok(None);
        };
        let term = add(pow_three_halves(a)?, area_term)?;
        pow_two_thirds(term).map(Some)
    }

    /// Left bound `a` such that the area from `a` to `b` equals `area`
    ///
    /// Clamped to zero when `area` exceeds the whole area under `[0, b]`;
    /// `Ok(None)` when `scale ≤ 0`.
    pub fn left_bound(scale: Decimal, area: Decimal, b: Decimal) -> CurveResult<Option<Decimal>> {
        if scale <= Decimal::ZERO {
            return Ok(None);
        }
        ensure_non_negative("area", area)?;
        ensure_non_negative("b", b)?;

        let Some(area_term) = Self::area_term(scale, area)? else {
            return Ok(None);
        };
        let b_term = pow_three_halves(b)?;
        if b_term < area_term {
            return Ok(Some(Decimal::ZERO));
        }
        pow_two_thirds(sub(b_term, area_term)?).map(Some)
    }

    /// Marginal price at `supply`: `sqrt(supply · scale)`
    pub fn current_price(supply: Decimal, scale: Decimal) -> CurveResult<Decimal> {
        ensure_non_negative("supply", supply)?;
        ensure_non_negative("scale", scale)?;
        sqrt(mul(supply, scale)?)
    }

    /// Reserve received for redeeming `tokens`, the area over `[supply − tokens, supply]`
    ///
    /// `Ok(None)` if `tokens > supply`.
    pub fn exact_tokens_in(
        supply: Decimal,
        scale: Decimal,
        tokens: Decimal,
    ) -> CurveResult<Option<Decimal>> {
        ensure_non_negative("tokens", tokens)?;
        if tokens > supply {
            return Ok(None);
        }
        let new_supply = sub(supply, tokens)?;
        Self::integrate_sqrt(scale, new_supply, supply).map(Some)
    }

    /// Reserve cost of buying exactly `tokens`
    ///
    /// `Ok(None)` if the new supply would exceed `max_supply`.
    pub fn exact_tokens_out(
        supply: Decimal,
        max_supply: Decimal,
        scale: Decimal,
        tokens: Decimal,
    ) -> CurveResult<Option<Decimal>> {
        ensure_non_negative("tokens", tokens)?;
        let new_supply = add(supply, tokens)?;
        if new_supply > max_supply {
            return Ok(None);
        }
        Self::integrate_sqrt(scale, supply, new_supply).map(Some)
    }

    /// Tokens received for depositing `reserve`
    ///
    /// `Ok(None)` if the new supply would exceed `max_supply` or the scale is
    /// not positive.
    pub fn exact_reserve_in(
        supply: Decimal,
        max_supply: Decimal,
        scale: Decimal,
        reserve: Decimal,
    ) -> CurveResult<Option<Decimal>> {
        let Some(new_supply) = Self::right_bound(scale, reserve, supply)? else {
            return Ok(None);
        };
        if new_supply > max_supply {
            return Ok(None);
        }
        // Root rounding can land a hair below `supply` for a zero deposit
        Ok(Some(sub(new_supply, supply)?.max(Decimal::ZERO)))
    }

    /// Tokens that must be redeemed to receive exactly `reserve`
    ///
    /// When `reserve` exceeds everything the curve holds the whole supply is
    /// returned. `Ok(None)` when the scale is not positive.
    pub fn exact_reserve_out(
        supply: Decimal,
        scale: Decimal,
        reserve: Decimal,
    ) -> CurveResult<Option<Decimal>> {
        let Some(new_supply) = Self::left_bound(scale, reserve, supply)? else {
            return Ok(None);
        };
        Ok(Some(sub(supply, new_supply)?.max(Decimal::ZERO)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CurveError;

    const TOLERANCE: Decimal = dec!(0.000000001);

    fn assert_close(actual: Decimal, expected: Decimal) {
        assert!(
            (actual - expected).abs() <= TOLERANCE,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_current_price() {
        assert_eq!(SqrtCurve::current_price(dec!(100), dec!(4)).unwrap(), dec!(20));
        assert_eq!(SqrtCurve::current_price(Decimal::ZERO, dec!(4)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_integrate_sqrt() {
        // (2/3) * 1 * (4^1.5 - 0) = 16/3
        assert_close(
            SqrtCurve::integrate_sqrt(dec!(1), Decimal::ZERO, dec!(4)).unwrap(),
            dec!(5.333333333333),
        );
        // (2/3) * 2 * (27 - 8) = 76/3
        assert_close(
            SqrtCurve::integrate_sqrt(dec!(4), dec!(4), dec!(9)).unwrap(),
            dec!(25.333333333333),
        );
        assert_eq!(
            SqrtCurve::integrate_sqrt(dec!(4), dec!(9), dec!(4)).unwrap(),
            Decimal::ZERO
        );
        assert_eq!(
            SqrtCurve::integrate_sqrt(dec!(4), dec!(9), dec!(9)).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_bounds_invert_integral() {
        let area = SqrtCurve::integrate_sqrt(dec!(0.5), dec!(10), dec!(250)).unwrap();
        assert_close(
            SqrtCurve::right_bound(dec!(0.5), area, dec!(10)).unwrap().unwrap(),
            dec!(250),
        );
        assert_close(
            SqrtCurve::left_bound(dec!(0.5), area, dec!(250)).unwrap().unwrap(),
            dec!(10),
        );
    }

    #[test]
    fn test_non_positive_scale_has_no_bound() {
        assert_eq!(SqrtCurve::right_bound(Decimal::ZERO, dec!(1), dec!(1)).unwrap(), None);
        assert_eq!(SqrtCurve::right_bound(dec!(-1), dec!(1), dec!(1)).unwrap(), None);
        assert_eq!(SqrtCurve::left_bound(Decimal::ZERO, dec!(1), dec!(1)).unwrap(), None);
        assert_eq!(
            SqrtCurve::exact_reserve_in(dec!(1), dec!(10), Decimal::ZERO, dec!(1)).unwrap(),
            None
        );
    }

    #[test]
    fn test_left_bound_clamps_to_zero() {
        assert_eq!(
            SqrtCurve::left_bound(dec!(1), dec!(1000), dec!(4)).unwrap(),
            Some(Decimal::ZERO)
        );
        assert_eq!(
            SqrtCurve::exact_reserve_out(dec!(4), dec!(1), dec!(1000)).unwrap(),
            Some(dec!(4))
        );
    }

    #[test]
    fn test_exact_tokens_in_limits() {
        assert_eq!(
            SqrtCurve::exact_tokens_in(dec!(10), dec!(1), dec!(11)).unwrap(),
            None
        );
        assert_close(
            SqrtCurve::exact_tokens_in(dec!(4), dec!(1), dec!(4)).unwrap().unwrap(),
            dec!(5.333333333333),
        );
    }

    #[test]
    fn test_exact_tokens_out_respects_max_supply() {
        assert_eq!(
            SqrtCurve::exact_tokens_out(dec!(90), dec!(100), dec!(1), dec!(11)).unwrap(),
            None
        );
        assert_close(
            SqrtCurve::exact_tokens_out(Decimal::ZERO, dec!(100), dec!(1), dec!(4))
                .unwrap()
                .unwrap(),
            dec!(5.333333333333),
        );
    }

    #[test]
    fn test_exact_reserve_in_round_trip() {
        let supply = dec!(1000);
        let scale = dec!(0.25);
        let tokens = SqrtCurve::exact_reserve_in(supply, dec!(1000000), scale, dec!(500))
            .unwrap()
            .unwrap();
        assert!(tokens > Decimal::ZERO);

        let reserve = SqrtCurve::exact_tokens_in(supply + tokens, scale, tokens)
            .unwrap()
            .unwrap();
        assert_close(reserve, dec!(500));
    }

    #[test]
    fn test_exact_reserve_in_rejects_past_max() {
        assert_eq!(
            SqrtCurve::exact_reserve_in(dec!(99), dec!(100), dec!(1), dec!(1000)).unwrap(),
            None
        );
    }

    #[test]
    fn test_exact_reserve_out_round_trip() {
        let tokens = SqrtCurve::exact_reserve_out(dec!(500), dec!(2), dec!(300))
            .unwrap()
            .unwrap();
        let reserve = SqrtCurve::exact_tokens_in(dec!(500), dec!(2), tokens)
            .unwrap()
            .unwrap();
        assert_close(reserve, dec!(300));
    }

    #[test]
    fn test_negative_inputs_rejected() {
        assert!(matches!(
            SqrtCurve::integrate_sqrt(dec!(1), dec!(-1), dec!(4)),
            Err(CurveError::NegativeInput { name: "a", .. })
        ));
        assert!(SqrtCurve::current_price(dec!(-5), dec!(1)).is_err());
        assert!(SqrtCurve::exact_tokens_in(dec!(5), dec!(1), dec!(-1)).is_err());
    }
}
