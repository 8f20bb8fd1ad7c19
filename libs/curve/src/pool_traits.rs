//! Unified quoting interface over both curve kinds

use rust_decimal::Decimal;

use crate::cp_math::ConstantProduct;
use crate::error::CurveResult;
use crate::quote::{GamePool, WorldState};
use crate::sqrt_math::SqrtCurve;

/// Curve kind identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// IVY/game token pool
    ConstantProduct,
    /// IVY/USDC world curve
    SqrtBonding,
}

/// Fee-free swap interface
///
/// `is_buy` means acquiring the curve's token (game tokens for a pool, IVY
/// for the world) with its quote asset.
pub trait SwapCurve {
    /// Output received for an exact input
    fn amount_out(&self, amount_in: Decimal, is_buy: bool) -> CurveResult<Option<Decimal>>;

    /// Input required for an exact output
    fn amount_in(&self, amount_out: Decimal, is_buy: bool) -> CurveResult<Option<Decimal>>;

    /// Marginal price of the curve's token in its quote asset
    fn spot_price(&self) -> CurveResult<Option<Decimal>>;

    fn kind(&self) -> CurveKind;
}

impl SwapCurve for GamePool {
    fn amount_out(&self, amount_in: Decimal, is_buy: bool) -> CurveResult<Option<Decimal>> {
        let (reserve_in, reserve_out) = self.reserves_for(is_buy);
        ConstantProduct::swap_base_input(amount_in, reserve_in, reserve_out)
    }

    fn amount_in(&self, amount_out: Decimal, is_buy: bool) -> CurveResult<Option<Decimal>> {
        let (reserve_in, reserve_out) = self.reserves_for(is_buy);
        ConstantProduct::swap_base_output(amount_out, reserve_in, reserve_out)
    }

    fn spot_price(&self) -> CurveResult<Option<Decimal>> {
        ConstantProduct::spot_price(self.ivy_balance, self.game_balance)
    }

    fn kind(&self) -> CurveKind {
        CurveKind::ConstantProduct
    }
}

impl SwapCurve for WorldState {
    fn amount_out(&self, amount_in: Decimal, is_buy: bool) -> CurveResult<Option<Decimal>> {
        if is_buy {
            SqrtCurve::exact_reserve_in(
                self.ivy_sold,
                self.ivy_curve_max,
                self.curve_input_scale,
                amount_in,
            )
        } else {
            SqrtCurve::exact_tokens_in(self.ivy_sold, self.curve_input_scale, amount_in)
        }
    }

    fn amount_in(&self, amount_out: Decimal, is_buy: bool) -> CurveResult<Option<Decimal>> {
        if is_buy {
            SqrtCurve::exact_tokens_out(
                self.ivy_sold,
                self.ivy_curve_max,
                self.curve_input_scale,
                amount_out,
            )
        } else {
            SqrtCurve::exact_reserve_out(self.ivy_sold, self.curve_input_scale, amount_out)
        }
    }

    fn spot_price(&self) -> CurveResult<Option<Decimal>> {
        self.current_price().map(Some)
    }

    fn kind(&self) -> CurveKind {
        CurveKind::SqrtBonding
    }
}
