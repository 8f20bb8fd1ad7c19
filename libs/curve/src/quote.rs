//! Composite USD quotes
//!
//! Game tokens trade against IVY in a constant product pool; IVY trades
//! against USDC on the world's sqrt bonding curve. A game quote chains both
//! to express each leg in USD.

use ivy_config::TokenSettings;
use ivy_types::{amount, QuoteResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::cp_math::ConstantProduct;
use crate::decimal_math::{add, div, sub};
use crate::error::{ensure_non_negative, CurveError, CurveResult};
use crate::fees::{price_impact_bps, PoolFees};
use crate::sqrt_math::SqrtCurve;

/// Reserves of a game's IVY/game token pool, in human units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePool {
    pub ivy_balance: Decimal,
    pub game_balance: Decimal,
}

impl GamePool {
    pub fn new(ivy_balance: Decimal, game_balance: Decimal) -> CurveResult<Self> {
        ensure_non_negative("ivy_balance", ivy_balance)?;
        ensure_non_negative("game_balance", game_balance)?;
        Ok(Self {
            ivy_balance,
            game_balance,
        })
    }

    /// Build from raw on-chain balances
    pub fn from_raw(
        ivy_balance: u64,
        game_balance: u64,
        tokens: &TokenSettings,
    ) -> CurveResult<Self> {
        let ivy = amount::from_raw(ivy_balance, tokens.ivy_decimals)
            .map_err(|_| CurveError::overflow("ivy_balance"))?;
        let game = amount::from_raw(game_balance, tokens.game_decimals)
            .map_err(|_| CurveError::overflow("game_balance"))?;
        Self::new(ivy, game)
    }

    /// `(input_reserve, output_reserve)` for a swap direction
    pub fn reserves_for(&self, is_buy: bool) -> (Decimal, Decimal) {
        if is_buy {
            (self.ivy_balance, self.game_balance)
        } else {
            (self.game_balance, self.ivy_balance)
        }
    }
}

/// State of the IVY/USDC sqrt bonding curve, in human units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldState {
    pub ivy_sold: Decimal,
    pub ivy_curve_max: Decimal,
    pub curve_input_scale: Decimal,
}

impl WorldState {
    pub fn new(
        ivy_sold: Decimal,
        ivy_curve_max: Decimal,
        curve_input_scale: Decimal,
    ) -> CurveResult<Self> {
        ensure_non_negative("ivy_sold", ivy_sold)?;
        ensure_non_negative("ivy_curve_max", ivy_curve_max)?;
        ensure_non_negative("curve_input_scale", curve_input_scale)?;
        Ok(Self {
            ivy_sold,
            ivy_curve_max,
            curve_input_scale,
        })
    }

    /// Build from the world account's raw fields; the scale is `num / den`
    pub fn from_raw(
        ivy_sold: u64,
        ivy_curve_max: u64,
        scale_num: u32,
        scale_den: u32,
        tokens: &TokenSettings,
    ) -> CurveResult<Self> {
        let scale = amount::ratio(scale_num, scale_den).ok_or(CurveError::InvalidScale {
            num: scale_num,
            den: scale_den,
        })?;
        let sold = amount::from_raw(ivy_sold, tokens.ivy_decimals)
            .map_err(|_| CurveError::overflow("ivy_sold"))?;
        let max = amount::from_raw(ivy_curve_max, tokens.ivy_decimals)
            .map_err(|_| CurveError::overflow("ivy_curve_max"))?;
        Self::new(sold, max, scale)
    }

    /// USD received for redeeming `ivy` at the current sold level
    pub fn ivy_value(&self, ivy: Decimal) -> CurveResult<Option<Decimal>> {
        SqrtCurve::exact_tokens_in(self.ivy_sold, self.curve_input_scale, ivy)
    }

    pub fn current_price(&self) -> CurveResult<Decimal> {
        SqrtCurve::current_price(self.ivy_sold, self.curve_input_scale)
    }
}

/// USD value of game tokens: a feeless swap into IVY, then IVY through the world curve
///
/// Any failure along the way values the leg at zero.
fn game_leg_value(
    game_amount: Decimal,
    game_reserve: Decimal,
    ivy_reserve: Decimal,
    world: &WorldState,
) -> CurveResult<Decimal> {
    match ConstantProduct::swap_base_input(game_amount, game_reserve, ivy_reserve)? {
        Some(ivy) if ivy > Decimal::ZERO => Ok(world.ivy_value(ivy)?.unwrap_or(Decimal::ZERO)),
        _ => Ok(Decimal::ZERO),
    }
}

/// Quote an exact-input swap on a game pool
///
/// Buying spends IVY for game tokens, selling the reverse. The input fee is
/// taken before the curve, the output fee from the curve's output. Price
/// impact tracks the pool's IVY/game ratio and ignores fees.
///
/// USD valuation is deliberately asymmetric: bought game tokens are valued
/// against post-trade reserves, sold game tokens against pre-trade reserves.
/// The game leg falls back to zero when it cannot be valued; the IVY leg
/// failing fails the quote.
pub fn game_quote(
    pool: &GamePool,
    input_amount: Decimal,
    is_buy: bool,
    fees: PoolFees,
    world: &WorldState,
) -> CurveResult<Option<QuoteResult>> {
    ensure_non_negative("input_amount", input_amount)?;

    if input_amount.is_zero() {
        return Ok(Some(QuoteResult::zero()));
    }

    let GamePool {
        ivy_balance,
        game_balance,
    } = *pool;
    ensure_non_negative("ivy_balance", ivy_balance)?;
    ensure_non_negative("game_balance", game_balance)?;

    if ivy_balance.is_zero() || game_balance.is_zero() {
        debug!(%ivy_balance, %game_balance, "Game pool has no liquidity");
        return Ok(None);
    }

    let Some(initial_price) = div(ivy_balance, game_balance)? else {
        return Ok(None);
    };

    let (input_reserve, output_reserve) = pool.reserves_for(is_buy);
    let (input_fee, output_fee) = fees.for_direction(is_buy);

    let amount_to_curve = input_fee.deduct(input_amount)?;
    if amount_to_curve <= Decimal::ZERO {
        debug!(fee_bps = input_fee.get(), "Input fee consumes the whole input");
        return Ok(None);
    }

    let amount_from_curve =
        match ConstantProduct::swap_base_input(amount_to_curve, input_reserve, output_reserve)? {
            Some(out) if out > Decimal::ZERO => out,
            _ => return Ok(None),
        };

    let final_output = output_fee.deduct(amount_from_curve)?;

    let (new_ivy, new_game) = if is_buy {
        (
            add(ivy_balance, amount_to_curve)?,
            sub(game_balance, amount_from_curve)?,
        )
    } else {
        (
            sub(ivy_balance, amount_from_curve)?,
            add(game_balance, amount_to_curve)?,
        )
    };

    let new_price = if new_ivy > Decimal::ZERO && new_game > Decimal::ZERO {
        div(new_ivy, new_game)?.unwrap_or(initial_price)
    } else {
        initial_price
    };
    let price_impact_bps = price_impact_bps(initial_price, new_price);

    let (input_amount_usd, output_amount_usd) = if is_buy {
        let Some(input_usd) = world.ivy_value(input_amount)? else {
            debug!(%input_amount, "IVY input exceeds the world curve supply");
            return Ok(None);
        };
        let output_usd = game_leg_value(final_output, new_game, new_ivy, world)?;
        (input_usd, output_usd)
    } else {
        let input_usd = game_leg_value(input_amount, game_balance, ivy_balance, world)?;
        let Some(output_usd) = world.ivy_value(final_output)? else {
            debug!(%final_output, "IVY output exceeds the world curve supply");
            return Ok(None);
        };
        (input_usd, output_usd)
    };

    Ok(Some(QuoteResult {
        output_amount: final_output,
        input_amount_usd,
        output_amount_usd,
        price_impact_bps,
    }))
}

/// Quote an exact-input, fee-free swap on the IVY/USDC sqrt curve
///
/// Buying deposits USDC for IVY; selling redeems IVY for USDC.
pub fn ivy_quote(
    world: &WorldState,
    input_amount: Decimal,
    is_buy: bool,
) -> CurveResult<Option<QuoteResult>> {
    ensure_non_negative("input_amount", input_amount)?;

    if input_amount.is_zero() {
        return Ok(Some(QuoteResult::zero()));
    }

    let WorldState {
        ivy_sold,
        ivy_curve_max,
        curve_input_scale,
    } = *world;

    let current_price = world.current_price()?;

    let (output_amount, new_ivy_sold) = if is_buy {
        let Some(tokens) =
            SqrtCurve::exact_reserve_in(ivy_sold, ivy_curve_max, curve_input_scale, input_amount)?
        else {
            debug!(%input_amount, "USDC deposit exceeds the remaining curve");
            return Ok(None);
        };
        (tokens, add(ivy_sold, tokens)?)
    } else {
        let Some(reserve) = SqrtCurve::exact_tokens_in(ivy_sold, curve_input_scale, input_amount)?
        else {
            debug!(%input_amount, "IVY sale exceeds the sold supply");
            return Ok(None);
        };
        (reserve, sub(ivy_sold, input_amount)?)
    };

    let new_price = SqrtCurve::current_price(new_ivy_sold, curve_input_scale)?;
    let price_impact_bps = price_impact_bps(current_price, new_price);

    let (input_amount_usd, output_amount_usd) = if is_buy {
        let Some(output_usd) =
            SqrtCurve::exact_tokens_in(new_ivy_sold, curve_input_scale, output_amount)?
        else {
            return Ok(None);
        };
        (input_amount, output_usd)
    } else {
        let Some(input_usd) = world.ivy_value(input_amount)? else {
            return Ok(None);
        };
        (input_usd, output_amount)
    };

    Ok(Some(QuoteResult {
        output_amount,
        input_amount_usd,
        output_amount_usd,
        price_impact_bps,
    }))
}
