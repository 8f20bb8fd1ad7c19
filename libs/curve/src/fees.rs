//! Fee basis points and price impact

use ivy_config::{FeePolicy, BPS_DENOMINATOR, MAX_PRICE_IMPACT_BPS};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::decimal_math::{bps_of, sub};
use crate::error::{CurveError, CurveResult};

/// Fee in basis points, always within `[0, 10000]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FeeBps(u32);

impl FeeBps {
    pub const ZERO: FeeBps = FeeBps(0);
    pub const MAX: FeeBps = FeeBps(BPS_DENOMINATOR);

    /// Validate `bps`, rejecting anything above 10000
    pub fn new(bps: u32) -> CurveResult<Self> {
        Self::with_policy(bps, FeePolicy::Reject)
    }

    pub fn with_policy(bps: u32, policy: FeePolicy) -> CurveResult<Self> {
        if bps <= BPS_DENOMINATOR {
            return Ok(Self(bps));
        }
        match policy {
            FeePolicy::Reject => Err(CurveError::FeeOutOfRange {
                bps,
                max: BPS_DENOMINATOR,
            }),
            FeePolicy::Clamp => {
                warn!(bps, "Clamping fee to {} bps", BPS_DENOMINATOR);
                Ok(Self::MAX)
            }
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Fee charged on `amount`: `amount · bps / 10000`
    pub fn fee_on(self, amount: Decimal) -> CurveResult<Decimal> {
        bps_of(amount, self.0)
    }

    /// `amount` with the fee removed
    pub fn deduct(self, amount: Decimal) -> CurveResult<Decimal> {
        sub(amount, self.fee_on(amount)?)
    }
}

impl TryFrom<u32> for FeeBps {
    type Error = CurveError;

    fn try_from(bps: u32) -> CurveResult<Self> {
        Self::new(bps)
    }
}

impl From<FeeBps> for u32 {
    fn from(fee: FeeBps) -> u32 {
        fee.0
    }
}

/// Per-pool fees, one for each side of a game swap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PoolFees {
    /// Charged on the IVY leg
    pub ivy_fee: FeeBps,
    /// Charged on the game token leg
    pub game_fee: FeeBps,
}

impl PoolFees {
    pub fn new(ivy_fee_bps: u32, game_fee_bps: u32, policy: FeePolicy) -> CurveResult<Self> {
        Ok(Self {
            ivy_fee: FeeBps::with_policy(ivy_fee_bps, policy)?,
            game_fee: FeeBps::with_policy(game_fee_bps, policy)?,
        })
    }

    /// `(input_fee, output_fee)` for a swap direction
    pub fn for_direction(&self, is_buy: bool) -> (FeeBps, FeeBps) {
        if is_buy {
            (self.ivy_fee, self.game_fee)
        } else {
            (self.game_fee, self.ivy_fee)
        }
    }
}

/// Relative price move in basis points, floored and clamped to `[0, 10000]`
///
/// Zero when `initial_price` is not positive.
pub fn price_impact_bps(initial_price: Decimal, new_price: Decimal) -> u32 {
    if initial_price <= Decimal::ZERO {
        return 0;
    }
    let impact = (new_price - initial_price)
        .abs()
        .checked_div(initial_price)
        .and_then(|ratio| ratio.checked_mul(Decimal::from(BPS_DENOMINATOR)));

    match impact {
        Some(bps) => bps
            .floor()
            .to_u32()
            .map_or(MAX_PRICE_IMPACT_BPS, |bps| bps.min(MAX_PRICE_IMPACT_BPS)),
        // Too large to represent is still a total price move
        None => MAX_PRICE_IMPACT_BPS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_fee_validation() {
        assert_eq!(FeeBps::new(30).unwrap().get(), 30);
        assert_eq!(FeeBps::new(10_000).unwrap(), FeeBps::MAX);
        assert_eq!(
            FeeBps::new(10_001).unwrap_err(),
            CurveError::FeeOutOfRange {
                bps: 10_001,
                max: 10_000
            }
        );
        assert_eq!(
            FeeBps::with_policy(25_000, FeePolicy::Clamp).unwrap(),
            FeeBps::MAX
        );
    }

    #[test]
    fn test_fee_arithmetic() {
        let fee = FeeBps::new(100).unwrap();
        assert_eq!(fee.fee_on(dec!(250)).unwrap(), dec!(2.5));
        assert_eq!(fee.deduct(dec!(250)).unwrap(), dec!(247.5));
        assert_eq!(FeeBps::MAX.deduct(dec!(250)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_pool_fee_direction() {
        let fees = PoolFees::new(100, 50, FeePolicy::Reject).unwrap();
        assert_eq!(fees.for_direction(true), (fees.ivy_fee, fees.game_fee));
        assert_eq!(fees.for_direction(false), (fees.game_fee, fees.ivy_fee));
        assert!(PoolFees::new(100, 20_000, FeePolicy::Reject).is_err());
    }

    #[test]
    fn test_price_impact() {
        assert_eq!(price_impact_bps(dec!(1), dec!(1.01)), 100);
        assert_eq!(price_impact_bps(dec!(1), dec!(0.99)), 100);
        assert_eq!(price_impact_bps(dec!(3), dec!(3.0001)), 0);
        assert_eq!(price_impact_bps(dec!(1), dec!(50)), 10_000);
        assert_eq!(price_impact_bps(Decimal::ZERO, dec!(5)), 0);
        assert_eq!(price_impact_bps(dec!(0.0000000000000000000000000001), dec!(1000000)), 10_000);
    }

    #[test]
    fn test_fee_serde() {
        let fee: FeeBps = serde_json::from_str("30").unwrap();
        assert_eq!(fee.get(), 30);
        assert!(serde_json::from_str::<FeeBps>("10001").is_err());
    }
}
