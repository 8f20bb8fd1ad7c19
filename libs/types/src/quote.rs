//! Quote output shared by every curve

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Result of a single quote computation
///
/// Amounts are in human units. `price_impact_bps` is always within
/// `[0, 10000]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub output_amount: Decimal,
    pub input_amount_usd: Decimal,
    pub output_amount_usd: Decimal,
    pub price_impact_bps: u32,
}

impl QuoteResult {
    /// All-zero quote returned for a zero input
    pub const fn zero() -> Self {
        Self {
            output_amount: Decimal::ZERO,
            input_amount_usd: Decimal::ZERO,
            output_amount_usd: Decimal::ZERO,
            price_impact_bps: 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }
}

impl Default for QuoteResult {
    fn default() -> Self {
        Self::zero()
    }
}
