//! # Ivy Curve Engine
//!
//! Pricing math for the Ivy protocol, performed entirely in
//! [`Decimal`] arithmetic.
//!
//! - [`ConstantProduct`]: fee-free x·y=k swaps used by game token pools
//! - [`SqrtCurve`]: the sqrt bonding curve that sells IVY for USDC
//! - [`game_quote`] / [`ivy_quote`]: composite USD quotes with price impact
//! - [`SwapCurve`]: one interface over both curve kinds
//!
//! ## Result convention
//!
//! Operations return `CurveResult<Option<T>>`. `Ok(None)` is an expected
//! outcome (no liquidity, curve exhausted, non-positive scale) that callers
//! branch on. `Err` is a precondition violation such as a negative amount,
//! an out-of-range fee or an overflowing intermediate.
//!
//! ```rust
//! use ivy_curve::{dec, ConstantProduct, SqrtCurve};
//!
//! let out = ConstantProduct::swap_base_input(dec!(100), dec!(1000), dec!(1000))
//!     .unwrap()
//!     .unwrap();
//! assert!((out - dec!(90.9090909)).abs() < dec!(0.0000001));
//!
//! assert_eq!(SqrtCurve::current_price(dec!(100), dec!(4)).unwrap(), dec!(20));
//! ```

pub mod cp_math;
pub mod decimal_math;
pub mod error;
pub mod fees;
pub mod pool_traits;
pub mod quote;
pub mod sqrt_math;

pub use cp_math::ConstantProduct;
pub use error::{CurveError, CurveResult};
pub use fees::{price_impact_bps, FeeBps, PoolFees};
pub use pool_traits::{CurveKind, SwapCurve};
pub use quote::{game_quote, ivy_quote, GamePool, WorldState};
pub use sqrt_math::SqrtCurve;

pub use ivy_config::FeePolicy;
pub use ivy_types::QuoteResult;

/// Common types for curve calculations
pub use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;
