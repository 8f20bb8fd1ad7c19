//! # Ivy Shared Types
//!
//! Value types shared by the curve engine, the binary decoder and the tools
//! that sit on top of them.
//!
//! - [`Address`]: 32 opaque bytes, displayed and parsed as base58
//! - [`amount`]: explicit conversion between raw on-chain integers and
//!   human-unit [`Decimal`](rust_decimal::Decimal) amounts
//! - [`QuoteResult`]: immutable output of every quote computation
//!
//! ```rust
//! use ivy_types::{amount, Address};
//!
//! let ivy = amount::from_raw(1_500_000_000, 9).unwrap();
//! assert_eq!(ivy.to_string(), "1.500000000");
//!
//! let zero = Address::default();
//! assert_eq!(zero.to_string(), "11111111111111111111111111111111");
//! ```

pub mod address;
pub mod amount;
pub mod errors;
pub mod quote;

pub use address::Address;
pub use errors::TypeError;
pub use quote::QuoteResult;
