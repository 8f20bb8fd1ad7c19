//! # Ivy Centralized Configuration
//!
//! Constants and settings shared by the curve engine, the binary decoder and
//! the tools built on top of them, so that token decimals, fee denominators
//! and wire-format tags are defined exactly once.
//!
//! ## Features
//!
//! - **Protocol Constants**: token decimals, basis-point denominator, event tag
//! - **Settings**: fee policy, logging and decimal overrides loaded from TOML
//!   with `IVY__`-prefixed environment overrides
//!
//! ## Usage
//!
//! ```rust
//! use ivy_config::{protocol, FeePolicy, Settings};
//!
//! let tag = protocol::events::EVENT_IX_TAG;
//! let settings = Settings::default();
//! assert_eq!(settings.curve.fee_policy, FeePolicy::Reject);
//! assert_eq!(protocol::IVY_DECIMALS, 9);
//! # let _ = tag;
//! ```

pub mod protocol;
pub mod settings;

// Re-export commonly used types
pub use protocol::*;
pub use settings::{
    load_settings, CommentSettings, CurveSettings, FeePolicy, GlobalSettings, Settings,
    TokenSettings,
};
