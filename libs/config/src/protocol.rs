//! Ivy protocol constants
//!
//! Values fixed by the on-chain program and its wire format. They must match
//! the deployed program; changing one is a protocol change, not a tuning knob.

/// Decimals of the IVY token mint
pub const IVY_DECIMALS: u32 = 9;

/// Decimals of the USDC mint backing the IVY sqrt curve
pub const USDC_DECIMALS: u32 = 6;

/// Decimals of every game token mint
pub const GAME_DECIMALS: u32 = 9;

/// Basis points per unit (10000 bps = 100%)
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Upper clamp for reported price impact
pub const MAX_PRICE_IMPACT_BPS: u32 = 10_000;

/// Length of an on-chain address
pub const ADDRESS_LEN: usize = 32;

/// Self-CPI event framing
pub mod events {
    /// Anchor's event instruction tag, read as a little-endian u64
    pub const EVENT_IX_TAG: u64 = 0x1d9a_cb51_2ea5_45e4;

    /// Tag plus event discriminator
    pub const MIN_EVENT_FRAME_LEN: usize = 16;

    /// Byte arrays of this length are kept as raw identifiers
    pub const RAW_IDENTIFIER_LEN: usize = 32;
}

/// Comment storage
pub mod comments {
    /// Maximum comment length accepted by the program
    pub const COMMENT_MAX_LEN: usize = 280;

    /// index (8) + user (32) + timestamp (8)
    pub const RECORD_PREFIX_LEN: usize = 48;
}

/// Fixed-width text fields
pub mod text {
    /// Maximum length of game URL fields, including the terminator
    pub const MAX_TEXT_LEN: usize = 128;
}
