//! Typed views over the program's fixed-layout accounts
//!
//! Each view decodes through [`decode_fixed_record`] with a static layout and
//! then lifts the generic record into a struct.

use ivy_config::text::MAX_TEXT_LEN;
use ivy_types::Address;
use serde::Serialize;

use crate::constants::accounts;
use crate::error::DecodeResult;
use crate::layout::{decode_fixed_record, FieldKind, FieldSpec, RecordLayout};
use crate::serde_fmt::{hex_bytes, u64_string};

const GAME_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("owner", 8, FieldKind::Address),
    FieldSpec::new("withdraw_authority", 40, FieldKind::Address),
    FieldSpec::new("game_url", 72, FieldKind::Text(MAX_TEXT_LEN)),
    FieldSpec::new("cover_url", 200, FieldKind::Text(MAX_TEXT_LEN)),
    FieldSpec::new("reserved", 328, FieldKind::Reserved(127)),
    FieldSpec::new("is_official_launch", 455, FieldKind::Bool),
    FieldSpec::new("seed", 456, FieldKind::Bytes32),
    FieldSpec::new("mint", 488, FieldKind::Address),
    FieldSpec::new("ivy_wallet", 520, FieldKind::Address),
    FieldSpec::new("curve_wallet", 552, FieldKind::Address),
    FieldSpec::new("treasury_wallet", 584, FieldKind::Address),
    FieldSpec::new("swap_alt", 616, FieldKind::Address),
    FieldSpec::new("ivy_balance", 648, FieldKind::U64),
    FieldSpec::new("game_balance", 656, FieldKind::U64),
];

pub const GAME_LAYOUT: RecordLayout = RecordLayout {
    name: "Game",
    size: 664,
    discriminator: Some(accounts::GAME),
    fields: GAME_FIELDS,
};

const WORLD_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("ivy_mint", 8, FieldKind::Address),
    FieldSpec::new("usdc_wallet", 40, FieldKind::Address),
    FieldSpec::new("curve_wallet", 72, FieldKind::Address),
    FieldSpec::new("vesting_wallet", 104, FieldKind::Address),
    FieldSpec::new("event_authority", 136, FieldKind::Address),
    FieldSpec::new("world_alt", 168, FieldKind::Address),
    FieldSpec::new("owner", 200, FieldKind::Address),
    FieldSpec::new("usdc_balance", 232, FieldKind::U64),
    FieldSpec::new("ivy_curve_sold", 240, FieldKind::U64),
    FieldSpec::new("ivy_curve_max", 248, FieldKind::U64),
    FieldSpec::new("ivy_vesting_released", 256, FieldKind::U64),
    FieldSpec::new("ivy_vesting_max", 264, FieldKind::U64),
    FieldSpec::new("ivy_initial_liquidity", 272, FieldKind::U64),
    FieldSpec::new("game_initial_liquidity", 280, FieldKind::U64),
    FieldSpec::new("curve_input_scale_num", 288, FieldKind::U32),
    FieldSpec::new("curve_input_scale_den", 292, FieldKind::U32),
    FieldSpec::new("ivy_fee_bps", 296, FieldKind::U8),
    FieldSpec::new("game_fee_bps", 297, FieldKind::U8),
    FieldSpec::new("world_nonce", 298, FieldKind::U8),
    FieldSpec::new("ivy_mint_nonce", 299, FieldKind::U8),
    FieldSpec::new("usdc_wallet_nonce", 300, FieldKind::U8),
    FieldSpec::new("curve_wallet_nonce", 301, FieldKind::U8),
    FieldSpec::new("vesting_wallet_nonce", 302, FieldKind::U8),
    FieldSpec::new("event_authority_nonce", 303, FieldKind::U8),
];

pub const WORLD_LAYOUT: RecordLayout = RecordLayout {
    name: "World",
    size: 304,
    discriminator: Some(accounts::WORLD),
    fields: WORLD_FIELDS,
};

const VAULT_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("owner", 8, FieldKind::Address),
    FieldSpec::new("withdraw_authority", 40, FieldKind::Address),
    FieldSpec::new("wallet", 72, FieldKind::Address),
];

pub const VAULT_LAYOUT: RecordLayout = RecordLayout {
    name: "Vault",
    size: 104,
    discriminator: Some(accounts::VAULT),
    fields: VAULT_FIELDS,
};

const COMMENT_INDEX_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("game", 8, FieldKind::Address),
    FieldSpec::new("total_count", 40, FieldKind::U64),
];

pub const COMMENT_INDEX_LAYOUT: RecordLayout = RecordLayout {
    name: "CommentIndex",
    size: 48,
    discriminator: Some(accounts::COMMENT_INDEX),
    fields: COMMENT_INDEX_FIELDS,
};

const SYNC_FIELDS: &[FieldSpec] = &[
    FieldSpec::new("seed", 8, FieldKind::Bytes32),
    FieldSpec::new("pump_mint", 40, FieldKind::Address),
    FieldSpec::new("sync_mint", 72, FieldKind::Address),
    FieldSpec::new("sync_wallet", 104, FieldKind::Address),
    FieldSpec::new("pump_wallet", 136, FieldKind::Address),
];

pub const SYNC_LAYOUT: RecordLayout = RecordLayout {
    name: "Sync",
    size: 168,
    discriminator: Some(accounts::SYNC),
    fields: SYNC_FIELDS,
};

/// Every account layout, for tooling that picks one by name
pub const ACCOUNT_LAYOUTS: &[RecordLayout] = &[
    GAME_LAYOUT,
    WORLD_LAYOUT,
    VAULT_LAYOUT,
    COMMENT_INDEX_LAYOUT,
    SYNC_LAYOUT,
];

/// Look up an account layout by name, case-insensitively
pub fn layout_by_name(name: &str) -> Option<&'static RecordLayout> {
    ACCOUNT_LAYOUTS
        .iter()
        .find(|layout| layout.name.eq_ignore_ascii_case(name))
}

/// A game: its token, pool wallets and pool balances
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameAccount {
    pub owner: Address,
    pub withdraw_authority: Address,
    pub game_url: String,
    pub cover_url: String,
    pub is_official_launch: bool,
    #[serde(serialize_with = "hex_bytes")]
    pub seed: [u8; 32],
    pub mint: Address,
    pub ivy_wallet: Address,
    pub curve_wallet: Address,
    pub treasury_wallet: Address,
    pub swap_alt: Address,
    #[serde(serialize_with = "u64_string")]
    pub ivy_balance: u64,
    #[serde(serialize_with = "u64_string")]
    pub game_balance: u64,
}

impl GameAccount {
    pub fn decode(data: &[u8]) -> DecodeResult<Self> {
        let r = decode_fixed_record(data, &GAME_LAYOUT)?;
        Ok(Self {
            owner: r.address("owner")?,
            withdraw_authority: r.address("withdraw_authority")?,
            game_url: r.text("game_url")?,
            cover_url: r.text("cover_url")?,
            is_official_launch: r.bool("is_official_launch")?,
            seed: r.identifier("seed")?,
            mint: r.address("mint")?,
            ivy_wallet: r.address("ivy_wallet")?,
            curve_wallet: r.address("curve_wallet")?,
            treasury_wallet: r.address("treasury_wallet")?,
            swap_alt: r.address("swap_alt")?,
            ivy_balance: r.u64("ivy_balance")?,
            game_balance: r.u64("game_balance")?,
        })
    }
}

/// The singleton world: IVY sqrt curve state and protocol parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldAccount {
    pub ivy_mint: Address,
    pub usdc_wallet: Address,
    pub curve_wallet: Address,
    pub vesting_wallet: Address,
    pub event_authority: Address,
    pub world_alt: Address,
    pub owner: Address,
    #[serde(serialize_with = "u64_string")]
    pub usdc_balance: u64,
    #[serde(serialize_with = "u64_string")]
    pub ivy_curve_sold: u64,
    #[serde(serialize_with = "u64_string")]
    pub ivy_curve_max: u64,
    #[serde(serialize_with = "u64_string")]
    pub ivy_vesting_released: u64,
    #[serde(serialize_with = "u64_string")]
    pub ivy_vesting_max: u64,
    #[serde(serialize_with = "u64_string")]
    pub ivy_initial_liquidity: u64,
    #[serde(serialize_with = "u64_string")]
    pub game_initial_liquidity: u64,
    pub curve_input_scale_num: u32,
    pub curve_input_scale_den: u32,
    pub ivy_fee_bps: u8,
    pub game_fee_bps: u8,
    pub world_nonce: u8,
    pub ivy_mint_nonce: u8,
    pub usdc_wallet_nonce: u8,
    pub curve_wallet_nonce: u8,
    pub vesting_wallet_nonce: u8,
    pub event_authority_nonce: u8,
}

impl WorldAccount {
    pub fn decode(data: &[u8]) -> DecodeResult<Self> {
        let r = decode_fixed_record(data, &WORLD_LAYOUT)?;
        Ok(Self {
            ivy_mint: r.address("ivy_mint")?,
            usdc_wallet: r.address("usdc_wallet")?,
            curve_wallet: r.address("curve_wallet")?,
            vesting_wallet: r.address("vesting_wallet")?,
            event_authority: r.address("event_authority")?,
            world_alt: r.address("world_alt")?,
            owner: r.address("owner")?,
            usdc_balance: r.u64("usdc_balance")?,
            ivy_curve_sold: r.u64("ivy_curve_sold")?,
            ivy_curve_max: r.u64("ivy_curve_max")?,
            ivy_vesting_released: r.u64("ivy_vesting_released")?,
            ivy_vesting_max: r.u64("ivy_vesting_max")?,
            ivy_initial_liquidity: r.u64("ivy_initial_liquidity")?,
            game_initial_liquidity: r.u64("game_initial_liquidity")?,
            curve_input_scale_num: r.u32("curve_input_scale_num")?,
            curve_input_scale_den: r.u32("curve_input_scale_den")?,
            ivy_fee_bps: r.u8("ivy_fee_bps")?,
            game_fee_bps: r.u8("game_fee_bps")?,
            world_nonce: r.u8("world_nonce")?,
            ivy_mint_nonce: r.u8("ivy_mint_nonce")?,
            usdc_wallet_nonce: r.u8("usdc_wallet_nonce")?,
            curve_wallet_nonce: r.u8("curve_wallet_nonce")?,
            vesting_wallet_nonce: r.u8("vesting_wallet_nonce")?,
            event_authority_nonce: r.u8("event_authority_nonce")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VaultAccount {
    pub owner: Address,
    pub withdraw_authority: Address,
    pub wallet: Address,
}

impl VaultAccount {
    pub fn decode(data: &[u8]) -> DecodeResult<Self> {
        let r = decode_fixed_record(data, &VAULT_LAYOUT)?;
        Ok(Self {
            owner: r.address("owner")?,
            withdraw_authority: r.address("withdraw_authority")?,
            wallet: r.address("wallet")?,
        })
    }
}

/// Per-game comment counter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentIndexAccount {
    pub game: Address,
    #[serde(serialize_with = "u64_string")]
    pub total_count: u64,
}

impl CommentIndexAccount {
    pub fn decode(data: &[u8]) -> DecodeResult<Self> {
        let r = decode_fixed_record(data, &COMMENT_INDEX_LAYOUT)?;
        Ok(Self {
            game: r.address("game")?,
            total_count: r.u64("total_count")?,
        })
    }
}

/// Mirror of an external mint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncAccount {
    #[serde(serialize_with = "hex_bytes")]
    pub seed: [u8; 32],
    pub pump_mint: Address,
    pub sync_mint: Address,
    pub sync_wallet: Address,
    pub pump_wallet: Address,
}

impl SyncAccount {
    pub fn decode(data: &[u8]) -> DecodeResult<Self> {
        let r = decode_fixed_record(data, &SYNC_LAYOUT)?;
        Ok(Self {
            seed: r.identifier("seed")?,
            pump_mint: r.address("pump_mint")?,
            sync_mint: r.address("sync_mint")?,
            sync_wallet: r.address("sync_wallet")?,
            pump_wallet: r.address("pump_wallet")?,
        })
    }
}
