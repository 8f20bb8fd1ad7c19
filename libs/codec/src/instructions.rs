//! Instruction names by discriminator
//!
//! Used to classify transactions without decoding their arguments.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::constants::instructions as disc;
use crate::error::{DecodeError, DecodeResult};
use crate::reader::ByteReader;

/// Every instruction the program accepts
pub static INSTRUCTIONS: &[(&str, u64)] = &[
    ("comment_post", disc::COMMENT_POST),
    ("game_create", disc::GAME_CREATE),
    ("game_swap", disc::GAME_SWAP),
    ("game_edit", disc::GAME_EDIT),
    ("game_credit", disc::GAME_CREDIT),
    ("game_debit", disc::GAME_DEBIT),
    ("game_withdraw_claim", disc::GAME_WITHDRAW_CLAIM),
    ("game_burn_complete", disc::GAME_BURN_COMPLETE),
    ("game_deposit_complete", disc::GAME_DEPOSIT_COMPLETE),
    ("game_promote", disc::GAME_PROMOTE),
    ("mix_usdc_to_game", disc::MIX_USDC_TO_GAME),
    ("mix_game_to_usdc", disc::MIX_GAME_TO_USDC),
    ("mix_any_to_game", disc::MIX_ANY_TO_GAME),
    ("mix_game_to_any", disc::MIX_GAME_TO_ANY),
    ("mix_any_to_ivy", disc::MIX_ANY_TO_IVY),
    ("mix_ivy_to_any", disc::MIX_IVY_TO_ANY),
    ("sync_create", disc::SYNC_CREATE),
    ("sync_swap", disc::SYNC_SWAP),
    ("sync_pswap", disc::SYNC_PSWAP),
    ("vault_create", disc::VAULT_CREATE),
    ("vault_deposit", disc::VAULT_DEPOSIT),
    ("vault_withdraw", disc::VAULT_WITHDRAW),
    ("vault_edit", disc::VAULT_EDIT),
    ("world_create", disc::WORLD_CREATE),
    ("world_set_owner", disc::WORLD_SET_OWNER),
    ("world_set_params", disc::WORLD_SET_PARAMS),
    ("world_claim_vesting", disc::WORLD_CLAIM_VESTING),
    ("world_update_metadata", disc::WORLD_UPDATE_METADATA),
    ("world_swap", disc::WORLD_SWAP),
];

/// Discriminator to instruction name lookup
#[derive(Debug, Clone)]
pub struct InstructionRegistry {
    by_discriminator: HashMap<u64, &'static str>,
}

impl InstructionRegistry {
    /// Index `table`, rejecting duplicate discriminators
    pub fn build(table: &'static [(&'static str, u64)]) -> DecodeResult<Self> {
        let mut by_discriminator = HashMap::with_capacity(table.len());
        for &(name, discriminator) in table {
            if let Some(first) = by_discriminator.insert(discriminator, name) {
                return Err(DecodeError::DuplicateDiscriminator {
                    discriminator,
                    first,
                    second: name,
                });
            }
        }
        debug!(instructions = by_discriminator.len(), "instruction registry built");
        Ok(Self { by_discriminator })
    }

    pub fn get(&self, discriminator: u64) -> Option<&'static str> {
        self.by_discriminator.get(&discriminator).copied()
    }

    pub fn len(&self) -> usize {
        self.by_discriminator.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_discriminator.is_empty()
    }
}

static REGISTRY: Lazy<DecodeResult<InstructionRegistry>> =
    Lazy::new(|| InstructionRegistry::build(INSTRUCTIONS));

/// The process-wide registry over [`INSTRUCTIONS`]
pub fn instruction_registry() -> DecodeResult<&'static InstructionRegistry> {
    Lazy::force(&REGISTRY).as_ref().map_err(Clone::clone)
}

/// Name of the instruction `data` invokes
///
/// `None` for data shorter than a discriminator or an unknown discriminator.
pub fn instruction_name(data: &[u8]) -> Option<&'static str> {
    let discriminator = ByteReader::new(data).read_u64().ok()?;
    let registry = match instruction_registry() {
        Ok(registry) => registry,
        Err(err) => {
            debug!(%err, "instruction registry unavailable");
            return None;
        }
    };
    registry.get(discriminator)
}
