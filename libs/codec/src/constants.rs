//! On-chain discriminators
//!
//! Every account, event and instruction begins with a u64 discriminator
//! stored little endian. Values must match the deployed program.

/// Account discriminators
pub mod accounts {
    pub const GAME: u64 = 0x84c1_3fa3_3c67_8215;
    pub const WORLD: u64 = 0xc7e7_9b4b_be20_d727;
    pub const VAULT: u64 = 0x8b7c_9e6b_8dd2_3c74;
    pub const COMMENT_INDEX: u64 = 0x114b_ed03_81ec_71bd;
    pub const SYNC: u64 = 0x6f7f_1193_b3c2_d4e5;
}

/// Event discriminators
pub mod events {
    pub const GAME_CREATE: u64 = 0xb9d4_12f7_d15f_4b3c;
    pub const GAME_EDIT: u64 = 0xf0de_d0ff_3776_f1e1;
    pub const GAME_SWAP: u64 = 0x5772_8187_9852_7af3;
    pub const GAME_BURN: u64 = 0x2829_c52d_51c0_a753;
    pub const GAME_DEPOSIT: u64 = 0xd162_6ad4_53f9_c13c;
    pub const GAME_WITHDRAW: u64 = 0xbb11_88a8_5386_9ff6;
    pub const GAME_PROMOTE: u64 = 0x27bc_06ab_d8a8_c1ea;
    pub const WORLD_CREATE: u64 = 0x236d_8df4_463c_b849;
    pub const WORLD_UPDATE: u64 = 0x4916_6e01_1f4d_3444;
    pub const WORLD_SWAP: u64 = 0x7744_52a7_872e_259e;
    pub const WORLD_VESTING: u64 = 0x23d7_eb52_cbcc_ae12;
    pub const VAULT_DEPOSIT: u64 = 0xd566_1c0b_1518_8928;
    pub const VAULT_WITHDRAW: u64 = 0xa4c1_f6da_e1bb_b260;
    pub const COMMENT: u64 = 0x2d41_50b2_5ba4_e2b0;
    pub const SYNC_CREATE: u64 = 0x6b6c_1f15_defe_797f;
    pub const SYNC_SWAP: u64 = 0x61f7_837a_ceb6_bb53;
}

/// Instruction discriminators, the first 8 bytes of instruction data
pub mod instructions {
    pub const COMMENT_POST: u64 = 0xb322_1f55_cd8c_3438;
    pub const GAME_CREATE: u64 = 0x4f1e_a41b_5cbb_8f52;
    pub const GAME_SWAP: u64 = 0x3fa6_7d35_1a55_77e6;
    pub const GAME_EDIT: u64 = 0xd41e_9e63_705d_32ac;
    pub const GAME_CREDIT: u64 = 0x193d_d0eb_9cf8_b24f;
    pub const GAME_DEBIT: u64 = 0x337b_7b4e_0dcf_34b5;
    pub const GAME_WITHDRAW_CLAIM: u64 = 0x7a40_f291_becd_e242;
    pub const GAME_BURN_COMPLETE: u64 = 0x5326_71b5_3bb7_10e0;
    pub const GAME_DEPOSIT_COMPLETE: u64 = 0x47e2_679d_b8fa_fdd3;
    pub const GAME_PROMOTE: u64 = 0x5fb9_65d2_57be_44eb;
    pub const MIX_USDC_TO_GAME: u64 = 0xed79_b793_0664_ca70;
    pub const MIX_GAME_TO_USDC: u64 = 0x7c9b_81c2_34b7_2e58;
    pub const MIX_ANY_TO_GAME: u64 = 0x0b24_3faf_1bf7_de05;
    pub const MIX_GAME_TO_ANY: u64 = 0x1b7f_3c9a_2d8e_4051;
    pub const MIX_ANY_TO_IVY: u64 = 0x3a61_c3f4_f2ec_5d1b;
    pub const MIX_IVY_TO_ANY: u64 = 0x2f8a_2e71_8bf6_c149;
    pub const SYNC_CREATE: u64 = 0xda49_f184_791c_eb1a;
    pub const SYNC_SWAP: u64 = 0xd618_9640_1205_27d5;
    pub const SYNC_PSWAP: u64 = 0x1ac3_0f92_cda5_d96c;
    pub const VAULT_CREATE: u64 = 0x505d_bc10_4469_9752;
    pub const VAULT_DEPOSIT: u64 = 0xcebb_4f76_66fa_5625;
    pub const VAULT_WITHDRAW: u64 = 0xc4aa_068e_90b9_11a6;
    pub const VAULT_EDIT: u64 = 0x55dd_0da1_7405_7ad1;
    pub const WORLD_CREATE: u64 = 0x95b9_67c8_4629_339e;
    pub const WORLD_SET_OWNER: u64 = 0xd95d_88f0_0d9f_5420;
    pub const WORLD_SET_PARAMS: u64 = 0xd076_3fc1_9e80_7354;
    pub const WORLD_CLAIM_VESTING: u64 = 0xf73d_747d_20d3_8439;
    pub const WORLD_UPDATE_METADATA: u64 = 0x08fa_27d9_f4fd_1eb9;
    pub const WORLD_SWAP: u64 = 0xbce7_cc4a_1408_2dc2;
}
