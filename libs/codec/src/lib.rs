//! # Ivy Binary Decoder
//!
//! ## Purpose
//!
//! Turns raw bytes fetched from the ledger into typed records:
//! - Fixed-layout accounts (Game, World, Vault, CommentIndex, Sync)
//! - Paged, append-only comment logs
//! - Self-CPI event frames, dispatched through a static schema registry
//! - Instruction names, for classifying transactions
//!
//! ## Error Model
//!
//! Input that is simply "not there" is not an error: a frame without the
//! event tag decodes to `None` and a partially written comment ends its page.
//! Format violations (short buffers, wrong discriminators, unknown events,
//! malformed layouts) are [`DecodeError`]s.
//!
//! ## Integration Points
//!
//! ```text
//! raw bytes → ivy-codec → Record / Comment / Event → ivy-types scaling → ivy-curve
//! ```
//!
//! Every decoder is a pure function of its input. The only shared state is
//! the event and instruction registries, built once on first use and never
//! mutated.
//!
//! ```
//! use ivy_codec::{decode_event_frame, EVENT_IX_TAG};
//!
//! // Instruction data that is not an event frame
//! assert!(decode_event_frame(&[0u8; 8]).unwrap().is_none());
//!
//! let mut frame = EVENT_IX_TAG.to_le_bytes().to_vec();
//! frame.extend_from_slice(&ivy_codec::constants::events::GAME_PROMOTE.to_le_bytes());
//! frame.extend_from_slice(&[7u8; 32]);
//! let event = decode_event_frame(&frame).unwrap().unwrap();
//! assert_eq!(event.name, "gamePromoteEvent");
//! ```

pub mod accounts;
pub mod comments;
pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod layout;
pub mod reader;

mod serde_fmt;

pub use accounts::{
    layout_by_name, CommentIndexAccount, GameAccount, SyncAccount, VaultAccount, WorldAccount,
    ACCOUNT_LAYOUTS, COMMENT_INDEX_LAYOUT, GAME_LAYOUT, SYNC_LAYOUT, VAULT_LAYOUT, WORLD_LAYOUT,
};
pub use comments::{decode_page, decode_paged_log, Comment, PageLayout};
pub use error::{DecodeError, DecodeResult};
pub use events::{
    decode_event_frame, registry, DecodedEvent, Event, EventPayload, EventRegistry, EventSchema,
    EVENT_SCHEMAS,
};
pub use instructions::{instruction_name, instruction_registry, InstructionRegistry, INSTRUCTIONS};
pub use layout::{
    decode_fixed_record, FieldKind, FieldSpec, FieldValue, Fields, Record, RecordLayout,
    DISCRIMINATOR_LEN,
};
pub use reader::{zt_to_string, ByteReader};

pub use ivy_config::events::EVENT_IX_TAG;
pub use ivy_types::Address;
