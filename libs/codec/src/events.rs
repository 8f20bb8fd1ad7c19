//! Self-CPI event frames
//!
//! The program emits events by invoking itself with instruction data of the
//! form `EVENT_IX_TAG (u64 LE) | event discriminator (u64 LE) | payload`.
//! Payload fields are packed back to back in schema order.

use std::collections::HashMap;

use ivy_config::events::{EVENT_IX_TAG, MIN_EVENT_FRAME_LEN};
use ivy_config::text::MAX_TEXT_LEN;
use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::{debug, trace};

use crate::constants::events as disc;
use crate::error::{DecodeError, DecodeResult};
use crate::layout::{FieldKind, Fields};
use crate::reader::ByteReader;

use crate::layout::FieldKind::{Address, Bool, U32, U64, U8};

/// Static description of one event's payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSchema {
    pub name: &'static str,
    pub discriminator: u64,
    pub fields: &'static [(&'static str, FieldKind)],
}

const ID: FieldKind = FieldKind::bytes(32);

/// Every event the program emits
pub static EVENT_SCHEMAS: &[EventSchema] = &[
    EventSchema {
        name: "gameCreateEvent",
        discriminator: disc::GAME_CREATE,
        fields: &[
            ("game", Address),
            ("mint", Address),
            ("swapAlt", Address),
            ("name", FieldKind::bytes(64)),
            ("symbol", FieldKind::bytes(16)),
            ("ivyBalance", U64),
            ("gameBalance", U64),
        ],
    },
    EventSchema {
        name: "gameEditEvent",
        discriminator: disc::GAME_EDIT,
        fields: &[
            ("game", Address),
            ("owner", Address),
            ("withdrawAuthority", Address),
            ("gameUrl", FieldKind::bytes(MAX_TEXT_LEN)),
            ("coverUrl", FieldKind::bytes(MAX_TEXT_LEN)),
            ("metadataUrl", FieldKind::bytes(MAX_TEXT_LEN)),
        ],
    },
    EventSchema {
        name: "gameSwapEvent",
        discriminator: disc::GAME_SWAP,
        fields: &[
            ("game", Address),
            ("user", Address),
            ("ivyBalance", U64),
            ("gameBalance", U64),
            ("ivyAmount", U64),
            ("gameAmount", U64),
            ("isBuy", Bool),
        ],
    },
    EventSchema {
        name: "gameBurnEvent",
        discriminator: disc::GAME_BURN,
        fields: &[("game", Address), ("id", ID)],
    },
    EventSchema {
        name: "gameDepositEvent",
        discriminator: disc::GAME_DEPOSIT,
        fields: &[("game", Address), ("id", ID)],
    },
    EventSchema {
        name: "gameWithdrawEvent",
        discriminator: disc::GAME_WITHDRAW,
        fields: &[
            ("game", Address),
            ("id", ID),
            ("withdrawAuthority", Address),
        ],
    },
    EventSchema {
        name: "gamePromoteEvent",
        discriminator: disc::GAME_PROMOTE,
        fields: &[("game", Address)],
    },
    EventSchema {
        name: "worldCreateEvent",
        discriminator: disc::WORLD_CREATE,
        fields: &[
            ("ivyCurveMax", U64),
            ("curveInputScaleNum", U32),
            ("curveInputScaleDen", U32),
        ],
    },
    EventSchema {
        name: "worldUpdateEvent",
        discriminator: disc::WORLD_UPDATE,
        fields: &[
            ("ivyInitialLiquidity", U64),
            ("gameInitialLiquidity", U64),
            ("ivyFeeBps", U8),
            ("gameFeeBps", U8),
        ],
    },
    EventSchema {
        name: "worldSwapEvent",
        discriminator: disc::WORLD_SWAP,
        fields: &[
            ("user", Address),
            ("usdcBalance", U64),
            ("ivySold", U64),
            ("usdcAmount", U64),
            ("ivyAmount", U64),
            ("isBuy", Bool),
        ],
    },
    EventSchema {
        name: "worldVestingEvent",
        discriminator: disc::WORLD_VESTING,
        fields: &[("ivyAmount", U64), ("ivyVested", U64)],
    },
    EventSchema {
        name: "vaultDepositEvent",
        discriminator: disc::VAULT_DEPOSIT,
        fields: &[("vault", Address), ("id", ID)],
    },
    EventSchema {
        name: "vaultWithdrawEvent",
        discriminator: disc::VAULT_WITHDRAW,
        fields: &[("vault", Address), ("id", ID)],
    },
    EventSchema {
        name: "commentEvent",
        discriminator: disc::COMMENT,
        fields: &[
            ("game", Address),
            ("user", Address),
            ("commentIndex", U64),
            ("timestamp", U64),
            ("text", FieldKind::String),
        ],
    },
    EventSchema {
        name: "syncCreateEvent",
        discriminator: disc::SYNC_CREATE,
        fields: &[
            ("sync", Address),
            ("pumpMint", Address),
            ("name", FieldKind::String),
            ("symbol", FieldKind::String),
            ("metadataUrl", FieldKind::String),
            ("gameUrl", FieldKind::String),
        ],
    },
    EventSchema {
        name: "syncSwapEvent",
        discriminator: disc::SYNC_SWAP,
        fields: &[
            ("sync", Address),
            ("user", Address),
            ("solAmount", U64),
            ("tokenAmount", U64),
            ("isBuy", Bool),
            ("isPswap", Bool),
        ],
    },
];

/// Discriminator to schema lookup
#[derive(Debug, Clone)]
pub struct EventRegistry {
    by_discriminator: HashMap<u64, &'static EventSchema>,
}

impl EventRegistry {
    /// Index `schemas`, rejecting duplicate discriminators
    pub fn build(schemas: &'static [EventSchema]) -> DecodeResult<Self> {
        let mut by_discriminator = HashMap::with_capacity(schemas.len());
        for schema in schemas {
            if let Some(first) = by_discriminator.insert(schema.discriminator, schema) {
                return Err(DecodeError::DuplicateDiscriminator {
                    discriminator: schema.discriminator,
                    first: first.name,
                    second: schema.name,
                });
            }
        }
        debug!(events = by_discriminator.len(), "event registry built");
        Ok(Self { by_discriminator })
    }

    pub fn get(&self, discriminator: u64) -> Option<&'static EventSchema> {
        self.by_discriminator.get(&discriminator).copied()
    }

    pub fn len(&self) -> usize {
        self.by_discriminator.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_discriminator.is_empty()
    }

    /// Decode a payload that starts right after the event discriminator
    pub fn decode_payload(
        &self,
        discriminator: u64,
        payload: &[u8],
    ) -> DecodeResult<DecodedEvent> {
        let Some(schema) = self.get(discriminator) else {
            debug!("unknown event {discriminator:#018x}");
            return Err(DecodeError::UnknownEvent { discriminator });
        };

        let mut reader = ByteReader::new(payload);
        let mut fields = Fields::default();
        for &(name, kind) in schema.fields {
            if let Some(value) = kind.read(&mut reader).map_err(|e| e.in_field(name))? {
                fields.push(name, value);
            }
        }
        if reader.remaining() > 0 {
            trace!(
                event = schema.name,
                trailing = reader.remaining(),
                "ignoring trailing payload bytes"
            );
        }

        Ok(DecodedEvent {
            name: schema.name,
            payload: fields,
        })
    }
}

static REGISTRY: Lazy<DecodeResult<EventRegistry>> =
    Lazy::new(|| EventRegistry::build(EVENT_SCHEMAS));

/// The process-wide registry over [`EVENT_SCHEMAS`]
pub fn registry() -> DecodeResult<&'static EventRegistry> {
    Lazy::force(&REGISTRY).as_ref().map_err(Clone::clone)
}

/// Event fields in schema order
pub type EventPayload = Fields;

/// Name and payload of one decoded event
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecodedEvent {
    pub name: &'static str,
    pub payload: EventPayload,
}

/// Decode self-CPI instruction data
///
/// Returns `Ok(None)` when the data is not an event frame at all.
pub fn decode_event_frame(buffer: &[u8]) -> DecodeResult<Option<DecodedEvent>> {
    if buffer.len() < MIN_EVENT_FRAME_LEN {
        return Ok(None);
    }

    let mut reader = ByteReader::new(buffer);
    if reader.read_u64()? != EVENT_IX_TAG {
        return Ok(None);
    }
    let discriminator = reader.read_u64()?;

    registry()?
        .decode_payload(discriminator, &buffer[MIN_EVENT_FRAME_LEN..])
        .map(Some)
}

/// An event with its transaction context
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub name: &'static str,
    pub payload: EventPayload,
    /// Base58 transaction signature
    pub signature: String,
    /// Block time, unix seconds
    pub timestamp: i64,
}

impl Event {
    pub fn from_frame(
        buffer: &[u8],
        signature: impl Into<String>,
        timestamp: i64,
    ) -> DecodeResult<Option<Self>> {
        Ok(decode_event_frame(buffer)?.map(|decoded| Self {
            name: decoded.name,
            payload: decoded.payload,
            signature: signature.into(),
            timestamp,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FieldValue;
    use ivy_types::Address as Addr;

    fn frame(discriminator: u64, payload: &[u8]) -> Vec<u8> {
        let mut buf = EVENT_IX_TAG.to_le_bytes().to_vec();
        buf.extend_from_slice(&discriminator.to_le_bytes());
        buf.extend_from_slice(payload);
        buf
    }

    #[test]
    fn test_registry_covers_all_schemas() {
        let registry = registry().unwrap();
        assert_eq!(registry.len(), EVENT_SCHEMAS.len());
        assert_eq!(registry.get(disc::GAME_SWAP).unwrap().name, "gameSwapEvent");
        assert!(registry.get(0).is_none());
    }

    #[test]
    fn test_duplicate_discriminator_rejected() {
        static DUPES: &[EventSchema] = &[
            EventSchema {
                name: "a",
                discriminator: 7,
                fields: &[],
            },
            EventSchema {
                name: "b",
                discriminator: 7,
                fields: &[],
            },
        ];
        let err = EventRegistry::build(DUPES).unwrap_err();
        assert_eq!(
            err,
            DecodeError::DuplicateDiscriminator {
                discriminator: 7,
                first: "a",
                second: "b",
            }
        );
    }

    #[test]
    fn test_not_an_event() {
        assert_eq!(decode_event_frame(&[]).unwrap(), None);
        assert_eq!(decode_event_frame(&EVENT_IX_TAG.to_le_bytes()).unwrap(), None);
        let mut wrong_tag = frame(disc::GAME_PROMOTE, &[0u8; 32]);
        wrong_tag[0] ^= 1;
        assert_eq!(decode_event_frame(&wrong_tag).unwrap(), None);
    }

    #[test]
    fn test_decode_world_update() {
        let mut payload = Vec::new();
        payload.extend_from_slice(&5_000u64.to_le_bytes());
        payload.extend_from_slice(&7_000u64.to_le_bytes());
        payload.extend_from_slice(&[30, 70]);

        let event = decode_event_frame(&frame(disc::WORLD_UPDATE, &payload))
            .unwrap()
            .unwrap();
        assert_eq!(event.name, "worldUpdateEvent");
        assert_eq!(
            event.payload.get("gameInitialLiquidity"),
            Some(&FieldValue::U64(7_000))
        );
        assert_eq!(event.payload.get("gameFeeBps"), Some(&FieldValue::U8(70)));
    }

    #[test]
    fn test_corrupt_bool_in_swap_event() {
        let mut payload = vec![1u8; 64];
        for amount in [5_000u64, 2_000_000, 100, 39_920] {
            payload.extend_from_slice(&amount.to_le_bytes());
        }
        payload.push(1);

        let event = decode_event_frame(&frame(disc::GAME_SWAP, &payload))
            .unwrap()
            .unwrap();
        assert_eq!(event.payload.get("isBuy"), Some(&FieldValue::Bool(true)));

        *payload.last_mut().unwrap() = 0x7f;
        let err = decode_event_frame(&frame(disc::GAME_SWAP, &payload)).unwrap_err();
        // offset is relative to the payload
        assert_eq!(
            err,
            DecodeError::InvalidBool {
                offset: 96,
                value: 0x7f
            }
        );
    }

    #[test]
    fn test_unknown_event() {
        let err = decode_event_frame(&frame(0xdead_beef, &[])).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnknownEvent {
                discriminator: 0xdead_beef
            }
        );
    }

    #[test]
    fn test_truncated_payload_names_field() {
        let payload = [1u8; 40];
        let err = decode_event_frame(&frame(disc::GAME_BURN, &payload)).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::TruncatedField { ref field, need: 32, remaining: 8, .. } if field == "id"
        ));
    }

    #[test]
    fn test_event_from_frame() {
        let buf = frame(disc::GAME_PROMOTE, &[3u8; 32]);
        let event = Event::from_frame(&buf, "sig", 1_700_000_000)
            .unwrap()
            .unwrap();
        assert_eq!(event.name, "gamePromoteEvent");
        assert_eq!(event.signature, "sig");
        assert_eq!(
            event.payload.get("game"),
            Some(&FieldValue::Address(Addr::new([3u8; 32])))
        );

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["timestamp"], 1_700_000_000);
        assert_eq!(json["payload"]["game"], Addr::new([3u8; 32]).to_string());
    }
}
