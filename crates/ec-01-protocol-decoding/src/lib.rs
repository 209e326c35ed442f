//! # Protocol Decoding Subsystem (ec-01)
//!
//! Parses raw OUCH 4.2 (order entry) and ITCH 5.0 (market data) messages into
//! typed records at fixed big-endian offsets.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): offset tables, decoder, re-encoder
//! - **Service Layer** (`service.rs`): parallel batch decoding with logging
//!
//! ## Behaviour
//!
//! | Input | Result |
//! |-------|--------|
//! | Empty buffer | `TruncatedMessage { expected: 1, actual: 0 }` |
//! | Unknown first byte | `UnknownMessageType` |
//! | Shorter than the type's length | `TruncatedMessage` |
//! | Longer than the type's length | Decoded; trailing bytes ignored |
//!
//! Text fields are right-trimmed and materialized as `String`; nothing else
//! is copied out of the input buffer.

pub mod domain;
pub mod service;

pub use domain::layouts::{layout_for, Field, MessageLayout};
pub use domain::{decode, encode, DecodeError, DecodedRecord, EncodeError, ItchRecord, OuchRecord};
pub use service::{decode_all, decode_message};
