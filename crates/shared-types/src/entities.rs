//! # Core Entities
//!
//! Hash primitives, the raw-message input, and the archived evidence entry.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::events::SignedEvent;
use crate::hex_serde;

// =============================================================================
// HASH PRIMITIVES
// =============================================================================

/// A 32-byte SHA-256 digest.
pub type Hash = [u8; 32];

/// A 64-byte Ed25519 signature.
pub type SignatureBytes = [u8; 64];

/// A 32-byte Ed25519 public key.
pub type PublicKeyBytes = [u8; 32];

/// Predecessor hash of the first event in every chain.
pub const GENESIS_HASH: Hash = [0u8; 32];

/// Lowercase hex rendering of a hash.
pub fn hash_to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}

// =============================================================================
// RAW INPUT
// =============================================================================

/// Exchange protocol family a raw message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Protocol {
    /// Order entry (OUCH).
    #[serde(rename = "OUCH")]
    OrderEntry,
    /// Market data (ITCH).
    #[serde(rename = "ITCH")]
    MarketData,
}

impl Protocol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::OrderEntry => "OUCH",
            Protocol::MarketData => "ITCH",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An immutable binary message as received from the exchange session layer.
///
/// Lives for one ingestion call. `received_ns` is the capture time in
/// nanoseconds since midnight, supplied by the session collaborator; it is
/// only consulted for message types that carry no exchange timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMessage {
    pub protocol: Protocol,
    #[serde(with = "hex_serde::vec")]
    pub bytes: Vec<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub received_ns: Option<u64>,
}

impl RawMessage {
    pub fn new(protocol: Protocol, bytes: Vec<u8>) -> Self {
        Self {
            protocol,
            bytes,
            received_ns: None,
        }
    }

    pub fn order_entry(bytes: Vec<u8>) -> Self {
        Self::new(Protocol::OrderEntry, bytes)
    }

    pub fn market_data(bytes: Vec<u8>) -> Self {
        Self::new(Protocol::MarketData, bytes)
    }

    /// Attach the capture timestamp (nanoseconds since midnight).
    pub fn with_received_ns(mut self, received_ns: u64) -> Self {
        self.received_ns = Some(received_ns);
        self
    }

    /// First-byte message-type code, if the buffer is non-empty.
    pub fn message_type(&self) -> Option<u8> {
        self.bytes.first().copied()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

// =============================================================================
// ARCHIVED EVIDENCE
// =============================================================================

/// One archived unit of evidence: the raw message, its arrival sequence
/// number, and the signed event derived from it.
///
/// The verifier re-derives the event from `raw` and `sequence`, so both
/// must be persisted alongside the event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceEntry {
    pub sequence: u64,
    pub raw: RawMessage,
    pub event: SignedEvent,
}
