//! # Event Documents
//!
//! The normalized trade event in its three stages:
//!
//! - [`EventDraft`]: built by the field mapper, never contains hashes.
//! - [`SealedEvent`]: draft plus `PrevHash`/`EventHash`, produced by the chain.
//! - [`SignedEvent`]: sealed event plus an Ed25519 signature over `EventHash`.
//!
//! All documents serialize as PascalCase JSON. `PrevHash` and `EventHash`
//! live inside `Header` on the sealed form; `Signature` sits outside the
//! hashed content.

use serde::{Deserialize, Serialize};

use crate::entities::{Hash, Protocol, SignatureBytes};
use crate::hex_serde;
use crate::vocabulary::{
    ClockSyncStatus, ConformanceTier, EventType, GapKind, HashAlgo, SignAlgo, TimestampPrecision,
};

/// Document version written to `Header.Version`.
pub const EVENT_VERSION: &str = "1.1";

// =============================================================================
// SECTIONS
// =============================================================================

/// Protocol-agnostic identity and timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventHeader {
    #[serde(rename = "Version")]
    pub version: String,
    #[serde(rename = "EventID")]
    pub event_id: String,
    #[serde(rename = "EventType")]
    pub event_type: EventType,
    #[serde(rename = "TimestampISO")]
    pub timestamp_iso: String,
    /// Nanoseconds since the Unix epoch.
    #[serde(rename = "TimestampInt")]
    pub timestamp_int: u64,
    #[serde(rename = "HashAlgo")]
    pub hash_algo: HashAlgo,
    #[serde(rename = "SignAlgo")]
    pub sign_algo: SignAlgo,
    #[serde(rename = "ClockSyncStatus")]
    pub clock_sync_status: ClockSyncStatus,
    #[serde(rename = "TimestampPrecision")]
    pub timestamp_precision: TimestampPrecision,
}

/// Order and fill attributes. Only `Symbol`, `SymbolResolved` and the
/// source fields are always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSection {
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "SymbolResolved")]
    pub symbol_resolved: bool,
    #[serde(rename = "OrderID", default, skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    #[serde(rename = "ClOrdID", default, skip_serializing_if = "Option::is_none")]
    pub cl_ord_id: Option<String>,
    #[serde(rename = "OrigClOrdID", default, skip_serializing_if = "Option::is_none")]
    pub orig_cl_ord_id: Option<String>,
    #[serde(rename = "Side", default, skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    #[serde(rename = "Volume", default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<u32>,
    #[serde(rename = "Price", default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "RemainingVolume", default, skip_serializing_if = "Option::is_none")]
    pub remaining_volume: Option<u32>,
    #[serde(rename = "TimeInForce", default, skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<String>,
    #[serde(rename = "DisplayType", default, skip_serializing_if = "Option::is_none")]
    pub display_type: Option<String>,
    #[serde(rename = "Capacity", default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<String>,
    #[serde(rename = "ISO", default, skip_serializing_if = "Option::is_none")]
    pub iso: Option<bool>,
    #[serde(rename = "MinQty", default, skip_serializing_if = "Option::is_none")]
    pub min_qty: Option<u32>,
    #[serde(rename = "CrossType", default, skip_serializing_if = "Option::is_none")]
    pub cross_type: Option<String>,
    #[serde(rename = "LiquidityFlag", default, skip_serializing_if = "Option::is_none")]
    pub liquidity_flag: Option<String>,
    #[serde(rename = "MatchNumber", default, skip_serializing_if = "Option::is_none")]
    pub match_number: Option<u64>,
    #[serde(rename = "Printable", default, skip_serializing_if = "Option::is_none")]
    pub printable: Option<bool>,
    #[serde(rename = "CancelReason", default, skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
    #[serde(rename = "RejectReason", default, skip_serializing_if = "Option::is_none")]
    pub reject_reason: Option<String>,
    #[serde(rename = "Firm", default, skip_serializing_if = "Option::is_none")]
    pub firm: Option<String>,
    #[serde(rename = "StockLocate", default, skip_serializing_if = "Option::is_none")]
    pub stock_locate: Option<u16>,
    #[serde(rename = "SourceProtocol")]
    pub source_protocol: Protocol,
    #[serde(rename = "SourceMessageType")]
    pub source_message_type: String,
}

impl TradeSection {
    /// A trade section with only the mandatory fields set.
    pub fn new(
        symbol: String,
        symbol_resolved: bool,
        source_protocol: Protocol,
        source_message_type: u8,
    ) -> Self {
        Self {
            symbol,
            symbol_resolved,
            order_id: None,
            cl_ord_id: None,
            orig_cl_ord_id: None,
            side: None,
            volume: None,
            price: None,
            remaining_volume: None,
            time_in_force: None,
            display_type: None,
            capacity: None,
            iso: None,
            min_qty: None,
            cross_type: None,
            liquidity_flag: None,
            match_number: None,
            printable: None,
            cancel_reason: None,
            reject_reason: None,
            firm: None,
            stock_locate: None,
            source_protocol,
            source_message_type: char::from(source_message_type).to_string(),
        }
    }
}

/// Algorithm and firm attribution.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GovernanceSection {
    #[serde(rename = "AlgorithmName")]
    pub algorithm_name: String,
    #[serde(rename = "AlgorithmVersion")]
    pub algorithm_version: String,
    #[serde(rename = "FirmID")]
    pub firm_id: String,
}

/// Conformance tier metadata.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PolicyIdentification {
    #[serde(rename = "PolicyID")]
    pub policy_id: String,
    #[serde(rename = "ConformanceTier")]
    pub conformance_tier: ConformanceTier,
    #[serde(rename = "Issuer")]
    pub issuer: String,
}

/// Reconciliation-gap marker: the side-table update for this event could
/// not be applied, but the event was still emitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationGap {
    #[serde(rename = "Kind")]
    pub kind: GapKind,
    #[serde(rename = "Detail")]
    pub detail: String,
}

// =============================================================================
// EVENT DRAFT
// =============================================================================

/// Normalized trade event before hashing and signing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    #[serde(rename = "Header")]
    pub header: EventHeader,
    #[serde(rename = "Trade")]
    pub trade: TradeSection,
    #[serde(rename = "Governance")]
    pub governance: GovernanceSection,
    #[serde(rename = "PolicyIdentification")]
    pub policy: PolicyIdentification,
    #[serde(rename = "Reconciliation", default, skip_serializing_if = "Option::is_none")]
    pub reconciliation: Option<ReconciliationGap>,
}

impl EventDraft {
    pub fn event_id(&self) -> &str {
        &self.header.event_id
    }

    pub fn event_type(&self) -> EventType {
        self.header.event_type
    }

    pub fn has_reconciliation_gap(&self) -> bool {
        self.reconciliation.is_some()
    }

    /// Path of the first floating-point field holding NaN or infinity.
    ///
    /// JSON has no representation for these, and serde_json silently turns
    /// them into `null`, so callers must check before serializing.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        match self.trade.price {
            Some(price) if !price.is_finite() => Some("Trade.Price"),
            _ => None,
        }
    }
}

// =============================================================================
// SEALED EVENT
// =============================================================================

/// An event draft linked into the hash chain.
///
/// `event_hash = SHA256(canonical(draft) || prev_hash)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "SealedDocument", from = "SealedDocument")]
pub struct SealedEvent {
    pub draft: EventDraft,
    pub prev_hash: Hash,
    pub event_hash: Hash,
}

impl SealedEvent {
    pub fn event_id(&self) -> &str {
        self.draft.event_id()
    }
}

#[derive(Serialize, Deserialize)]
struct SealedHeader {
    #[serde(flatten)]
    header: EventHeader,
    #[serde(rename = "PrevHash", with = "hex_serde")]
    prev_hash: Hash,
    #[serde(rename = "EventHash", with = "hex_serde")]
    event_hash: Hash,
}

#[derive(Serialize, Deserialize)]
struct SealedDocument {
    #[serde(rename = "Header")]
    header: SealedHeader,
    #[serde(rename = "Trade")]
    trade: TradeSection,
    #[serde(rename = "Governance")]
    governance: GovernanceSection,
    #[serde(rename = "PolicyIdentification")]
    policy: PolicyIdentification,
    #[serde(rename = "Reconciliation", default, skip_serializing_if = "Option::is_none")]
    reconciliation: Option<ReconciliationGap>,
}

impl From<SealedEvent> for SealedDocument {
    fn from(sealed: SealedEvent) -> Self {
        let EventDraft {
            header,
            trade,
            governance,
            policy,
            reconciliation,
        } = sealed.draft;
        Self {
            header: SealedHeader {
                header,
                prev_hash: sealed.prev_hash,
                event_hash: sealed.event_hash,
            },
            trade,
            governance,
            policy,
            reconciliation,
        }
    }
}

impl From<SealedDocument> for SealedEvent {
    fn from(doc: SealedDocument) -> Self {
        Self {
            draft: EventDraft {
                header: doc.header.header,
                trade: doc.trade,
                governance: doc.governance,
                policy: doc.policy,
                reconciliation: doc.reconciliation,
            },
            prev_hash: doc.header.prev_hash,
            event_hash: doc.header.event_hash,
        }
    }
}

// =============================================================================
// SIGNED EVENT
// =============================================================================

/// A sealed event with its Ed25519 signature over `EventHash`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "SignedDocument", from = "SignedDocument")]
pub struct SignedEvent {
    pub sealed: SealedEvent,
    pub signature: SignatureBytes,
}

impl SignedEvent {
    pub fn event_id(&self) -> &str {
        self.sealed.event_id()
    }

    pub fn event_hash(&self) -> &Hash {
        &self.sealed.event_hash
    }

    pub fn prev_hash(&self) -> &Hash {
        &self.sealed.prev_hash
    }

    pub fn draft(&self) -> &EventDraft {
        &self.sealed.draft
    }
}

#[derive(Serialize, Deserialize)]
struct SignatureBlock {
    #[serde(rename = "Algo")]
    algo: SignAlgo,
    #[serde(rename = "Value", with = "hex_serde")]
    value: SignatureBytes,
}

#[derive(Serialize, Deserialize)]
struct SignedDocument {
    #[serde(rename = "Header")]
    header: SealedHeader,
    #[serde(rename = "Trade")]
    trade: TradeSection,
    #[serde(rename = "Governance")]
    governance: GovernanceSection,
    #[serde(rename = "PolicyIdentification")]
    policy: PolicyIdentification,
    #[serde(rename = "Reconciliation", default, skip_serializing_if = "Option::is_none")]
    reconciliation: Option<ReconciliationGap>,
    #[serde(rename = "Signature")]
    signature: SignatureBlock,
}

impl From<SignedEvent> for SignedDocument {
    fn from(signed: SignedEvent) -> Self {
        let sealed = SealedDocument::from(signed.sealed);
        Self {
            header: sealed.header,
            trade: sealed.trade,
            governance: sealed.governance,
            policy: sealed.policy,
            reconciliation: sealed.reconciliation,
            signature: SignatureBlock {
                algo: SignAlgo::Ed25519,
                value: signed.signature,
            },
        }
    }
}

impl From<SignedDocument> for SignedEvent {
    fn from(doc: SignedDocument) -> Self {
        let sealed = SealedEvent::from(SealedDocument {
            header: doc.header,
            trade: doc.trade,
            governance: doc.governance,
            policy: doc.policy,
            reconciliation: doc.reconciliation,
        });
        Self {
            sealed,
            signature: doc.signature.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draft() -> EventDraft {
        let mut trade = TradeSection::new("AAPL".into(), true, Protocol::OrderEntry, b'O');
        trade.side = Some("BUY".into());
        trade.volume = Some(100);
        trade.price = Some(185.5);
        EventDraft {
            header: EventHeader {
                version: EVENT_VERSION.into(),
                event_id: "00000000-0000-0000-0000-000000000001".into(),
                event_type: EventType::Ord,
                timestamp_iso: "2025-01-02T09:30:00.000000000Z".into(),
                timestamp_int: 1_735_810_200_000_000_000,
                hash_algo: HashAlgo::Sha256,
                sign_algo: SignAlgo::Ed25519,
                clock_sync_status: ClockSyncStatus::PtpLocked,
                timestamp_precision: TimestampPrecision::Nanosecond,
            },
            trade,
            governance: GovernanceSection::default(),
            policy: PolicyIdentification::default(),
            reconciliation: None,
        }
    }

    #[test]
    fn test_draft_omits_absent_fields() {
        let json = serde_json::to_value(sample_draft()).unwrap();
        let trade = json.get("Trade").unwrap();
        assert!(trade.get("Price").is_some());
        assert!(trade.get("MatchNumber").is_none());
        assert!(json.get("Reconciliation").is_none());
        assert!(json["Header"].get("EventHash").is_none());
        assert_eq!(trade["SourceMessageType"], "O");
        assert_eq!(trade["SourceProtocol"], "OUCH");
    }

    #[test]
    fn test_sealed_header_carries_hashes() {
        let sealed = SealedEvent {
            draft: sample_draft(),
            prev_hash: [0u8; 32],
            event_hash: [0xab; 32],
        };
        let json = serde_json::to_value(&sealed).unwrap();
        assert_eq!(json["Header"]["PrevHash"], "0".repeat(64));
        assert_eq!(json["Header"]["EventHash"], "ab".repeat(32));
        assert_eq!(json["Header"]["EventType"], "ORD");
        assert!(json.get("Signature").is_none());

        let back: SealedEvent = serde_json::from_value(json).unwrap();
        assert_eq!(back, sealed);
    }

    #[test]
    fn test_signed_document_shape() {
        let signed = SignedEvent {
            sealed: SealedEvent {
                draft: sample_draft(),
                prev_hash: [1u8; 32],
                event_hash: [2u8; 32],
            },
            signature: [7u8; 64],
        };
        let json = serde_json::to_value(&signed).unwrap();
        assert_eq!(json["Signature"]["Algo"], "ED25519");
        assert_eq!(json["Signature"]["Value"], "07".repeat(64));

        let text = serde_json::to_string(&signed).unwrap();
        let back: SignedEvent = serde_json::from_str(&text).unwrap();
        assert_eq!(back, signed);
    }

    #[test]
    fn test_non_finite_price_detected() {
        let mut draft = sample_draft();
        assert_eq!(draft.non_finite_field(), None);
        draft.trade.price = Some(f64::NAN);
        assert_eq!(draft.non_finite_field(), Some("Trade.Price"));
        draft.trade.price = Some(f64::INFINITY);
        assert_eq!(draft.non_finite_field(), Some("Trade.Price"));
    }
}
