//! # Event Vocabulary
//!
//! Closed vocabularies that appear in event headers and policy sections.
//! Each enum serializes to the exact wire string used in event documents.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Error returned when parsing a vocabulary value from configuration text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    pub vocabulary: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} value: {}", self.vocabulary, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

/// Normalized event type recorded in `Header.EventType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventType {
    /// New order (entered or added to the book).
    Ord,
    /// Order acknowledged by the exchange.
    Ack,
    /// Order modified (replace).
    Mod,
    /// Order canceled, fully or partially.
    Cxl,
    /// Execution that leaves nothing open.
    Exe,
    /// Partial execution.
    Prt,
    /// Order rejected.
    Rej,
    /// Trade print not tied to a visible order.
    Trd,
    /// Reference data (symbol directory).
    Ref,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Ord => "ORD",
            EventType::Ack => "ACK",
            EventType::Mod => "MOD",
            EventType::Cxl => "CXL",
            EventType::Exe => "EXE",
            EventType::Prt => "PRT",
            EventType::Rej => "REJ",
            EventType::Trd => "TRD",
            EventType::Ref => "REF",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hash algorithm recorded in `Header.HashAlgo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HashAlgo {
    #[default]
    #[serde(rename = "SHA256")]
    Sha256,
}

/// Signature algorithm recorded in `Header.SignAlgo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignAlgo {
    #[default]
    #[serde(rename = "ED25519")]
    Ed25519,
}

/// Clock synchronisation state reported by the clock-sync collaborator.
///
/// The core records this value; it never computes PTP lock state itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockSyncStatus {
    PtpLocked,
    NtpSynced,
    #[default]
    BestEffort,
    Unreliable,
}

impl ClockSyncStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockSyncStatus::PtpLocked => "PTP_LOCKED",
            ClockSyncStatus::NtpSynced => "NTP_SYNCED",
            ClockSyncStatus::BestEffort => "BEST_EFFORT",
            ClockSyncStatus::Unreliable => "UNRELIABLE",
        }
    }
}

impl fmt::Display for ClockSyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClockSyncStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PTP_LOCKED" => Ok(ClockSyncStatus::PtpLocked),
            "NTP_SYNCED" => Ok(ClockSyncStatus::NtpSynced),
            "BEST_EFFORT" => Ok(ClockSyncStatus::BestEffort),
            "UNRELIABLE" => Ok(ClockSyncStatus::Unreliable),
            _ => Err(UnknownVariant {
                vocabulary: "ClockSyncStatus",
                value: s.to_string(),
            }),
        }
    }
}

/// Precision of the recorded timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimestampPrecision {
    #[default]
    Nanosecond,
    Microsecond,
    Millisecond,
}

impl TimestampPrecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimestampPrecision::Nanosecond => "NANOSECOND",
            TimestampPrecision::Microsecond => "MICROSECOND",
            TimestampPrecision::Millisecond => "MILLISECOND",
        }
    }
}

/// Conformance tier recorded in `PolicyIdentification.ConformanceTier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConformanceTier {
    #[default]
    Platinum,
    Gold,
    Silver,
}

impl ConformanceTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConformanceTier::Platinum => "PLATINUM",
            ConformanceTier::Gold => "GOLD",
            ConformanceTier::Silver => "SILVER",
        }
    }
}

impl FromStr for ConformanceTier {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PLATINUM" => Ok(ConformanceTier::Platinum),
            "GOLD" => Ok(ConformanceTier::Gold),
            "SILVER" => Ok(ConformanceTier::Silver),
            _ => Err(UnknownVariant {
                vocabulary: "ConformanceTier",
                value: s.to_string(),
            }),
        }
    }
}

/// Kind of reconciliation gap carried by an event whose side-table update
/// could not be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GapKind {
    UnknownOrderReference,
    DuplicateOrderReference,
    DuplicateLocateRegistration,
}

impl GapKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GapKind::UnknownOrderReference => "UNKNOWN_ORDER_REFERENCE",
            GapKind::DuplicateOrderReference => "DUPLICATE_ORDER_REFERENCE",
            GapKind::DuplicateLocateRegistration => "DUPLICATE_LOCATE_REGISTRATION",
        }
    }
}

/// A symbol as seen by an event: either resolved, or an explicit sentinel.
///
/// Unresolved symbols render as a deterministic placeholder so events stay
/// hashable, while `is_resolved()` lets consumers tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SymbolRef {
    /// Symbol known from the message or side tables.
    Resolved(String),
    /// Locate code with no directory entry yet.
    UnresolvedLocate(u16),
    /// Order reference unknown to the order state.
    UnknownOrder,
}

/// Placeholder rendered for [`SymbolRef::UnknownOrder`].
pub const UNRESOLVED_SYMBOL: &str = "UNRESOLVED";

impl SymbolRef {
    pub fn is_resolved(&self) -> bool {
        matches!(self, SymbolRef::Resolved(_))
    }

    /// Text recorded in `Trade.Symbol`.
    pub fn render(&self) -> String {
        match self {
            SymbolRef::Resolved(symbol) => symbol.clone(),
            SymbolRef::UnresolvedLocate(code) => format!("LOCATE_{}", code),
            SymbolRef::UnknownOrder => UNRESOLVED_SYMBOL.to_string(),
        }
    }
}

impl fmt::Display for SymbolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
