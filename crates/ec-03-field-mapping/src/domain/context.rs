//! # Mapping Context
//!
//! Session-wide inputs the mapper needs but no message carries: trading
//! date, attribution sections and the session namespace for event IDs.

use chrono::NaiveDate;
use shared_types::{ClockSyncStatus, GovernanceSection, PolicyIdentification, TimestampPrecision};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingContext {
    /// Namespace for deterministic event IDs.
    pub session_id: Uuid,
    /// Date that nanoseconds-since-midnight timestamps are relative to.
    pub trading_date: NaiveDate,
    pub governance: GovernanceSection,
    pub policy: PolicyIdentification,
    pub timestamp_precision: TimestampPrecision,
}

impl MappingContext {
    pub fn new(session_id: Uuid, trading_date: NaiveDate) -> Self {
        Self {
            session_id,
            trading_date,
            governance: GovernanceSection::default(),
            policy: PolicyIdentification::default(),
            timestamp_precision: TimestampPrecision::Nanosecond,
        }
    }

    pub fn with_governance(mut self, governance: GovernanceSection) -> Self {
        self.governance = governance;
        self
    }

    pub fn with_policy(mut self, policy: PolicyIdentification) -> Self {
        self.policy = policy;
        self
    }

    /// UUID v5 over the big-endian arrival sequence in the session namespace.
    ///
    /// Re-mapping the same message at the same position reproduces the ID.
    pub fn event_id(&self, sequence: u64) -> Uuid {
        Uuid::new_v5(&self.session_id, &sequence.to_be_bytes())
    }
}

/// Per-message inputs supplied by the ingestion layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    /// Position in the session's arrival order, starting at 0.
    pub sequence: u64,
    /// Capture time, nanoseconds since midnight.
    pub received_ns: Option<u64>,
    /// Clock-sync state reported when the message was captured.
    pub clock_sync: ClockSyncStatus,
}

impl Arrival {
    pub fn new(sequence: u64) -> Self {
        Self {
            sequence,
            received_ns: None,
            clock_sync: ClockSyncStatus::default(),
        }
    }

    pub fn with_received_ns(mut self, received_ns: Option<u64>) -> Self {
        self.received_ns = received_ns;
        self
    }

    pub fn with_clock_sync(mut self, clock_sync: ClockSyncStatus) -> Self {
        self.clock_sync = clock_sync;
        self
    }
}
