//! Fixture builders shared by the subsystem test suites.

use crate::{
    ClockSyncStatus, EventDraft, EventHeader, EventType, GovernanceSection, HashAlgo,
    PolicyIdentification, Protocol, SignAlgo, TimestampPrecision, TradeSection, EVENT_VERSION,
};

/// 2025-01-02T09:30:00Z in nanoseconds since the Unix epoch.
pub const TEST_SESSION_OPEN_NS: u64 = 1_735_810_200_000_000_000;

/// Buy 100 AAPL at 185.5, offset `sequence` microseconds from the open.
pub fn make_test_draft(sequence: u64) -> EventDraft {
    let mut trade = TradeSection::new("AAPL".into(), true, Protocol::OrderEntry, b'O');
    trade.cl_ord_id = Some(format!("AAPL{:08}", sequence));
    trade.side = Some("BUY".into());
    trade.volume = Some(100);
    trade.price = Some(185.5);

    let micros = sequence * 1_000;
    EventDraft {
        header: EventHeader {
            version: EVENT_VERSION.into(),
            event_id: format!("00000000-0000-0000-0000-{:012x}", sequence),
            event_type: EventType::Ord,
            timestamp_iso: format!("2025-01-02T09:30:00.{:09}Z", micros),
            timestamp_int: TEST_SESSION_OPEN_NS + micros,
            hash_algo: HashAlgo::Sha256,
            sign_algo: SignAlgo::Ed25519,
            clock_sync_status: ClockSyncStatus::PtpLocked,
            timestamp_precision: TimestampPrecision::Nanosecond,
        },
        trade,
        governance: GovernanceSection {
            algorithm_name: "test-algo".into(),
            algorithm_version: "1.0".into(),
            firm_id: "HFT1".into(),
        },
        policy: PolicyIdentification::default(),
        reconciliation: None,
    }
}

/// `count` drafts with sequences `0..count`.
pub fn make_test_drafts(count: u64) -> Vec<EventDraft> {
    (0..count).map(make_test_draft).collect()
}
