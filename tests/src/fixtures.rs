//! # Session Fixtures
//!
//! A short multi-symbol session covering every message type the engine maps,
//! plus helpers that run it through a live pipeline and collect the archive.

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use ec_01_protocol_decoding::domain::records::*;
use ec_01_protocol_decoding::{encode, DecodedRecord};
use ec_06_event_signing::LocalKeyProvider;
use ec_07_merkle_batching::AnchorReceipt;
use ec_08_verification::EvidencePack;
use evidence_runtime::{
    InMemoryEvidenceSink, Pipeline, RecordingAnchor, Rejection, RuntimeConfig, SessionSummary,
    StaticClockSource,
};
use shared_types::{ClockSyncStatus, ConformanceTier, RawMessage};
use uuid::Uuid;

// =============================================================================
// CONSTANTS
// =============================================================================

pub const SIGNING_SEED: [u8; 32] = [0x42; 32];
pub const AAPL_LOCATE: u16 = 1;
pub const MSFT_LOCATE: u16 = 2;

/// 09:30:00 in nanoseconds since midnight.
const MARKET_OPEN_NS: u64 = 34_200_000_000_000;

fn at(step: u64) -> u64 {
    MARKET_OPEN_NS + step * 1_000_000
}

// =============================================================================
// MESSAGE BUILDERS
// =============================================================================

fn ouch(record: OuchRecord) -> RawMessage {
    RawMessage::order_entry(
        encode(&DecodedRecord::OrderEntry(record)).expect("fixture record encodes"),
    )
}

fn itch(record: ItchRecord) -> RawMessage {
    RawMessage::market_data(
        encode(&DecodedRecord::MarketData(record)).expect("fixture record encodes"),
    )
}

fn header(stock_locate: u16, step: u64) -> ItchHeader {
    ItchHeader {
        stock_locate,
        tracking_number: 0,
        timestamp_ns: at(step),
    }
}

fn directory(stock_locate: u16, stock: &str, step: u64) -> RawMessage {
    itch(ItchRecord::StockDirectory(StockDirectory {
        header: header(stock_locate, step),
        stock: stock.into(),
        market_category: b'Q',
        financial_status: b'N',
        round_lot_size: 100,
        round_lots_only: b'N',
        issue_classification: b'C',
        issue_subtype: "Z".into(),
        authenticity: b'P',
        short_sale_threshold: b'N',
        ipo_flag: b'N',
        luld_reference_price_tier: b'1',
        etp_flag: b'N',
        etp_leverage_factor: 0,
        inverse_indicator: b'N',
    }))
}

fn add_order(
    (stock_locate, stock): (u16, &str),
    reference: u64,
    side: u8,
    shares: u32,
    price: u32,
    step: u64,
) -> RawMessage {
    itch(ItchRecord::AddOrder(AddOrder {
        header: header(stock_locate, step),
        order_reference: reference,
        side,
        shares,
        stock: stock.into(),
        price,
        attribution: None,
    }))
}

// =============================================================================
// SESSIONS
// =============================================================================

/// Sixteen messages across AAPL and MSFT that map without reconciliation
/// gaps:
///
/// | # | Protocol | Message |
/// |---|----------|---------|
/// | 0-1 | ITCH | Directory AAPL (locate 1), MSFT (locate 2) |
/// | 2-3 | OUCH | Enter + Accept `AAPL00000001`, buy 100 @ 186.2944 |
/// | 4-5 | ITCH | Add 101 (AAPL buy 500), Add 202 (MSFT sell 300) |
/// | 6 | ITCH | Execute 200 of 101 |
/// | 7 | ITCH | Replace 202 → 203, 200 @ 410.00 |
/// | 8 | OUCH | Execute 40 of `AAPL00000001` |
/// | 9 | ITCH | Cancel 100 of 101 |
/// | 10 | ITCH | Execute 203 in full, with price |
/// | 11-12 | OUCH | Replace to `AAPL00000002`, then cancel it |
/// | 13 | ITCH | Trade print AAPL |
/// | 14 | OUCH | Reject of an unknown token |
/// | 15 | ITCH | Delete 101 |
pub fn trading_session() -> Vec<RawMessage> {
    vec![
        directory(AAPL_LOCATE, "AAPL", 0),
        directory(MSFT_LOCATE, "MSFT", 1),
        ouch(OuchRecord::EnterOrder(EnterOrder {
            token: "AAPL00000001".into(),
            side: b'B',
            shares: 100,
            stock: "AAPL".into(),
            price: 1_862_944,
            time_in_force: 99_998,
            firm: "HFT1".into(),
            display: b'Y',
            capacity: b'P',
            intermarket_sweep: b'N',
            minimum_quantity: 0,
            cross_type: b'N',
            customer_type: b'N',
        }))
        .with_received_ns(at(2)),
        ouch(OuchRecord::OrderAccepted(OrderAccepted {
            timestamp_ns: at(3),
            token: "AAPL00000001".into(),
            side: b'B',
            shares: 100,
            stock: "AAPL".into(),
            price: 1_862_944,
            time_in_force: 99_998,
            firm: "HFT1".into(),
            display: b'Y',
            order_reference: 9_001,
            capacity: b'P',
            intermarket_sweep: b'N',
            minimum_quantity: 0,
            cross_type: b'N',
            order_state: b'L',
            bbo_weight: b'0',
        })),
        add_order((AAPL_LOCATE, "AAPL"), 101, b'B', 500, 1_855_000, 4),
        add_order((MSFT_LOCATE, "MSFT"), 202, b'S', 300, 4_101_200, 5),
        itch(ItchRecord::OrderExecuted(OrderExecutedItch {
            header: header(AAPL_LOCATE, 6),
            order_reference: 101,
            executed_shares: 200,
            match_number: 5_001,
        })),
        itch(ItchRecord::OrderReplace(OrderReplace {
            header: header(MSFT_LOCATE, 7),
            original_order_reference: 202,
            new_order_reference: 203,
            shares: 200,
            price: 4_100_000,
        })),
        ouch(OuchRecord::OrderExecuted(OrderExecuted {
            timestamp_ns: at(8),
            token: "AAPL00000001".into(),
            executed_shares: 40,
            execution_price: 1_862_944,
            liquidity_flag: b'A',
            match_number: 5_002,
        })),
        itch(ItchRecord::OrderCancel(OrderCancel {
            header: header(AAPL_LOCATE, 9),
            order_reference: 101,
            canceled_shares: 100,
        })),
        itch(ItchRecord::OrderExecutedWithPrice(OrderExecutedWithPrice {
            header: header(MSFT_LOCATE, 10),
            order_reference: 203,
            executed_shares: 200,
            match_number: 5_003,
            printable: b'Y',
            execution_price: 4_100_500,
        })),
        ouch(OuchRecord::OrderReplaced(OrderReplaced {
            timestamp_ns: at(11),
            token: "AAPL00000002".into(),
            side: b'B',
            shares: 60,
            stock: "AAPL".into(),
            price: 1_862_000,
            time_in_force: 99_998,
            firm: "HFT1".into(),
            display: b'Y',
            order_reference: 9_002,
            capacity: b'P',
            intermarket_sweep: b'N',
            minimum_quantity: 0,
            cross_type: b'N',
            order_state: b'L',
            previous_token: "AAPL00000001".into(),
            bbo_weight: b'0',
        })),
        ouch(OuchRecord::OrderCanceled(OrderCanceled {
            timestamp_ns: at(12),
            token: "AAPL00000002".into(),
            decrement_shares: 60,
            reason: b'U',
        })),
        itch(ItchRecord::Trade(Trade {
            header: header(AAPL_LOCATE, 13),
            order_reference: 0,
            side: b'S',
            shares: 10,
            stock: "AAPL".into(),
            price: 1_860_000,
            match_number: 5_004,
        })),
        ouch(OuchRecord::OrderRejected(OrderRejected {
            timestamp_ns: at(14),
            token: "AAPL00000003".into(),
            reason: b'H',
        })),
        itch(ItchRecord::OrderDelete(OrderDelete {
            header: header(AAPL_LOCATE, 15),
            order_reference: 101,
        })),
    ]
}

pub fn session_config() -> RuntimeConfig {
    let mut config = RuntimeConfig {
        queue_capacity: 8,
        chunk_size: 4,
        trading_date: NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date"),
        session_id: Uuid::from_u128(0xe71d_e4ce),
        algorithm_name: "ARB-ENGINE".into(),
        algorithm_version: "2.4.1".into(),
        firm_id: "HFT1".into(),
        policy_id: "POL-EQ-01".into(),
        conformance_tier: ConformanceTier::Platinum,
        issuer: "HFT1-COMPLIANCE".into(),
        ..RuntimeConfig::default()
    };
    config.batch.max_events = 5;
    // Long enough that only the count and flush triggers close batches.
    config.batch.max_age = Duration::from_secs(60);
    config
}

// =============================================================================
// SESSION RUNNER
// =============================================================================

/// Everything a finished session left behind.
pub struct SessionRun {
    pub pack: EvidencePack,
    pub summary: SessionSummary,
    pub receipts: Vec<AnchorReceipt>,
    pub rejected: Vec<Rejection>,
}

/// Run `messages` through a PTP-locked pipeline in one submission.
pub async fn run_session(config: RuntimeConfig, messages: Vec<RawMessage>) -> SessionRun {
    let sink = Arc::new(InMemoryEvidenceSink::new());
    let anchor = Arc::new(RecordingAnchor::new());

    let mut handle = Pipeline::new(config, LocalKeyProvider::from_seed(SIGNING_SEED), sink.clone())
        .with_anchor(anchor.clone())
        .with_clock(Arc::new(StaticClockSource::new(ClockSyncStatus::PtpLocked)))
        .start()
        .expect("pipeline starts");
    let rejected = handle.submit(messages).await.expect("chain stage running");

    let context = handle.context().clone();
    let public_key = handle.public_key();
    let summary = handle.finish().await.expect("session finishes");

    SessionRun {
        pack: sink.to_pack(context, public_key),
        summary,
        receipts: anchor.receipts(),
        rejected,
    }
}

/// [`run_session`] on a private runtime, for callers outside async code.
pub fn run_session_blocking(config: RuntimeConfig, messages: Vec<RawMessage>) -> SessionRun {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime builds")
        .block_on(run_session(config, messages))
}
