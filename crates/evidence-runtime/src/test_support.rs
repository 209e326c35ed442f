//! Session fixtures shared by the unit tests.

use chrono::NaiveDate;
use ec_01_protocol_decoding::domain::records::*;
use ec_01_protocol_decoding::{encode, DecodedRecord};
use ec_03_field_mapping::MappingContext;
use shared_types::{ConformanceTier, RawMessage};
use uuid::Uuid;

use crate::config::RuntimeConfig;

/// Enter Order `AAPL00000001`: buy 100 AAPL at 186.2944.
pub const ENTER_ORDER_HEX: &str = "4f4141504c303030303030303120204200000064\
                                   4141504c20202020001c6d200001869e48465431\
                                   59504e000000004f4e";

fn header() -> ItchHeader {
    ItchHeader {
        stock_locate: 1,
        tracking_number: 0,
        timestamp_ns: 34_200_000_001_000,
    }
}

fn itch(record: ItchRecord) -> RawMessage {
    RawMessage::market_data(encode(&DecodedRecord::MarketData(record)).unwrap())
}

/// Enter Order, Add Order 77 for 500, executions of 200/300/1, a Trade and
/// a Delete of the unseen order 78.
pub fn session_messages() -> Vec<RawMessage> {
    vec![
        RawMessage::order_entry(hex::decode(ENTER_ORDER_HEX).unwrap())
            .with_received_ns(34_200_000_000_000),
        itch(ItchRecord::AddOrder(AddOrder {
            header: header(),
            order_reference: 77,
            side: b'B',
            shares: 500,
            stock: "AAPL".into(),
            price: 1_855_000,
            attribution: None,
        })),
        itch(ItchRecord::OrderExecuted(OrderExecutedItch {
            header: header(),
            order_reference: 77,
            executed_shares: 200,
            match_number: 1,
        })),
        itch(ItchRecord::OrderExecuted(OrderExecutedItch {
            header: header(),
            order_reference: 77,
            executed_shares: 300,
            match_number: 2,
        })),
        itch(ItchRecord::OrderExecuted(OrderExecutedItch {
            header: header(),
            order_reference: 77,
            executed_shares: 1,
            match_number: 3,
        })),
        itch(ItchRecord::Trade(Trade {
            header: header(),
            order_reference: 0,
            side: b'S',
            shares: 10,
            stock: "AAPL".into(),
            price: 1_860_000,
            match_number: 4,
        })),
        itch(ItchRecord::OrderDelete(OrderDelete {
            header: header(),
            order_reference: 78,
        })),
    ]
}

pub fn test_config() -> RuntimeConfig {
    RuntimeConfig {
        queue_capacity: 4,
        chunk_size: 3,
        trading_date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        session_id: Uuid::from_u128(0x5e55),
        policy_id: "POL-1".into(),
        conformance_tier: ConformanceTier::Platinum,
        issuer: "TEST".into(),
        ..RuntimeConfig::default()
    }
}

pub fn test_context() -> MappingContext {
    test_config().mapping_context()
}

