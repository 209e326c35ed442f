//! # Decoded Records
//!
//! Typed, protocol-specific fields extracted at fixed offsets. Enumerated
//! fields keep their raw wire codes; translating them is the field mapper's
//! job, which keeps this layer total over well-formed input.

use serde::{Deserialize, Serialize};
use shared_types::Protocol;

/// A decoded message of either protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DecodedRecord {
    OrderEntry(OuchRecord),
    MarketData(ItchRecord),
}

impl DecodedRecord {
    pub fn protocol(&self) -> Protocol {
        match self {
            DecodedRecord::OrderEntry(_) => Protocol::OrderEntry,
            DecodedRecord::MarketData(_) => Protocol::MarketData,
        }
    }

    pub fn message_type(&self) -> u8 {
        match self {
            DecodedRecord::OrderEntry(record) => record.message_type(),
            DecodedRecord::MarketData(record) => record.message_type(),
        }
    }

    /// Symbol carried in the message itself, if the type has a stock field.
    pub fn stock(&self) -> Option<&str> {
        match self {
            DecodedRecord::OrderEntry(record) => record.stock(),
            DecodedRecord::MarketData(record) => record.stock(),
        }
    }
}

// =============================================================================
// ORDER ENTRY (OUCH)
// =============================================================================

/// Enter Order (`O`). Client intent; carries no exchange timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnterOrder {
    pub token: String,
    pub side: u8,
    pub shares: u32,
    pub stock: String,
    pub price: u32,
    pub time_in_force: u32,
    pub firm: String,
    pub display: u8,
    pub capacity: u8,
    pub intermarket_sweep: u8,
    pub minimum_quantity: u32,
    pub cross_type: u8,
    pub customer_type: u8,
}

/// Order Accepted (`A`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAccepted {
    pub timestamp_ns: u64,
    pub token: String,
    pub side: u8,
    pub shares: u32,
    pub stock: String,
    pub price: u32,
    pub time_in_force: u32,
    pub firm: String,
    pub display: u8,
    pub order_reference: u64,
    pub capacity: u8,
    pub intermarket_sweep: u8,
    pub minimum_quantity: u32,
    pub cross_type: u8,
    pub order_state: u8,
    pub bbo_weight: u8,
}

/// Order Replaced (`U`). `token` is the replacement token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReplaced {
    pub timestamp_ns: u64,
    pub token: String,
    pub side: u8,
    pub shares: u32,
    pub stock: String,
    pub price: u32,
    pub time_in_force: u32,
    pub firm: String,
    pub display: u8,
    pub order_reference: u64,
    pub capacity: u8,
    pub intermarket_sweep: u8,
    pub minimum_quantity: u32,
    pub cross_type: u8,
    pub order_state: u8,
    pub previous_token: String,
    pub bbo_weight: u8,
}

/// Order Canceled (`C`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCanceled {
    pub timestamp_ns: u64,
    pub token: String,
    pub decrement_shares: u32,
    pub reason: u8,
}

/// Order Executed (`E`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderExecuted {
    pub timestamp_ns: u64,
    pub token: String,
    pub executed_shares: u32,
    pub execution_price: u32,
    pub liquidity_flag: u8,
    pub match_number: u64,
}

/// Order Rejected (`J`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRejected {
    pub timestamp_ns: u64,
    pub token: String,
    pub reason: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OuchRecord {
    EnterOrder(EnterOrder),
    OrderAccepted(OrderAccepted),
    OrderReplaced(OrderReplaced),
    OrderCanceled(OrderCanceled),
    OrderExecuted(OrderExecuted),
    OrderRejected(OrderRejected),
}

impl OuchRecord {
    pub fn message_type(&self) -> u8 {
        match self {
            OuchRecord::EnterOrder(_) => b'O',
            OuchRecord::OrderAccepted(_) => b'A',
            OuchRecord::OrderReplaced(_) => b'U',
            OuchRecord::OrderCanceled(_) => b'C',
            OuchRecord::OrderExecuted(_) => b'E',
            OuchRecord::OrderRejected(_) => b'J',
        }
    }

    /// The order token this record refers to.
    pub fn token(&self) -> &str {
        match self {
            OuchRecord::EnterOrder(r) => &r.token,
            OuchRecord::OrderAccepted(r) => &r.token,
            OuchRecord::OrderReplaced(r) => &r.token,
            OuchRecord::OrderCanceled(r) => &r.token,
            OuchRecord::OrderExecuted(r) => &r.token,
            OuchRecord::OrderRejected(r) => &r.token,
        }
    }

    pub fn stock(&self) -> Option<&str> {
        match self {
            OuchRecord::EnterOrder(r) => Some(&r.stock),
            OuchRecord::OrderAccepted(r) => Some(&r.stock),
            OuchRecord::OrderReplaced(r) => Some(&r.stock),
            _ => None,
        }
    }

    /// Exchange timestamp, absent on Enter Order.
    pub fn timestamp_ns(&self) -> Option<u64> {
        match self {
            OuchRecord::EnterOrder(_) => None,
            OuchRecord::OrderAccepted(r) => Some(r.timestamp_ns),
            OuchRecord::OrderReplaced(r) => Some(r.timestamp_ns),
            OuchRecord::OrderCanceled(r) => Some(r.timestamp_ns),
            OuchRecord::OrderExecuted(r) => Some(r.timestamp_ns),
            OuchRecord::OrderRejected(r) => Some(r.timestamp_ns),
        }
    }
}

// =============================================================================
// MARKET DATA (ITCH)
// =============================================================================

/// Prefix common to every market-data message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItchHeader {
    pub stock_locate: u16,
    pub tracking_number: u16,
    pub timestamp_ns: u64,
}

/// Stock Directory (`R`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockDirectory {
    pub header: ItchHeader,
    pub stock: String,
    pub market_category: u8,
    pub financial_status: u8,
    pub round_lot_size: u32,
    pub round_lots_only: u8,
    pub issue_classification: u8,
    pub issue_subtype: String,
    pub authenticity: u8,
    pub short_sale_threshold: u8,
    pub ipo_flag: u8,
    pub luld_reference_price_tier: u8,
    pub etp_flag: u8,
    pub etp_leverage_factor: u32,
    pub inverse_indicator: u8,
}

/// Add Order (`A`), or Add Order with MPID attribution (`F`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOrder {
    pub header: ItchHeader,
    pub order_reference: u64,
    pub side: u8,
    pub shares: u32,
    pub stock: String,
    pub price: u32,
    pub attribution: Option<String>,
}

/// Order Executed (`E`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderExecutedItch {
    pub header: ItchHeader,
    pub order_reference: u64,
    pub executed_shares: u32,
    pub match_number: u64,
}

/// Order Executed With Price (`C`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderExecutedWithPrice {
    pub header: ItchHeader,
    pub order_reference: u64,
    pub executed_shares: u32,
    pub match_number: u64,
    pub printable: u8,
    pub execution_price: u32,
}

/// Order Cancel (`X`): partial cancel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCancel {
    pub header: ItchHeader,
    pub order_reference: u64,
    pub canceled_shares: u32,
}

/// Order Delete (`D`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDelete {
    pub header: ItchHeader,
    pub order_reference: u64,
}

/// Order Replace (`U`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderReplace {
    pub header: ItchHeader,
    pub original_order_reference: u64,
    pub new_order_reference: u64,
    pub shares: u32,
    pub price: u32,
}

/// Trade, non-cross (`P`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub header: ItchHeader,
    pub order_reference: u64,
    pub side: u8,
    pub shares: u32,
    pub stock: String,
    pub price: u32,
    pub match_number: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItchRecord {
    StockDirectory(StockDirectory),
    AddOrder(AddOrder),
    OrderExecuted(OrderExecutedItch),
    OrderExecutedWithPrice(OrderExecutedWithPrice),
    OrderCancel(OrderCancel),
    OrderDelete(OrderDelete),
    OrderReplace(OrderReplace),
    Trade(Trade),
}

impl ItchRecord {
    pub fn message_type(&self) -> u8 {
        match self {
            ItchRecord::StockDirectory(_) => b'R',
            ItchRecord::AddOrder(r) if r.attribution.is_some() => b'F',
            ItchRecord::AddOrder(_) => b'A',
            ItchRecord::OrderExecuted(_) => b'E',
            ItchRecord::OrderExecutedWithPrice(_) => b'C',
            ItchRecord::OrderCancel(_) => b'X',
            ItchRecord::OrderDelete(_) => b'D',
            ItchRecord::OrderReplace(_) => b'U',
            ItchRecord::Trade(_) => b'P',
        }
    }

    pub fn header(&self) -> &ItchHeader {
        match self {
            ItchRecord::StockDirectory(r) => &r.header,
            ItchRecord::AddOrder(r) => &r.header,
            ItchRecord::OrderExecuted(r) => &r.header,
            ItchRecord::OrderExecutedWithPrice(r) => &r.header,
            ItchRecord::OrderCancel(r) => &r.header,
            ItchRecord::OrderDelete(r) => &r.header,
            ItchRecord::OrderReplace(r) => &r.header,
            ItchRecord::Trade(r) => &r.header,
        }
    }

    pub fn stock_locate(&self) -> u16 {
        self.header().stock_locate
    }

    pub fn stock(&self) -> Option<&str> {
        match self {
            ItchRecord::StockDirectory(r) => Some(&r.stock),
            ItchRecord::AddOrder(r) => Some(&r.stock),
            ItchRecord::Trade(r) => Some(&r.stock),
            _ => None,
        }
    }
}
