//! # Decoder
//!
//! Dispatches on the first byte to the per-type layout and reads every field
//! at its fixed offset. Pure over immutable input.

use shared_types::Protocol;

use super::errors::DecodeError;
use super::layouts::{itch as itl, layout_for, ouch as oul, MessageLayout};
use super::reader::FieldReader;
use super::records::*;

/// Decode a single message of the given protocol.
pub fn decode(bytes: &[u8], protocol: Protocol) -> Result<DecodedRecord, DecodeError> {
    let tag = *bytes.first().ok_or(DecodeError::TruncatedMessage {
        expected: 1,
        actual: 0,
    })?;
    let layout =
        layout_for(protocol, tag).ok_or(DecodeError::UnknownMessageType { protocol, tag })?;
    let reader = FieldReader::new(bytes, layout)?;

    match protocol {
        Protocol::OrderEntry => decode_ouch(&reader, layout).map(DecodedRecord::OrderEntry),
        Protocol::MarketData => decode_itch(&reader, layout).map(DecodedRecord::MarketData),
    }
}

fn decode_ouch(r: &FieldReader<'_>, layout: &MessageLayout) -> Result<OuchRecord, DecodeError> {
    let record = match layout.tag {
        b'O' => {
            use oul::enter_order as f;
            OuchRecord::EnterOrder(EnterOrder {
                token: r.alpha(f::TOKEN)?,
                side: r.u8(f::SIDE),
                shares: r.u32(f::SHARES),
                stock: r.alpha(f::STOCK)?,
                price: r.u32(f::PRICE),
                time_in_force: r.u32(f::TIME_IN_FORCE),
                firm: r.alpha(f::FIRM)?,
                display: r.u8(f::DISPLAY),
                capacity: r.u8(f::CAPACITY),
                intermarket_sweep: r.u8(f::ISO),
                minimum_quantity: r.u32(f::MIN_QTY),
                cross_type: r.u8(f::CROSS_TYPE),
                customer_type: r.u8(f::CUSTOMER_TYPE),
            })
        }
        b'A' => {
            use oul::accepted as f;
            OuchRecord::OrderAccepted(OrderAccepted {
                timestamp_ns: r.u64(f::TIMESTAMP),
                token: r.alpha(f::TOKEN)?,
                side: r.u8(f::SIDE),
                shares: r.u32(f::SHARES),
                stock: r.alpha(f::STOCK)?,
                price: r.u32(f::PRICE),
                time_in_force: r.u32(f::TIME_IN_FORCE),
                firm: r.alpha(f::FIRM)?,
                display: r.u8(f::DISPLAY),
                order_reference: r.u64(f::ORDER_REFERENCE),
                capacity: r.u8(f::CAPACITY),
                intermarket_sweep: r.u8(f::ISO),
                minimum_quantity: r.u32(f::MIN_QTY),
                cross_type: r.u8(f::CROSS_TYPE),
                order_state: r.u8(f::ORDER_STATE),
                bbo_weight: r.u8(f::BBO_WEIGHT),
            })
        }
        b'U' => {
            use oul::accepted as f;
            OuchRecord::OrderReplaced(OrderReplaced {
                timestamp_ns: r.u64(f::TIMESTAMP),
                token: r.alpha(f::TOKEN)?,
                side: r.u8(f::SIDE),
                shares: r.u32(f::SHARES),
                stock: r.alpha(f::STOCK)?,
                price: r.u32(f::PRICE),
                time_in_force: r.u32(f::TIME_IN_FORCE),
                firm: r.alpha(f::FIRM)?,
                display: r.u8(f::DISPLAY),
                order_reference: r.u64(f::ORDER_REFERENCE),
                capacity: r.u8(f::CAPACITY),
                intermarket_sweep: r.u8(f::ISO),
                minimum_quantity: r.u32(f::MIN_QTY),
                cross_type: r.u8(f::CROSS_TYPE),
                order_state: r.u8(f::ORDER_STATE),
                previous_token: r.alpha(oul::replaced::PREVIOUS_TOKEN)?,
                bbo_weight: r.u8(oul::replaced::BBO_WEIGHT),
            })
        }
        b'C' => {
            use oul::canceled as f;
            OuchRecord::OrderCanceled(OrderCanceled {
                timestamp_ns: r.u64(f::TIMESTAMP),
                token: r.alpha(f::TOKEN)?,
                decrement_shares: r.u32(f::DECREMENT_SHARES),
                reason: r.u8(f::REASON),
            })
        }
        b'E' => {
            use oul::executed as f;
            OuchRecord::OrderExecuted(OrderExecuted {
                timestamp_ns: r.u64(f::TIMESTAMP),
                token: r.alpha(f::TOKEN)?,
                executed_shares: r.u32(f::EXECUTED_SHARES),
                execution_price: r.u32(f::EXECUTION_PRICE),
                liquidity_flag: r.u8(f::LIQUIDITY_FLAG),
                match_number: r.u64(f::MATCH_NUMBER),
            })
        }
        b'J' => {
            use oul::rejected as f;
            OuchRecord::OrderRejected(OrderRejected {
                timestamp_ns: r.u64(f::TIMESTAMP),
                token: r.alpha(f::TOKEN)?,
                reason: r.u8(f::REASON),
            })
        }
        tag => {
            return Err(DecodeError::UnknownMessageType {
                protocol: Protocol::OrderEntry,
                tag,
            })
        }
    };
    Ok(record)
}

fn itch_header(r: &FieldReader<'_>) -> ItchHeader {
    ItchHeader {
        stock_locate: r.u16(itl::prefix::STOCK_LOCATE),
        tracking_number: r.u16(itl::prefix::TRACKING_NUMBER),
        timestamp_ns: r.u64(itl::prefix::TIMESTAMP),
    }
}

fn decode_itch(r: &FieldReader<'_>, layout: &MessageLayout) -> Result<ItchRecord, DecodeError> {
    let header = itch_header(r);
    let record = match layout.tag {
        b'R' => {
            use itl::stock_directory as f;
            ItchRecord::StockDirectory(StockDirectory {
                header,
                stock: r.alpha(f::STOCK)?,
                market_category: r.u8(f::MARKET_CATEGORY),
                financial_status: r.u8(f::FINANCIAL_STATUS),
                round_lot_size: r.u32(f::ROUND_LOT_SIZE),
                round_lots_only: r.u8(f::ROUND_LOTS_ONLY),
                issue_classification: r.u8(f::ISSUE_CLASSIFICATION),
                issue_subtype: r.alpha(f::ISSUE_SUBTYPE)?,
                authenticity: r.u8(f::AUTHENTICITY),
                short_sale_threshold: r.u8(f::SHORT_SALE_THRESHOLD),
                ipo_flag: r.u8(f::IPO_FLAG),
                luld_reference_price_tier: r.u8(f::LULD_TIER),
                etp_flag: r.u8(f::ETP_FLAG),
                etp_leverage_factor: r.u32(f::ETP_LEVERAGE),
                inverse_indicator: r.u8(f::INVERSE),
            })
        }
        b'A' | b'F' => {
            use itl::add_order as f;
            let attribution = if layout.tag == b'F' {
                Some(r.alpha(f::ATTRIBUTION)?)
            } else {
                None
            };
            ItchRecord::AddOrder(AddOrder {
                header,
                order_reference: r.u64(f::ORDER_REFERENCE),
                side: r.u8(f::SIDE),
                shares: r.u32(f::SHARES),
                stock: r.alpha(f::STOCK)?,
                price: r.u32(f::PRICE),
                attribution,
            })
        }
        b'E' => {
            use itl::executed as f;
            ItchRecord::OrderExecuted(OrderExecutedItch {
                header,
                order_reference: r.u64(f::ORDER_REFERENCE),
                executed_shares: r.u32(f::EXECUTED_SHARES),
                match_number: r.u64(f::MATCH_NUMBER),
            })
        }
        b'C' => {
            use itl::executed as f;
            ItchRecord::OrderExecutedWithPrice(OrderExecutedWithPrice {
                header,
                order_reference: r.u64(f::ORDER_REFERENCE),
                executed_shares: r.u32(f::EXECUTED_SHARES),
                match_number: r.u64(f::MATCH_NUMBER),
                printable: r.u8(f::PRINTABLE),
                execution_price: r.u32(f::EXECUTION_PRICE),
            })
        }
        b'X' => {
            use itl::cancel as f;
            ItchRecord::OrderCancel(OrderCancel {
                header,
                order_reference: r.u64(f::ORDER_REFERENCE),
                canceled_shares: r.u32(f::CANCELED_SHARES),
            })
        }
        b'D' => ItchRecord::OrderDelete(OrderDelete {
            header,
            order_reference: r.u64(itl::delete::ORDER_REFERENCE),
        }),
        b'U' => {
            use itl::replace as f;
            ItchRecord::OrderReplace(OrderReplace {
                header,
                original_order_reference: r.u64(f::ORIGINAL_REFERENCE),
                new_order_reference: r.u64(f::NEW_REFERENCE),
                shares: r.u32(f::SHARES),
                price: r.u32(f::PRICE),
            })
        }
        b'P' => {
            use itl::trade as f;
            ItchRecord::Trade(Trade {
                header,
                order_reference: r.u64(f::ORDER_REFERENCE),
                side: r.u8(f::SIDE),
                shares: r.u32(f::SHARES),
                stock: r.alpha(f::STOCK)?,
                price: r.u32(f::PRICE),
                match_number: r.u64(f::MATCH_NUMBER),
            })
        }
        tag => {
            return Err(DecodeError::UnknownMessageType {
                protocol: Protocol::MarketData,
                tag,
            })
        }
    };
    Ok(record)
}
