//! # Encoder
//!
//! Writes a decoded record back to its wire form using the same layout
//! constants as the decoder. Used by replay tooling and fixture builders.

use super::errors::EncodeError;
use super::layouts::{itch as itl, ouch as oul};
use super::reader::FieldWriter;
use super::records::*;

/// Encode a record to its fixed-length wire form.
pub fn encode(record: &DecodedRecord) -> Result<Vec<u8>, EncodeError> {
    match record {
        DecodedRecord::OrderEntry(record) => encode_ouch(record),
        DecodedRecord::MarketData(record) => encode_itch(record),
    }
}

fn encode_ouch(record: &OuchRecord) -> Result<Vec<u8>, EncodeError> {
    let bytes = match record {
        OuchRecord::EnterOrder(m) => {
            use oul::enter_order as f;
            let mut w = FieldWriter::new(&oul::ENTER_ORDER);
            w.put_alpha(f::TOKEN, &m.token)?;
            w.put_u8(f::SIDE, m.side);
            w.put_uint(f::SHARES, m.shares.into());
            w.put_alpha(f::STOCK, &m.stock)?;
            w.put_uint(f::PRICE, m.price.into());
            w.put_uint(f::TIME_IN_FORCE, m.time_in_force.into());
            w.put_alpha(f::FIRM, &m.firm)?;
            w.put_u8(f::DISPLAY, m.display);
            w.put_u8(f::CAPACITY, m.capacity);
            w.put_u8(f::ISO, m.intermarket_sweep);
            w.put_uint(f::MIN_QTY, m.minimum_quantity.into());
            w.put_u8(f::CROSS_TYPE, m.cross_type);
            w.put_u8(f::CUSTOMER_TYPE, m.customer_type);
            w.finish()
        }
        OuchRecord::OrderAccepted(m) => {
            use oul::accepted as f;
            let mut w = FieldWriter::new(&oul::ORDER_ACCEPTED);
            w.put_uint(f::TIMESTAMP, m.timestamp_ns);
            w.put_alpha(f::TOKEN, &m.token)?;
            w.put_u8(f::SIDE, m.side);
            w.put_uint(f::SHARES, m.shares.into());
            w.put_alpha(f::STOCK, &m.stock)?;
            w.put_uint(f::PRICE, m.price.into());
            w.put_uint(f::TIME_IN_FORCE, m.time_in_force.into());
            w.put_alpha(f::FIRM, &m.firm)?;
            w.put_u8(f::DISPLAY, m.display);
            w.put_uint(f::ORDER_REFERENCE, m.order_reference);
            w.put_u8(f::CAPACITY, m.capacity);
            w.put_u8(f::ISO, m.intermarket_sweep);
            w.put_uint(f::MIN_QTY, m.minimum_quantity.into());
            w.put_u8(f::CROSS_TYPE, m.cross_type);
            w.put_u8(f::ORDER_STATE, m.order_state);
            w.put_u8(f::BBO_WEIGHT, m.bbo_weight);
            w.finish()
        }
        OuchRecord::OrderReplaced(m) => {
            use oul::accepted as f;
            let mut w = FieldWriter::new(&oul::ORDER_REPLACED);
            w.put_uint(f::TIMESTAMP, m.timestamp_ns);
            w.put_alpha(f::TOKEN, &m.token)?;
            w.put_u8(f::SIDE, m.side);
            w.put_uint(f::SHARES, m.shares.into());
            w.put_alpha(f::STOCK, &m.stock)?;
            w.put_uint(f::PRICE, m.price.into());
            w.put_uint(f::TIME_IN_FORCE, m.time_in_force.into());
            w.put_alpha(f::FIRM, &m.firm)?;
            w.put_u8(f::DISPLAY, m.display);
            w.put_uint(f::ORDER_REFERENCE, m.order_reference);
            w.put_u8(f::CAPACITY, m.capacity);
            w.put_u8(f::ISO, m.intermarket_sweep);
            w.put_uint(f::MIN_QTY, m.minimum_quantity.into());
            w.put_u8(f::CROSS_TYPE, m.cross_type);
            w.put_u8(f::ORDER_STATE, m.order_state);
            w.put_alpha(oul::replaced::PREVIOUS_TOKEN, &m.previous_token)?;
            w.put_u8(oul::replaced::BBO_WEIGHT, m.bbo_weight);
            w.finish()
        }
        OuchRecord::OrderCanceled(m) => {
            use oul::canceled as f;
            let mut w = FieldWriter::new(&oul::ORDER_CANCELED);
            w.put_uint(f::TIMESTAMP, m.timestamp_ns);
            w.put_alpha(f::TOKEN, &m.token)?;
            w.put_uint(f::DECREMENT_SHARES, m.decrement_shares.into());
            w.put_u8(f::REASON, m.reason);
            w.finish()
        }
        OuchRecord::OrderExecuted(m) => {
            use oul::executed as f;
            let mut w = FieldWriter::new(&oul::ORDER_EXECUTED);
            w.put_uint(f::TIMESTAMP, m.timestamp_ns);
            w.put_alpha(f::TOKEN, &m.token)?;
            w.put_uint(f::EXECUTED_SHARES, m.executed_shares.into());
            w.put_uint(f::EXECUTION_PRICE, m.execution_price.into());
            w.put_u8(f::LIQUIDITY_FLAG, m.liquidity_flag);
            w.put_uint(f::MATCH_NUMBER, m.match_number);
            w.finish()
        }
        OuchRecord::OrderRejected(m) => {
            use oul::rejected as f;
            let mut w = FieldWriter::new(&oul::ORDER_REJECTED);
            w.put_uint(f::TIMESTAMP, m.timestamp_ns);
            w.put_alpha(f::TOKEN, &m.token)?;
            w.put_u8(f::REASON, m.reason);
            w.finish()
        }
    };
    Ok(bytes)
}

fn put_header(w: &mut FieldWriter, header: &ItchHeader) {
    w.put_uint(itl::prefix::STOCK_LOCATE, header.stock_locate.into());
    w.put_uint(itl::prefix::TRACKING_NUMBER, header.tracking_number.into());
    w.put_uint(itl::prefix::TIMESTAMP, header.timestamp_ns);
}

fn encode_itch(record: &ItchRecord) -> Result<Vec<u8>, EncodeError> {
    let bytes = match record {
        ItchRecord::StockDirectory(m) => {
            use itl::stock_directory as f;
            let mut w = FieldWriter::new(&itl::STOCK_DIRECTORY);
            put_header(&mut w, &m.header);
            w.put_alpha(f::STOCK, &m.stock)?;
            w.put_u8(f::MARKET_CATEGORY, m.market_category);
            w.put_u8(f::FINANCIAL_STATUS, m.financial_status);
            w.put_uint(f::ROUND_LOT_SIZE, m.round_lot_size.into());
            w.put_u8(f::ROUND_LOTS_ONLY, m.round_lots_only);
            w.put_u8(f::ISSUE_CLASSIFICATION, m.issue_classification);
            w.put_alpha(f::ISSUE_SUBTYPE, &m.issue_subtype)?;
            w.put_u8(f::AUTHENTICITY, m.authenticity);
            w.put_u8(f::SHORT_SALE_THRESHOLD, m.short_sale_threshold);
            w.put_u8(f::IPO_FLAG, m.ipo_flag);
            w.put_u8(f::LULD_TIER, m.luld_reference_price_tier);
            w.put_u8(f::ETP_FLAG, m.etp_flag);
            w.put_uint(f::ETP_LEVERAGE, m.etp_leverage_factor.into());
            w.put_u8(f::INVERSE, m.inverse_indicator);
            w.finish()
        }
        ItchRecord::AddOrder(m) => {
            use itl::add_order as f;
            let layout = if m.attribution.is_some() {
                &itl::ADD_ORDER_MPID
            } else {
                &itl::ADD_ORDER
            };
            let mut w = FieldWriter::new(layout);
            put_header(&mut w, &m.header);
            w.put_uint(f::ORDER_REFERENCE, m.order_reference);
            w.put_u8(f::SIDE, m.side);
            w.put_uint(f::SHARES, m.shares.into());
            w.put_alpha(f::STOCK, &m.stock)?;
            w.put_uint(f::PRICE, m.price.into());
            if let Some(attribution) = &m.attribution {
                w.put_alpha(f::ATTRIBUTION, attribution)?;
            }
            w.finish()
        }
        ItchRecord::OrderExecuted(m) => {
            use itl::executed as f;
            let mut w = FieldWriter::new(&itl::ORDER_EXECUTED);
            put_header(&mut w, &m.header);
            w.put_uint(f::ORDER_REFERENCE, m.order_reference);
            w.put_uint(f::EXECUTED_SHARES, m.executed_shares.into());
            w.put_uint(f::MATCH_NUMBER, m.match_number);
            w.finish()
        }
        ItchRecord::OrderExecutedWithPrice(m) => {
            use itl::executed as f;
            let mut w = FieldWriter::new(&itl::ORDER_EXECUTED_WITH_PRICE);
            put_header(&mut w, &m.header);
            w.put_uint(f::ORDER_REFERENCE, m.order_reference);
            w.put_uint(f::EXECUTED_SHARES, m.executed_shares.into());
            w.put_uint(f::MATCH_NUMBER, m.match_number);
            w.put_u8(f::PRINTABLE, m.printable);
            w.put_uint(f::EXECUTION_PRICE, m.execution_price.into());
            w.finish()
        }
        ItchRecord::OrderCancel(m) => {
            use itl::cancel as f;
            let mut w = FieldWriter::new(&itl::ORDER_CANCEL);
            put_header(&mut w, &m.header);
            w.put_uint(f::ORDER_REFERENCE, m.order_reference);
            w.put_uint(f::CANCELED_SHARES, m.canceled_shares.into());
            w.finish()
        }
        ItchRecord::OrderDelete(m) => {
            let mut w = FieldWriter::new(&itl::ORDER_DELETE);
            put_header(&mut w, &m.header);
            w.put_uint(itl::delete::ORDER_REFERENCE, m.order_reference);
            w.finish()
        }
        ItchRecord::OrderReplace(m) => {
            use itl::replace as f;
            let mut w = FieldWriter::new(&itl::ORDER_REPLACE);
            put_header(&mut w, &m.header);
            w.put_uint(f::ORIGINAL_REFERENCE, m.original_order_reference);
            w.put_uint(f::NEW_REFERENCE, m.new_order_reference);
            w.put_uint(f::SHARES, m.shares.into());
            w.put_uint(f::PRICE, m.price.into());
            w.finish()
        }
        ItchRecord::Trade(m) => {
            use itl::trade as f;
            let mut w = FieldWriter::new(&itl::TRADE);
            put_header(&mut w, &m.header);
            w.put_uint(f::ORDER_REFERENCE, m.order_reference);
            w.put_u8(f::SIDE, m.side);
            w.put_uint(f::SHARES, m.shares.into());
            w.put_alpha(f::STOCK, &m.stock)?;
            w.put_uint(f::PRICE, m.price.into());
            w.put_uint(f::MATCH_NUMBER, m.match_number);
            w.finish()
        }
    };
    Ok(bytes)
}
