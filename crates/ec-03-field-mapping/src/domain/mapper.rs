//! # Field Mapper
//!
//! Combines a decoded record with side-table context into a protocol-agnostic
//! [`EventDraft`].
//!
//! Every fallible step that can abort the message (enumeration lookups,
//! timestamp conversion) runs before the side tables are touched, so a
//! `MappingError` always leaves state unchanged. State errors that occur
//! afterwards are non-fatal and become the draft's reconciliation marker.

use ec_01_protocol_decoding::domain::records::*;
use ec_02_side_tables::{
    OrderEntry, OrderKey, OrderTransition, SideTables, StateError, TransitionOutcome,
};
use shared_types::{
    EventDraft, EventHeader, EventType, HashAlgo, Protocol, ReconciliationGap, SignAlgo,
    SymbolRef, TradeSection, EVENT_VERSION,
};
use tracing::{debug, warn};

use super::context::{Arrival, MappingContext};
use super::enums::{
    CANCEL_REASON, CAPACITY, CROSS_TYPE, DISPLAY_TYPE, INTERMARKET_SWEEP, LIQUIDITY_FLAG,
    PRINTABLE, REJECT_REASON, SIDE, TIME_IN_FORCE,
};
use super::errors::MappingError;
use super::price::decode_price;
use super::timestamp::{decode_timestamp, EventTimestamp};

/// Record-specific part of a draft, before the common header is attached.
struct Mapped {
    event_type: EventType,
    timestamp: EventTimestamp,
    trade: TradeSection,
    gap: Option<StateError>,
}

/// Validated order terms shared by Enter, Accepted and Replaced.
struct OrderTerms {
    side: &'static str,
    time_in_force: &'static str,
    display: &'static str,
    capacity: &'static str,
    iso: bool,
    cross_type: &'static str,
}

impl OrderTerms {
    fn validate(
        side: u8,
        time_in_force: u32,
        display: u8,
        capacity: u8,
        iso: u8,
        cross_type: u8,
    ) -> Result<Self, MappingError> {
        Ok(Self {
            side: SIDE.name_of(side)?,
            time_in_force: TIME_IN_FORCE.name_of(time_in_force)?,
            display: DISPLAY_TYPE.name_of(display)?,
            capacity: CAPACITY.name_of(capacity)?,
            iso: INTERMARKET_SWEEP.value_of(iso)?,
            cross_type: CROSS_TYPE.name_of(cross_type)?,
        })
    }

    fn write(&self, trade: &mut TradeSection) {
        trade.side = Some(self.side.to_string());
        trade.time_in_force = Some(self.time_in_force.to_string());
        trade.display_type = Some(self.display.to_string());
        trade.capacity = Some(self.capacity.to_string());
        trade.iso = Some(self.iso);
        trade.cross_type = Some(self.cross_type.to_string());
    }
}

fn trade_for(symbol: &SymbolRef, protocol: Protocol, message_type: u8) -> TradeSection {
    TradeSection::new(symbol.render(), symbol.is_resolved(), protocol, message_type)
}

/// Side of an entry already validated when it was inserted.
fn entry_side(entry: &OrderEntry) -> Option<String> {
    SIDE.name_of(entry.side).ok().map(str::to_string)
}

fn execution_type(outcome: &Result<TransitionOutcome, StateError>) -> EventType {
    match outcome {
        Ok(outcome) if !outcome.removed => EventType::Prt,
        _ => EventType::Exe,
    }
}

/// Maps decoded records to event drafts for one session.
#[derive(Debug, Clone)]
pub struct FieldMapper {
    context: MappingContext,
}

impl FieldMapper {
    pub fn new(context: MappingContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &MappingContext {
        &self.context
    }

    /// Map one record, applying its side-table transition.
    pub fn map(
        &self,
        record: &DecodedRecord,
        arrival: Arrival,
        tables: &mut SideTables,
    ) -> Result<EventDraft, MappingError> {
        let mapped = match record {
            DecodedRecord::OrderEntry(record) => self.map_ouch(record, &arrival, tables)?,
            DecodedRecord::MarketData(record) => self.map_itch(record, tables)?,
        };
        Ok(self.finish(mapped, &arrival))
    }

    fn timestamp(&self, nanos: u64) -> Result<EventTimestamp, MappingError> {
        decode_timestamp(nanos, self.context.trading_date)
    }

    fn finish(&self, mapped: Mapped, arrival: &Arrival) -> EventDraft {
        let event_id = self.context.event_id(arrival.sequence);
        let reconciliation = mapped.gap.map(|err| {
            warn!(
                sequence = arrival.sequence,
                event_id = %event_id,
                gap = ?err.gap_kind(),
                error = %err,
                "reconciliation gap"
            );
            ReconciliationGap {
                kind: err.gap_kind(),
                detail: err.to_string(),
            }
        });
        debug!(
            sequence = arrival.sequence,
            event_type = %mapped.event_type,
            symbol = %mapped.trade.symbol,
            "mapped record"
        );

        EventDraft {
            header: EventHeader {
                version: EVENT_VERSION.to_string(),
                event_id: event_id.to_string(),
                event_type: mapped.event_type,
                timestamp_iso: mapped.timestamp.iso,
                timestamp_int: mapped.timestamp.epoch_ns,
                hash_algo: HashAlgo::Sha256,
                sign_algo: SignAlgo::Ed25519,
                clock_sync_status: arrival.clock_sync,
                timestamp_precision: self.context.timestamp_precision,
            },
            trade: mapped.trade,
            governance: self.context.governance.clone(),
            policy: self.context.policy.clone(),
            reconciliation,
        }
    }

    // =========================================================================
    // ORDER ENTRY
    // =========================================================================

    fn map_ouch(
        &self,
        record: &OuchRecord,
        arrival: &Arrival,
        tables: &mut SideTables,
    ) -> Result<Mapped, MappingError> {
        const OUCH: Protocol = Protocol::OrderEntry;
        let tag = record.message_type();

        match record {
            OuchRecord::EnterOrder(m) => {
                let terms = OrderTerms::validate(
                    m.side,
                    m.time_in_force,
                    m.display,
                    m.capacity,
                    m.intermarket_sweep,
                    m.cross_type,
                )?;
                let received = arrival
                    .received_ns
                    .ok_or(MappingError::MissingTimestamp {
                        message_type: char::from(tag),
                    })?;
                let timestamp = self.timestamp(received)?;

                let mut trade = trade_for(&SymbolRef::Resolved(m.stock.clone()), OUCH, tag);
                trade.cl_ord_id = Some(m.token.clone());
                trade.volume = Some(m.shares);
                trade.price = Some(decode_price(m.price));
                trade.min_qty = Some(m.minimum_quantity);
                trade.firm = Some(m.firm.clone());
                terms.write(&mut trade);

                Ok(Mapped {
                    event_type: EventType::Ord,
                    timestamp,
                    trade,
                    gap: None,
                })
            }
            OuchRecord::OrderAccepted(m) => {
                let terms = OrderTerms::validate(
                    m.side,
                    m.time_in_force,
                    m.display,
                    m.capacity,
                    m.intermarket_sweep,
                    m.cross_type,
                )?;
                let timestamp = self.timestamp(m.timestamp_ns)?;

                let outcome = tables.orders.apply(OrderTransition::Add {
                    key: OrderKey::Token(m.token.clone()),
                    entry: OrderEntry {
                        symbol: m.stock.clone(),
                        side: m.side,
                        remaining_shares: m.shares,
                        price: m.price,
                    },
                });

                let mut trade = trade_for(&SymbolRef::Resolved(m.stock.clone()), OUCH, tag);
                trade.order_id = Some(m.order_reference.to_string());
                trade.cl_ord_id = Some(m.token.clone());
                trade.volume = Some(m.shares);
                trade.price = Some(decode_price(m.price));
                trade.remaining_volume = Some(m.shares);
                trade.min_qty = Some(m.minimum_quantity);
                trade.firm = Some(m.firm.clone());
                terms.write(&mut trade);

                Ok(Mapped {
                    event_type: EventType::Ack,
                    timestamp,
                    trade,
                    gap: outcome.err(),
                })
            }
            OuchRecord::OrderReplaced(m) => {
                let terms = OrderTerms::validate(
                    m.side,
                    m.time_in_force,
                    m.display,
                    m.capacity,
                    m.intermarket_sweep,
                    m.cross_type,
                )?;
                let timestamp = self.timestamp(m.timestamp_ns)?;

                let outcome = tables.orders.apply(OrderTransition::Replace {
                    old_key: OrderKey::Token(m.previous_token.clone()),
                    new_key: OrderKey::Token(m.token.clone()),
                    shares: m.shares,
                    price: m.price,
                });

                let mut trade = trade_for(&SymbolRef::Resolved(m.stock.clone()), OUCH, tag);
                trade.order_id = Some(m.order_reference.to_string());
                trade.cl_ord_id = Some(m.token.clone());
                trade.orig_cl_ord_id = Some(m.previous_token.clone());
                trade.volume = Some(m.shares);
                trade.price = Some(decode_price(m.price));
                trade.remaining_volume = Some(m.shares);
                trade.min_qty = Some(m.minimum_quantity);
                trade.firm = Some(m.firm.clone());
                terms.write(&mut trade);

                Ok(Mapped {
                    event_type: EventType::Mod,
                    timestamp,
                    trade,
                    gap: outcome.err(),
                })
            }
            OuchRecord::OrderCanceled(m) => {
                let reason = CANCEL_REASON.name_of(m.reason)?;
                let timestamp = self.timestamp(m.timestamp_ns)?;

                let outcome = tables.orders.apply(OrderTransition::Cancel {
                    key: OrderKey::Token(m.token.clone()),
                    shares: m.decrement_shares,
                });

                let (mut trade, gap) = match outcome {
                    Ok(outcome) => {
                        let symbol = SymbolRef::Resolved(outcome.entry.symbol.clone());
                        let mut trade = trade_for(&symbol, OUCH, tag);
                        trade.side = entry_side(&outcome.entry);
                        trade.price = Some(decode_price(outcome.entry.price));
                        trade.remaining_volume = Some(outcome.entry.remaining_shares);
                        (trade, None)
                    }
                    Err(err) => (trade_for(&SymbolRef::UnknownOrder, OUCH, tag), Some(err)),
                };
                trade.cl_ord_id = Some(m.token.clone());
                trade.volume = Some(m.decrement_shares);
                trade.cancel_reason = Some(reason.to_string());

                Ok(Mapped {
                    event_type: EventType::Cxl,
                    timestamp,
                    trade,
                    gap,
                })
            }
            OuchRecord::OrderExecuted(m) => {
                let liquidity = LIQUIDITY_FLAG.name_of(m.liquidity_flag)?;
                let timestamp = self.timestamp(m.timestamp_ns)?;

                let outcome = tables.orders.apply(OrderTransition::Execute {
                    key: OrderKey::Token(m.token.clone()),
                    shares: m.executed_shares,
                });
                let event_type = execution_type(&outcome);

                let (mut trade, gap) = match outcome {
                    Ok(outcome) => {
                        let symbol = SymbolRef::Resolved(outcome.entry.symbol.clone());
                        let mut trade = trade_for(&symbol, OUCH, tag);
                        trade.side = entry_side(&outcome.entry);
                        trade.remaining_volume = Some(outcome.entry.remaining_shares);
                        (trade, None)
                    }
                    Err(err) => (trade_for(&SymbolRef::UnknownOrder, OUCH, tag), Some(err)),
                };
                trade.cl_ord_id = Some(m.token.clone());
                trade.volume = Some(m.executed_shares);
                trade.price = Some(decode_price(m.execution_price));
                trade.liquidity_flag = Some(liquidity.to_string());
                trade.match_number = Some(m.match_number);

                Ok(Mapped {
                    event_type,
                    timestamp,
                    trade,
                    gap,
                })
            }
            OuchRecord::OrderRejected(m) => {
                let reason = REJECT_REASON.name_of(m.reason)?;
                let timestamp = self.timestamp(m.timestamp_ns)?;

                let symbol = match tables.orders.get(&OrderKey::Token(m.token.clone())) {
                    Some(entry) => SymbolRef::Resolved(entry.symbol.clone()),
                    None => SymbolRef::UnknownOrder,
                };
                let mut trade = trade_for(&symbol, OUCH, tag);
                trade.cl_ord_id = Some(m.token.clone());
                trade.reject_reason = Some(reason.to_string());

                Ok(Mapped {
                    event_type: EventType::Rej,
                    timestamp,
                    trade,
                    gap: None,
                })
            }
        }
    }

    // =========================================================================
    // MARKET DATA
    // =========================================================================

    fn map_itch(&self, record: &ItchRecord, tables: &mut SideTables) -> Result<Mapped, MappingError> {
        const ITCH: Protocol = Protocol::MarketData;
        let tag = record.message_type();
        let locate = record.stock_locate();

        // Symbol of an order-driven record: from the order if known,
        // otherwise from the locate directory.
        let order_symbol = |tables: &SideTables,
                            outcome: &Result<TransitionOutcome, StateError>|
         -> SymbolRef {
            match outcome {
                Ok(outcome) => SymbolRef::Resolved(outcome.entry.symbol.clone()),
                Err(_) => tables.locates.resolve(locate),
            }
        };

        let mapped = match record {
            ItchRecord::StockDirectory(m) => {
                let timestamp = self.timestamp(m.header.timestamp_ns)?;
                let gap = tables.locates.register(locate, &m.stock);

                let trade = trade_for(&SymbolRef::Resolved(m.stock.clone()), ITCH, tag);
                Mapped {
                    event_type: EventType::Ref,
                    timestamp,
                    trade,
                    gap,
                }
            }
            ItchRecord::AddOrder(m) => {
                let side = SIDE.name_of(m.side)?;
                let timestamp = self.timestamp(m.header.timestamp_ns)?;

                let outcome = tables.orders.apply(OrderTransition::Add {
                    key: OrderKey::Reference(m.order_reference),
                    entry: OrderEntry {
                        symbol: m.stock.clone(),
                        side: m.side,
                        remaining_shares: m.shares,
                        price: m.price,
                    },
                });

                let mut trade = trade_for(&SymbolRef::Resolved(m.stock.clone()), ITCH, tag);
                trade.order_id = Some(m.order_reference.to_string());
                trade.side = Some(side.to_string());
                trade.volume = Some(m.shares);
                trade.price = Some(decode_price(m.price));
                trade.remaining_volume = Some(m.shares);
                trade.firm = m.attribution.clone();
                Mapped {
                    event_type: EventType::Ord,
                    timestamp,
                    trade,
                    gap: outcome.err(),
                }
            }
            ItchRecord::OrderExecuted(m) => {
                let timestamp = self.timestamp(m.header.timestamp_ns)?;
                let outcome = tables.orders.apply(OrderTransition::Execute {
                    key: OrderKey::Reference(m.order_reference),
                    shares: m.executed_shares,
                });

                let mut trade = trade_for(&order_symbol(&*tables, &outcome), ITCH, tag);
                trade.order_id = Some(m.order_reference.to_string());
                trade.volume = Some(m.executed_shares);
                trade.match_number = Some(m.match_number);
                if let Ok(outcome) = &outcome {
                    trade.side = entry_side(&outcome.entry);
                    trade.price = Some(decode_price(outcome.entry.price));
                    trade.remaining_volume = Some(outcome.entry.remaining_shares);
                }
                Mapped {
                    event_type: execution_type(&outcome),
                    timestamp,
                    trade,
                    gap: outcome.err(),
                }
            }
            ItchRecord::OrderExecutedWithPrice(m) => {
                let printable = PRINTABLE.value_of(m.printable)?;
                let timestamp = self.timestamp(m.header.timestamp_ns)?;
                let outcome = tables.orders.apply(OrderTransition::Execute {
                    key: OrderKey::Reference(m.order_reference),
                    shares: m.executed_shares,
                });

                let mut trade = trade_for(&order_symbol(&*tables, &outcome), ITCH, tag);
                trade.order_id = Some(m.order_reference.to_string());
                trade.volume = Some(m.executed_shares);
                trade.price = Some(decode_price(m.execution_price));
                trade.match_number = Some(m.match_number);
                trade.printable = Some(printable);
                if let Ok(outcome) = &outcome {
                    trade.side = entry_side(&outcome.entry);
                    trade.remaining_volume = Some(outcome.entry.remaining_shares);
                }
                Mapped {
                    event_type: execution_type(&outcome),
                    timestamp,
                    trade,
                    gap: outcome.err(),
                }
            }
            ItchRecord::OrderCancel(m) => {
                let timestamp = self.timestamp(m.header.timestamp_ns)?;
                let outcome = tables.orders.apply(OrderTransition::Cancel {
                    key: OrderKey::Reference(m.order_reference),
                    shares: m.canceled_shares,
                });

                let mut trade = trade_for(&order_symbol(&*tables, &outcome), ITCH, tag);
                trade.order_id = Some(m.order_reference.to_string());
                trade.volume = Some(m.canceled_shares);
                if let Ok(outcome) = &outcome {
                    trade.side = entry_side(&outcome.entry);
                    trade.price = Some(decode_price(outcome.entry.price));
                    trade.remaining_volume = Some(outcome.entry.remaining_shares);
                }
                Mapped {
                    event_type: EventType::Cxl,
                    timestamp,
                    trade,
                    gap: outcome.err(),
                }
            }
            ItchRecord::OrderDelete(m) => {
                let timestamp = self.timestamp(m.header.timestamp_ns)?;
                let outcome = tables.orders.apply(OrderTransition::Delete {
                    key: OrderKey::Reference(m.order_reference),
                });

                let mut trade = trade_for(&order_symbol(&*tables, &outcome), ITCH, tag);
                trade.order_id = Some(m.order_reference.to_string());
                if let Ok(outcome) = &outcome {
                    trade.side = entry_side(&outcome.entry);
                    trade.volume = Some(outcome.previous_remaining);
                    trade.price = Some(decode_price(outcome.entry.price));
                    trade.remaining_volume = Some(0);
                }
                Mapped {
                    event_type: EventType::Cxl,
                    timestamp,
                    trade,
                    gap: outcome.err(),
                }
            }
            ItchRecord::OrderReplace(m) => {
                let timestamp = self.timestamp(m.header.timestamp_ns)?;
                let outcome = tables.orders.apply(OrderTransition::Replace {
                    old_key: OrderKey::Reference(m.original_order_reference),
                    new_key: OrderKey::Reference(m.new_order_reference),
                    shares: m.shares,
                    price: m.price,
                });

                let mut trade = trade_for(&order_symbol(&*tables, &outcome), ITCH, tag);
                trade.order_id = Some(m.new_order_reference.to_string());
                trade.orig_cl_ord_id = Some(m.original_order_reference.to_string());
                trade.volume = Some(m.shares);
                trade.price = Some(decode_price(m.price));
                trade.remaining_volume = Some(m.shares);
                if let Ok(outcome) = &outcome {
                    trade.side = entry_side(&outcome.entry);
                }
                Mapped {
                    event_type: EventType::Mod,
                    timestamp,
                    trade,
                    gap: outcome.err(),
                }
            }
            ItchRecord::Trade(m) => {
                let side = SIDE.name_of(m.side)?;
                let timestamp = self.timestamp(m.header.timestamp_ns)?;

                let mut trade = trade_for(&SymbolRef::Resolved(m.stock.clone()), ITCH, tag);
                trade.order_id = Some(m.order_reference.to_string());
                trade.side = Some(side.to_string());
                trade.volume = Some(m.shares);
                trade.price = Some(decode_price(m.price));
                trade.match_number = Some(m.match_number);
                Mapped {
                    event_type: EventType::Trd,
                    timestamp,
                    trade,
                    gap: None,
                }
            }
        };

        let mut mapped = mapped;
        mapped.trade.stock_locate = Some(locate);
        Ok(mapped)
    }
}
