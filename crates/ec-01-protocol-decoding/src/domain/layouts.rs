//! # Wire Layouts
//!
//! The single authoritative offset table for every supported message type.
//! Both the decoder and the encoder read offsets from here, so the two
//! directions cannot drift apart.
//!
//! All integers are big-endian. Text fields are ASCII, right-padded with
//! spaces. ITCH timestamps are 6 bytes, OUCH timestamps 8 bytes, both in
//! nanoseconds since midnight.

use shared_types::Protocol;

/// A fixed-offset field inside a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub offset: usize,
    pub len: usize,
}

impl Field {
    pub const fn new(name: &'static str, offset: usize, len: usize) -> Self {
        Self { name, offset, len }
    }

    /// One past the last byte of the field.
    pub const fn end(&self) -> usize {
        self.offset + self.len
    }
}

/// Identity and minimum length of a message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageLayout {
    pub protocol: Protocol,
    pub tag: u8,
    pub name: &'static str,
    pub len: usize,
    pub fields: &'static [Field],
}

/// Message-type tag, always the first byte.
pub const TAG: Field = Field::new("message_type", 0, 1);

// =============================================================================
// ORDER ENTRY (OUCH 4.2)
// =============================================================================

pub mod ouch {
    use super::{Field, MessageLayout, TAG};
    use shared_types::Protocol;

    pub mod enter_order {
        use super::Field;

        pub const TOKEN: Field = Field::new("token", 1, 14);
        pub const SIDE: Field = Field::new("side", 15, 1);
        pub const SHARES: Field = Field::new("shares", 16, 4);
        pub const STOCK: Field = Field::new("stock", 20, 8);
        pub const PRICE: Field = Field::new("price", 28, 4);
        pub const TIME_IN_FORCE: Field = Field::new("time_in_force", 32, 4);
        pub const FIRM: Field = Field::new("firm", 36, 4);
        pub const DISPLAY: Field = Field::new("display", 40, 1);
        pub const CAPACITY: Field = Field::new("capacity", 41, 1);
        pub const ISO: Field = Field::new("intermarket_sweep", 42, 1);
        pub const MIN_QTY: Field = Field::new("minimum_quantity", 43, 4);
        pub const CROSS_TYPE: Field = Field::new("cross_type", 47, 1);
        pub const CUSTOMER_TYPE: Field = Field::new("customer_type", 48, 1);
    }

    /// Fields shared by Order Accepted and Order Replaced.
    pub mod accepted {
        use super::Field;

        pub const TIMESTAMP: Field = Field::new("timestamp", 1, 8);
        pub const TOKEN: Field = Field::new("token", 9, 14);
        pub const SIDE: Field = Field::new("side", 23, 1);
        pub const SHARES: Field = Field::new("shares", 24, 4);
        pub const STOCK: Field = Field::new("stock", 28, 8);
        pub const PRICE: Field = Field::new("price", 36, 4);
        pub const TIME_IN_FORCE: Field = Field::new("time_in_force", 40, 4);
        pub const FIRM: Field = Field::new("firm", 44, 4);
        pub const DISPLAY: Field = Field::new("display", 48, 1);
        pub const ORDER_REFERENCE: Field = Field::new("order_reference", 49, 8);
        pub const CAPACITY: Field = Field::new("capacity", 57, 1);
        pub const ISO: Field = Field::new("intermarket_sweep", 58, 1);
        pub const MIN_QTY: Field = Field::new("minimum_quantity", 59, 4);
        pub const CROSS_TYPE: Field = Field::new("cross_type", 63, 1);
        pub const ORDER_STATE: Field = Field::new("order_state", 64, 1);
        /// Order Accepted only.
        pub const BBO_WEIGHT: Field = Field::new("bbo_weight", 65, 1);
    }

    /// Order Replaced tail after the shared accepted-layout prefix.
    pub mod replaced {
        use super::Field;

        pub const PREVIOUS_TOKEN: Field = Field::new("previous_token", 65, 14);
        pub const BBO_WEIGHT: Field = Field::new("bbo_weight", 79, 1);
    }

    pub mod canceled {
        use super::Field;

        pub const TIMESTAMP: Field = Field::new("timestamp", 1, 8);
        pub const TOKEN: Field = Field::new("token", 9, 14);
        pub const DECREMENT_SHARES: Field = Field::new("decrement_shares", 23, 4);
        pub const REASON: Field = Field::new("reason", 27, 1);
    }

    pub mod executed {
        use super::Field;

        pub const TIMESTAMP: Field = Field::new("timestamp", 1, 8);
        pub const TOKEN: Field = Field::new("token", 9, 14);
        pub const EXECUTED_SHARES: Field = Field::new("executed_shares", 23, 4);
        pub const EXECUTION_PRICE: Field = Field::new("execution_price", 27, 4);
        pub const LIQUIDITY_FLAG: Field = Field::new("liquidity_flag", 31, 1);
        pub const MATCH_NUMBER: Field = Field::new("match_number", 32, 8);
    }

    pub mod rejected {
        use super::Field;

        pub const TIMESTAMP: Field = Field::new("timestamp", 1, 8);
        pub const TOKEN: Field = Field::new("token", 9, 14);
        pub const REASON: Field = Field::new("reason", 23, 1);
    }

    const ENTER_ORDER_FIELDS: &[Field] = &[
        TAG,
        enter_order::TOKEN,
        enter_order::SIDE,
        enter_order::SHARES,
        enter_order::STOCK,
        enter_order::PRICE,
        enter_order::TIME_IN_FORCE,
        enter_order::FIRM,
        enter_order::DISPLAY,
        enter_order::CAPACITY,
        enter_order::ISO,
        enter_order::MIN_QTY,
        enter_order::CROSS_TYPE,
        enter_order::CUSTOMER_TYPE,
    ];

    const ACCEPTED_FIELDS: &[Field] = &[
        TAG,
        accepted::TIMESTAMP,
        accepted::TOKEN,
        accepted::SIDE,
        accepted::SHARES,
        accepted::STOCK,
        accepted::PRICE,
        accepted::TIME_IN_FORCE,
        accepted::FIRM,
        accepted::DISPLAY,
        accepted::ORDER_REFERENCE,
        accepted::CAPACITY,
        accepted::ISO,
        accepted::MIN_QTY,
        accepted::CROSS_TYPE,
        accepted::ORDER_STATE,
        accepted::BBO_WEIGHT,
    ];

    const REPLACED_FIELDS: &[Field] = &[
        TAG,
        accepted::TIMESTAMP,
        accepted::TOKEN,
        accepted::SIDE,
        accepted::SHARES,
        accepted::STOCK,
        accepted::PRICE,
        accepted::TIME_IN_FORCE,
        accepted::FIRM,
        accepted::DISPLAY,
        accepted::ORDER_REFERENCE,
        accepted::CAPACITY,
        accepted::ISO,
        accepted::MIN_QTY,
        accepted::CROSS_TYPE,
        accepted::ORDER_STATE,
        replaced::PREVIOUS_TOKEN,
        replaced::BBO_WEIGHT,
    ];

    const CANCELED_FIELDS: &[Field] = &[
        TAG,
        canceled::TIMESTAMP,
        canceled::TOKEN,
        canceled::DECREMENT_SHARES,
        canceled::REASON,
    ];

    const EXECUTED_FIELDS: &[Field] = &[
        TAG,
        executed::TIMESTAMP,
        executed::TOKEN,
        executed::EXECUTED_SHARES,
        executed::EXECUTION_PRICE,
        executed::LIQUIDITY_FLAG,
        executed::MATCH_NUMBER,
    ];

    const REJECTED_FIELDS: &[Field] = &[
        TAG,
        rejected::TIMESTAMP,
        rejected::TOKEN,
        rejected::REASON,
    ];

    pub const ENTER_ORDER: MessageLayout = MessageLayout {
        protocol: Protocol::OrderEntry,
        tag: b'O',
        name: "Enter Order",
        len: 49,
        fields: ENTER_ORDER_FIELDS,
    };

    pub const ORDER_ACCEPTED: MessageLayout = MessageLayout {
        protocol: Protocol::OrderEntry,
        tag: b'A',
        name: "Order Accepted",
        len: 66,
        fields: ACCEPTED_FIELDS,
    };

    pub const ORDER_REPLACED: MessageLayout = MessageLayout {
        protocol: Protocol::OrderEntry,
        tag: b'U',
        name: "Order Replaced",
        len: 80,
        fields: REPLACED_FIELDS,
    };

    pub const ORDER_CANCELED: MessageLayout = MessageLayout {
        protocol: Protocol::OrderEntry,
        tag: b'C',
        name: "Order Canceled",
        len: 28,
        fields: CANCELED_FIELDS,
    };

    pub const ORDER_EXECUTED: MessageLayout = MessageLayout {
        protocol: Protocol::OrderEntry,
        tag: b'E',
        name: "Order Executed",
        len: 40,
        fields: EXECUTED_FIELDS,
    };

    pub const ORDER_REJECTED: MessageLayout = MessageLayout {
        protocol: Protocol::OrderEntry,
        tag: b'J',
        name: "Order Rejected",
        len: 24,
        fields: REJECTED_FIELDS,
    };

    pub const ALL: &[MessageLayout] = &[
        ENTER_ORDER,
        ORDER_ACCEPTED,
        ORDER_REPLACED,
        ORDER_CANCELED,
        ORDER_EXECUTED,
        ORDER_REJECTED,
    ];
}

// =============================================================================
// MARKET DATA (ITCH 5.0)
// =============================================================================

pub mod itch {
    use super::{Field, MessageLayout, TAG};
    use shared_types::Protocol;

    /// Prefix shared by every market-data message.
    pub mod prefix {
        use super::Field;

        pub const STOCK_LOCATE: Field = Field::new("stock_locate", 1, 2);
        pub const TRACKING_NUMBER: Field = Field::new("tracking_number", 3, 2);
        pub const TIMESTAMP: Field = Field::new("timestamp", 5, 6);
    }

    pub mod stock_directory {
        use super::Field;

        pub const STOCK: Field = Field::new("stock", 11, 8);
        pub const MARKET_CATEGORY: Field = Field::new("market_category", 19, 1);
        pub const FINANCIAL_STATUS: Field = Field::new("financial_status", 20, 1);
        pub const ROUND_LOT_SIZE: Field = Field::new("round_lot_size", 21, 4);
        pub const ROUND_LOTS_ONLY: Field = Field::new("round_lots_only", 25, 1);
        pub const ISSUE_CLASSIFICATION: Field = Field::new("issue_classification", 26, 1);
        pub const ISSUE_SUBTYPE: Field = Field::new("issue_subtype", 27, 2);
        pub const AUTHENTICITY: Field = Field::new("authenticity", 29, 1);
        pub const SHORT_SALE_THRESHOLD: Field = Field::new("short_sale_threshold", 30, 1);
        pub const IPO_FLAG: Field = Field::new("ipo_flag", 31, 1);
        pub const LULD_TIER: Field = Field::new("luld_reference_price_tier", 32, 1);
        pub const ETP_FLAG: Field = Field::new("etp_flag", 33, 1);
        pub const ETP_LEVERAGE: Field = Field::new("etp_leverage_factor", 34, 4);
        pub const INVERSE: Field = Field::new("inverse_indicator", 38, 1);
    }

    /// Add Order, with and without MPID attribution.
    pub mod add_order {
        use super::Field;

        pub const ORDER_REFERENCE: Field = Field::new("order_reference", 11, 8);
        pub const SIDE: Field = Field::new("side", 19, 1);
        pub const SHARES: Field = Field::new("shares", 20, 4);
        pub const STOCK: Field = Field::new("stock", 24, 8);
        pub const PRICE: Field = Field::new("price", 32, 4);
        /// Add Order (MPID) only.
        pub const ATTRIBUTION: Field = Field::new("attribution", 36, 4);
    }

    /// Order Executed, with and without price.
    pub mod executed {
        use super::Field;

        pub const ORDER_REFERENCE: Field = Field::new("order_reference", 11, 8);
        pub const EXECUTED_SHARES: Field = Field::new("executed_shares", 19, 4);
        pub const MATCH_NUMBER: Field = Field::new("match_number", 23, 8);
        /// Order Executed With Price only.
        pub const PRINTABLE: Field = Field::new("printable", 31, 1);
        /// Order Executed With Price only.
        pub const EXECUTION_PRICE: Field = Field::new("execution_price", 32, 4);
    }

    pub mod cancel {
        use super::Field;

        pub const ORDER_REFERENCE: Field = Field::new("order_reference", 11, 8);
        pub const CANCELED_SHARES: Field = Field::new("canceled_shares", 19, 4);
    }

    pub mod delete {
        use super::Field;

        pub const ORDER_REFERENCE: Field = Field::new("order_reference", 11, 8);
    }

    pub mod replace {
        use super::Field;

        pub const ORIGINAL_REFERENCE: Field = Field::new("original_order_reference", 11, 8);
        pub const NEW_REFERENCE: Field = Field::new("new_order_reference", 19, 8);
        pub const SHARES: Field = Field::new("shares", 27, 4);
        pub const PRICE: Field = Field::new("price", 31, 4);
    }

    pub mod trade {
        use super::Field;

        pub const ORDER_REFERENCE: Field = Field::new("order_reference", 11, 8);
        pub const SIDE: Field = Field::new("side", 19, 1);
        pub const SHARES: Field = Field::new("shares", 20, 4);
        pub const STOCK: Field = Field::new("stock", 24, 8);
        pub const PRICE: Field = Field::new("price", 32, 4);
        pub const MATCH_NUMBER: Field = Field::new("match_number", 36, 8);
    }

    const STOCK_DIRECTORY_FIELDS: &[Field] = &[
        TAG,
        prefix::STOCK_LOCATE,
        prefix::TRACKING_NUMBER,
        prefix::TIMESTAMP,
        stock_directory::STOCK,
        stock_directory::MARKET_CATEGORY,
        stock_directory::FINANCIAL_STATUS,
        stock_directory::ROUND_LOT_SIZE,
        stock_directory::ROUND_LOTS_ONLY,
        stock_directory::ISSUE_CLASSIFICATION,
        stock_directory::ISSUE_SUBTYPE,
        stock_directory::AUTHENTICITY,
        stock_directory::SHORT_SALE_THRESHOLD,
        stock_directory::IPO_FLAG,
        stock_directory::LULD_TIER,
        stock_directory::ETP_FLAG,
        stock_directory::ETP_LEVERAGE,
        stock_directory::INVERSE,
    ];

    const ADD_ORDER_FIELDS: &[Field] = &[
        TAG,
        prefix::STOCK_LOCATE,
        prefix::TRACKING_NUMBER,
        prefix::TIMESTAMP,
        add_order::ORDER_REFERENCE,
        add_order::SIDE,
        add_order::SHARES,
        add_order::STOCK,
        add_order::PRICE,
    ];

    const ADD_ORDER_MPID_FIELDS: &[Field] = &[
        TAG,
        prefix::STOCK_LOCATE,
        prefix::TRACKING_NUMBER,
        prefix::TIMESTAMP,
        add_order::ORDER_REFERENCE,
        add_order::SIDE,
        add_order::SHARES,
        add_order::STOCK,
        add_order::PRICE,
        add_order::ATTRIBUTION,
    ];

    const EXECUTED_FIELDS: &[Field] = &[
        TAG,
        prefix::STOCK_LOCATE,
        prefix::TRACKING_NUMBER,
        prefix::TIMESTAMP,
        executed::ORDER_REFERENCE,
        executed::EXECUTED_SHARES,
        executed::MATCH_NUMBER,
    ];

    const EXECUTED_WITH_PRICE_FIELDS: &[Field] = &[
        TAG,
        prefix::STOCK_LOCATE,
        prefix::TRACKING_NUMBER,
        prefix::TIMESTAMP,
        executed::ORDER_REFERENCE,
        executed::EXECUTED_SHARES,
        executed::MATCH_NUMBER,
        executed::PRINTABLE,
        executed::EXECUTION_PRICE,
    ];

    const CANCEL_FIELDS: &[Field] = &[
        TAG,
        prefix::STOCK_LOCATE,
        prefix::TRACKING_NUMBER,
        prefix::TIMESTAMP,
        cancel::ORDER_REFERENCE,
        cancel::CANCELED_SHARES,
    ];

    const DELETE_FIELDS: &[Field] = &[
        TAG,
        prefix::STOCK_LOCATE,
        prefix::TRACKING_NUMBER,
        prefix::TIMESTAMP,
        delete::ORDER_REFERENCE,
    ];

    const REPLACE_FIELDS: &[Field] = &[
        TAG,
        prefix::STOCK_LOCATE,
        prefix::TRACKING_NUMBER,
        prefix::TIMESTAMP,
        replace::ORIGINAL_REFERENCE,
        replace::NEW_REFERENCE,
        replace::SHARES,
        replace::PRICE,
    ];

    const TRADE_FIELDS: &[Field] = &[
        TAG,
        prefix::STOCK_LOCATE,
        prefix::TRACKING_NUMBER,
        prefix::TIMESTAMP,
        trade::ORDER_REFERENCE,
        trade::SIDE,
        trade::SHARES,
        trade::STOCK,
        trade::PRICE,
        trade::MATCH_NUMBER,
    ];

    pub const STOCK_DIRECTORY: MessageLayout = MessageLayout {
        protocol: Protocol::MarketData,
        tag: b'R',
        name: "Stock Directory",
        len: 39,
        fields: STOCK_DIRECTORY_FIELDS,
    };

    pub const ADD_ORDER: MessageLayout = MessageLayout {
        protocol: Protocol::MarketData,
        tag: b'A',
        name: "Add Order",
        len: 36,
        fields: ADD_ORDER_FIELDS,
    };

    pub const ADD_ORDER_MPID: MessageLayout = MessageLayout {
        protocol: Protocol::MarketData,
        tag: b'F',
        name: "Add Order (MPID)",
        len: 40,
        fields: ADD_ORDER_MPID_FIELDS,
    };

    pub const ORDER_EXECUTED: MessageLayout = MessageLayout {
        protocol: Protocol::MarketData,
        tag: b'E',
        name: "Order Executed",
        len: 31,
        fields: EXECUTED_FIELDS,
    };

    pub const ORDER_EXECUTED_WITH_PRICE: MessageLayout = MessageLayout {
        protocol: Protocol::MarketData,
        tag: b'C',
        name: "Order Executed With Price",
        len: 36,
        fields: EXECUTED_WITH_PRICE_FIELDS,
    };

    pub const ORDER_CANCEL: MessageLayout = MessageLayout {
        protocol: Protocol::MarketData,
        tag: b'X',
        name: "Order Cancel",
        len: 23,
        fields: CANCEL_FIELDS,
    };

    pub const ORDER_DELETE: MessageLayout = MessageLayout {
        protocol: Protocol::MarketData,
        tag: b'D',
        name: "Order Delete",
        len: 19,
        fields: DELETE_FIELDS,
    };

    pub const ORDER_REPLACE: MessageLayout = MessageLayout {
        protocol: Protocol::MarketData,
        tag: b'U',
        name: "Order Replace",
        len: 35,
        fields: REPLACE_FIELDS,
    };

    pub const TRADE: MessageLayout = MessageLayout {
        protocol: Protocol::MarketData,
        tag: b'P',
        name: "Trade",
        len: 44,
        fields: TRADE_FIELDS,
    };

    pub const ALL: &[MessageLayout] = &[
        STOCK_DIRECTORY,
        ADD_ORDER,
        ADD_ORDER_MPID,
        ORDER_EXECUTED,
        ORDER_EXECUTED_WITH_PRICE,
        ORDER_CANCEL,
        ORDER_DELETE,
        ORDER_REPLACE,
        TRADE,
    ];
}

/// Look up the layout for a tag within a protocol.
pub fn layout_for(protocol: Protocol, tag: u8) -> Option<&'static MessageLayout> {
    let table = match protocol {
        Protocol::OrderEntry => ouch::ALL,
        Protocol::MarketData => itch::ALL,
    };
    table.iter().find(|layout| layout.tag == tag)
}
