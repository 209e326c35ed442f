//! # Enumeration Tables
//!
//! The single authoritative mapping between wire codes and normalized names.
//! Decoding looks codes up by value. The reverse lookups exist only to
//! prove each table is a bijection. Lookups are strict: an absent code is `UnmappedEnumValue`, never a default.

use super::errors::MappingError;

/// One-byte code table.
#[derive(Debug, Clone, Copy)]
pub struct EnumTable {
    pub field: &'static str,
    pub entries: &'static [(u8, &'static str)],
}

impl EnumTable {
    pub fn name_of(&self, code: u8) -> Result<&'static str, MappingError> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| *name)
            .ok_or_else(|| MappingError::UnmappedEnumValue {
                field: self.field,
                code: char::from(code).to_string(),
            })
    }

    #[cfg(test)]
    pub fn code_of(&self, name: &str) -> Option<u8> {
        self.entries
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(code, _)| *code)
    }
}

/// Four-byte code table (time-in-force).
#[derive(Debug, Clone, Copy)]
pub struct WideEnumTable {
    pub field: &'static str,
    pub entries: &'static [(u32, &'static str)],
}

impl WideEnumTable {
    pub fn name_of(&self, code: u32) -> Result<&'static str, MappingError> {
        self.entries
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, name)| *name)
            .ok_or_else(|| MappingError::UnmappedEnumValue {
                field: self.field,
                code: code.to_string(),
            })
    }

    #[cfg(test)]
    pub fn code_of(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(_, n)| *n == name)
            .map(|(code, _)| *code)
    }
}

/// Yes/no flag carried as a one-byte code.
#[derive(Debug, Clone, Copy)]
pub struct FlagTable {
    pub field: &'static str,
    pub yes: u8,
    pub no: u8,
}

impl FlagTable {
    pub fn value_of(&self, code: u8) -> Result<bool, MappingError> {
        match code {
            c if c == self.yes => Ok(true),
            c if c == self.no => Ok(false),
            other => Err(MappingError::UnmappedEnumValue {
                field: self.field,
                code: char::from(other).to_string(),
            }),
        }
    }

    #[cfg(test)]
    pub fn code_of(&self, value: bool) -> u8 {
        if value {
            self.yes
        } else {
            self.no
        }
    }
}

pub const SIDE: EnumTable = EnumTable {
    field: "Side",
    entries: &[
        (b'B', "BUY"),
        (b'S', "SELL"),
        (b'T', "SELL_SHORT"),
        (b'E', "SELL_SHORT_EXEMPT"),
    ],
};

pub const TIME_IN_FORCE: WideEnumTable = WideEnumTable {
    field: "TimeInForce",
    entries: &[(0, "IOC"), (99_998, "DAY"), (99_999, "EXTENDED_HOURS")],
};

pub const DISPLAY_TYPE: EnumTable = EnumTable {
    field: "DisplayType",
    entries: &[
        (b'Y', "DISPLAYED"),
        (b'N', "NON_DISPLAYED"),
        (b'A', "ATTRIBUTABLE"),
        (b'P', "POST_ONLY"),
        (b'L', "POST_ONLY_ATTRIBUTABLE"),
        (b'I', "IMBALANCE_ONLY"),
        (b'M', "MIDPOINT_PEG"),
        (b'W', "MIDPOINT_PEG_POST_ONLY"),
        (b'O', "RETAIL_TYPE_1"),
        (b'T', "RETAIL_TYPE_2"),
        (b'Q', "RETAIL_PRICE_IMPROVEMENT"),
    ],
};

pub const CAPACITY: EnumTable = EnumTable {
    field: "Capacity",
    entries: &[
        (b'A', "AGENCY"),
        (b'P', "PRINCIPAL"),
        (b'R', "RISKLESS_PRINCIPAL"),
        (b'O', "OTHER"),
    ],
};

pub const CROSS_TYPE: EnumTable = EnumTable {
    field: "CrossType",
    entries: &[
        (b'N', "NO_CROSS"),
        (b'O', "OPENING_CROSS"),
        (b'C', "CLOSING_CROSS"),
        (b'H', "HALT_IPO_CROSS"),
        (b'S', "SUPPLEMENTAL_ORDER"),
        (b'R', "RETAIL"),
        (b'E', "EXTENDED_LIFE"),
        (b'A', "AFTER_HOURS_CLOSE"),
    ],
};

pub const LIQUIDITY_FLAG: EnumTable = EnumTable {
    field: "LiquidityFlag",
    entries: &[
        (b'A', "ADDED"),
        (b'R', "REMOVED"),
        (b'O', "OPENING_CROSS"),
        (b'M', "OPENING_CROSS_IMBALANCE"),
        (b'C', "CLOSING_CROSS"),
        (b'L', "CLOSING_CROSS_IMBALANCE"),
        (b'H', "HALT_IPO_CROSS"),
        (b'K', "HALT_CROSS"),
        (b'J', "NON_DISPLAYED_ADDED"),
        (b'W', "ADDED_POST_ONLY"),
    ],
};

pub const CANCEL_REASON: EnumTable = EnumTable {
    field: "CancelReason",
    entries: &[
        (b'U', "USER_REQUESTED"),
        (b'I', "IMMEDIATE_OR_CANCEL"),
        (b'T', "TIMEOUT"),
        (b'S', "SUPERVISORY"),
        (b'D', "REGULATORY_RESTRICTION"),
        (b'Q', "SELF_MATCH_PREVENTION"),
        (b'Z', "SYSTEM_CANCEL"),
        (b'C', "CROSS_CANCELED"),
        (b'K', "MIN_QTY_NOT_MET"),
        (b'H', "HALTED"),
        (b'X', "OPEN_PROTECTION"),
        (b'E', "CLOSED"),
    ],
};

pub const REJECT_REASON: EnumTable = EnumTable {
    field: "RejectReason",
    entries: &[
        (b'T', "TEST_MODE"),
        (b'H', "HALTED"),
        (b'Z', "SHARES_EXCEED_SAFETY_THRESHOLD"),
        (b'S', "INVALID_STOCK"),
        (b'D', "INVALID_DISPLAY_TYPE"),
        (b'C', "EXCHANGE_CLOSED"),
        (b'L', "FIRM_NOT_AUTHORIZED"),
        (b'M', "OUTSIDE_PERMITTED_TIMES"),
        (b'R', "ROUTING_NOT_ALLOWED"),
        (b'X', "INVALID_PRICE"),
        (b'N', "INVALID_MIN_QTY"),
        (b'O', "OTHER"),
        (b'W', "INVALID_MIDPOINT_POST_ONLY_PRICE"),
    ],
};

pub const INTERMARKET_SWEEP: FlagTable = FlagTable {
    field: "ISO",
    yes: b'Y',
    no: b'N',
};

pub const PRINTABLE: FlagTable = FlagTable {
    field: "Printable",
    yes: b'Y',
    no: b'N',
};
