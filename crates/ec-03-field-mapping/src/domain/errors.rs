//! # Mapping Errors
//!
//! Per-message failures: the message is dropped, side tables are left
//! untouched, and the stream continues.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum MappingError {
    /// Code absent from the authoritative enumeration table.
    #[error("Unmapped {field} value {code:?}")]
    UnmappedEnumValue { field: &'static str, code: String },

    /// Nanoseconds-since-midnight at or beyond 24h, or outside the epoch range.
    #[error("Timestamp out of range: {nanos} ns since midnight")]
    TimestampOutOfRange { nanos: u64 },

    /// Message carries no exchange timestamp and no capture time was supplied.
    #[error("No timestamp for message type {message_type}")]
    MissingTimestamp { message_type: char },

    /// Price cannot be represented as a 32-bit fixed-point value.
    #[error("Price {price} not representable with four implied decimals")]
    PriceOutOfRange { price: f64 },
}
