//! # Decode Errors
//!
//! Per-message failures. A failing message is dropped from the stream;
//! ingestion of the remaining messages continues.

use shared_types::Protocol;
use thiserror::Error;

/// Errors raised while decoding a raw message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// First byte is not a known message type for the protocol.
    #[error("Unknown {protocol} message type: 0x{tag:02x}")]
    UnknownMessageType { protocol: Protocol, tag: u8 },

    /// Buffer shorter than the message type's fixed length.
    #[error("Truncated message: expected at least {expected} bytes, got {actual}")]
    TruncatedMessage { expected: usize, actual: usize },

    /// A text field contains bytes outside printable ASCII.
    #[error("Invalid text in field {field} at offset {offset}")]
    InvalidText { field: &'static str, offset: usize },
}

/// Errors raised while re-encoding a decoded record.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// Text longer than its fixed-width field.
    #[error("Field {field} holds at most {max} bytes, got {actual}")]
    FieldTooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    /// Text contains non-ASCII characters.
    #[error("Field {field} must be ASCII")]
    NonAsciiText { field: &'static str },
}
