//! # Decoding Service
//!
//! Batch entry point. Decoding is pure over immutable input, so independent
//! messages are decoded in parallel; output order matches input order.

use rayon::prelude::*;
use shared_types::RawMessage;
use tracing::{debug, warn};

use crate::domain::{decode, DecodeError, DecodedRecord};

/// Decode one raw message using its protocol tag.
pub fn decode_message(raw: &RawMessage) -> Result<DecodedRecord, DecodeError> {
    let result = decode(&raw.bytes, raw.protocol);
    match &result {
        Ok(record) => debug!(
            protocol = %raw.protocol,
            message_type = %char::from(record.message_type()),
            len = raw.len(),
            "decoded message"
        ),
        Err(err) => warn!(protocol = %raw.protocol, len = raw.len(), error = %err, "decode failed"),
    }
    result
}

/// Decode a slice of messages in parallel, one result per input.
///
/// A failing message yields its own `Err`; the rest are unaffected.
pub fn decode_all(messages: &[RawMessage]) -> Vec<Result<DecodedRecord, DecodeError>> {
    messages.par_iter().map(decode_message).collect()
}
