//! # Runtime Errors

use ec_01_protocol_decoding::DecodeError;
use ec_03_field_mapping::MappingError;
use ec_05_hash_chain::ChainError;
use ec_06_event_signing::SigningError;
use ec_07_merkle_batching::MerkleError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value {value:?} for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

impl ConfigError {
    pub(crate) fn invalid(key: &'static str, value: &str, reason: impl std::fmt::Display) -> Self {
        ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Why one raw message produced no event. The session continues.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum IngestError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

impl IngestError {
    /// `stage` label for the rejection counter.
    pub fn stage(&self) -> &'static str {
        match self {
            IngestError::Decode(_) => "decode",
            IngestError::Mapping(_) => "mapping",
        }
    }

    /// `reason` label for the rejection counter.
    pub fn reason(&self) -> &'static str {
        match self {
            IngestError::Decode(DecodeError::UnknownMessageType { .. }) => "unknown_type",
            IngestError::Decode(DecodeError::TruncatedMessage { .. }) => "truncated",
            IngestError::Decode(DecodeError::InvalidText { .. }) => "invalid_text",
            IngestError::Mapping(MappingError::UnmappedEnumValue { .. }) => "unmapped_enum",
            IngestError::Mapping(MappingError::TimestampOutOfRange { .. }) => "timestamp_range",
            IngestError::Mapping(MappingError::MissingTimestamp { .. }) => "missing_timestamp",
            IngestError::Mapping(MappingError::PriceOutOfRange { .. }) => "price_range",
        }
    }
}

/// Failures that stop the session. Events sealed before the failure stay
/// sealed; the chain's last persisted event is its terminal state.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Signing(#[from] SigningError),

    #[error(transparent)]
    Merkle(#[from] MerkleError),

    #[error("Evidence sink failed: {0}")]
    Sink(#[from] SinkError),

    /// The chain stage has stopped; nothing more can be appended.
    #[error("Chain stage closed")]
    ChainStageClosed,

    #[error("Chain stage task failed: {0}")]
    ChainStageFailed(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SinkError {
    #[error("Failed to persist {what}: {reason}")]
    Write { what: String, reason: String },
}
