//! # Verification Errors
//!
//! Verification itself never returns an error: every failed check becomes a
//! [`VerificationFailure`](super::report::VerificationFailure). These errors
//! only describe a pack that cannot be read as evidence at all.

use shared_crypto::CryptoError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PackError {
    /// The pack's public key is not a valid Ed25519 point.
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(#[from] CryptoError),

    /// Entries must be stored in strictly increasing arrival order.
    #[error("Entry {index} has sequence {sequence}, not after {previous}")]
    SequenceOutOfOrder {
        index: usize,
        sequence: u64,
        previous: u64,
    },
}
