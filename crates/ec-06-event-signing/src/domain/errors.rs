//! # Signing Errors

use shared_crypto::CryptoError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SigningError {
    /// Signature does not verify against `EventHash` under the public key.
    #[error("Invalid signature on event {event_id}")]
    SignatureInvalid { event_id: String },

    /// The key provider could not produce a signature.
    #[error("Key unavailable: {0}")]
    KeyUnavailable(String),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
