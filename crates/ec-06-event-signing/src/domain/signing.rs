//! # Event Hash Signatures

use shared_crypto::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};
use shared_types::{Hash, SignatureBytes, SignedEvent};

use super::errors::SigningError;

pub fn sign_event_hash(event_hash: &Hash, keypair: &Ed25519KeyPair) -> SignatureBytes {
    keypair.sign(event_hash).to_bytes()
}

/// `true` iff `signature` is a valid strict Ed25519 signature over `event_hash`.
pub fn verify_event_hash(
    event_hash: &Hash,
    signature: &SignatureBytes,
    public_key: &Ed25519PublicKey,
) -> bool {
    public_key
        .verify(event_hash, &Ed25519Signature::from_bytes(*signature))
        .is_ok()
}

/// Check a signed event's signature against its stored `EventHash`.
///
/// Whether that hash matches the draft is the hash chain's concern.
pub fn verify_event_signature(
    event: &SignedEvent,
    public_key: &Ed25519PublicKey,
) -> Result<(), SigningError> {
    if verify_event_hash(event.event_hash(), &event.signature, public_key) {
        Ok(())
    } else {
        Err(SigningError::SignatureInvalid {
            event_id: event.event_id().to_string(),
        })
    }
}
