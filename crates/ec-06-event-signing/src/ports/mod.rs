//! # Outbound Ports
//!
//! The key provider is external: it may be an in-memory key, an HSM or a
//! remote signing service. Calls are synchronous and narrow.

use shared_crypto::{Ed25519PublicKey, Ed25519Signature};

use crate::domain::SigningError;

pub trait KeyProvider: Send + Sync {
    /// Public half of the signing key.
    fn public_key(&self) -> Ed25519PublicKey;

    /// Sign `message` (always a 32-byte event hash here).
    fn sign(&self, message: &[u8]) -> Result<Ed25519Signature, SigningError>;
}
