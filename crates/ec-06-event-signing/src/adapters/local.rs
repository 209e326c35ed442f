//! In-memory key provider.

use shared_crypto::{Ed25519KeyPair, Ed25519PublicKey, Ed25519Signature};

use crate::domain::SigningError;
use crate::ports::KeyProvider;

/// Holds an Ed25519 key pair in process memory. The key pair wipes its
/// seed when dropped; the caller's copy of a seed passed to `from_seed` is
/// its own to clear.
#[derive(Debug)]
pub struct LocalKeyProvider {
    keypair: Ed25519KeyPair,
}

impl LocalKeyProvider {
    pub fn new(keypair: Ed25519KeyPair) -> Self {
        Self { keypair }
    }

    pub fn from_seed(seed: [u8; 32]) -> Self {
        Self::new(Ed25519KeyPair::from_seed(seed))
    }

    /// Fresh random key, for sessions that publish their public key.
    pub fn generate() -> Self {
        Self::new(Ed25519KeyPair::generate())
    }
}

impl KeyProvider for LocalKeyProvider {
    fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    fn sign(&self, message: &[u8]) -> Result<Ed25519Signature, SigningError> {
        Ok(self.keypair.sign(message))
    }
}
