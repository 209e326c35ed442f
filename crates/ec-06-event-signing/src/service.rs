//! # Event Signer
//!
//! Turns sealed events into signed events through a [`KeyProvider`].

use shared_crypto::Ed25519PublicKey;
use shared_types::{hash_to_hex, SealedEvent, SignedEvent};
use tracing::{debug, warn};

use crate::domain::SigningError;
use crate::ports::KeyProvider;

pub struct EventSigner<K: KeyProvider> {
    keys: K,
}

impl<K: KeyProvider> EventSigner<K> {
    pub fn new(keys: K) -> Self {
        Self { keys }
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keys.public_key()
    }

    pub fn key_provider(&self) -> &K {
        &self.keys
    }

    /// Sign the sealed event's `EventHash`.
    pub fn sign(&self, sealed: SealedEvent) -> Result<SignedEvent, SigningError> {
        let signature = self.keys.sign(&sealed.event_hash).map_err(|err| {
            warn!(event_id = %sealed.event_id(), error = %err, "signing failed");
            err
        })?;
        debug!(
            event_id = %sealed.event_id(),
            event_hash = %hash_to_hex(&sealed.event_hash),
            "signed event"
        );
        Ok(SignedEvent {
            sealed,
            signature: signature.to_bytes(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::LocalKeyProvider;
    use crate::domain::verify_event_signature;
    use shared_crypto::Ed25519Signature;
    use shared_types::test_utils::make_test_draft;

    fn sealed(event_hash: [u8; 32]) -> SealedEvent {
        SealedEvent {
            draft: make_test_draft(0),
            prev_hash: [0u8; 32],
            event_hash,
        }
    }

    /// RFC 8032 test 1 secret key.
    fn rfc8032_provider() -> LocalKeyProvider {
        let mut seed = [0u8; 32];
        hex::decode_to_slice(
            "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
            &mut seed,
        )
        .unwrap();
        LocalKeyProvider::from_seed(seed)
    }

    #[test]
    fn test_signs_event_hash_not_payload() {
        let signer = EventSigner::new(rfc8032_provider());
        let signed = signer.sign(sealed([0x42; 32])).unwrap();

        let expected = signer.key_provider().sign(&[0x42; 32]).unwrap();
        assert_eq!(signed.signature, expected.to_bytes());
        assert!(verify_event_signature(&signed, &signer.public_key()).is_ok());
        assert_eq!(
            hex::encode(signer.public_key().as_bytes()),
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
        );
    }

    #[test]
    fn test_tampered_hash_fails_verification() {
        let signer = EventSigner::new(LocalKeyProvider::from_seed([8u8; 32]));
        let mut signed = signer.sign(sealed([1u8; 32])).unwrap();
        signed.sealed.event_hash[31] ^= 1;
        assert_eq!(
            verify_event_signature(&signed, &signer.public_key()),
            Err(SigningError::SignatureInvalid {
                event_id: signed.event_id().to_string()
            })
        );
    }

    struct OfflineProvider(Ed25519PublicKey);

    impl KeyProvider for OfflineProvider {
        fn public_key(&self) -> Ed25519PublicKey {
            self.0
        }

        fn sign(&self, _message: &[u8]) -> Result<Ed25519Signature, SigningError> {
            Err(SigningError::KeyUnavailable("hsm offline".into()))
        }
    }

    #[test]
    fn test_provider_failure_propagates() {
        let public = LocalKeyProvider::from_seed([1u8; 32]).public_key();
        let signer = EventSigner::new(OfflineProvider(public));
        assert_eq!(
            signer.sign(sealed([0u8; 32])),
            Err(SigningError::KeyUnavailable("hsm offline".into()))
        );
    }
}
