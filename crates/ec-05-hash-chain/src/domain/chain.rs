//! # Hash Chain
//!
//! Sealing and the single-writer chain head.

use ec_04_canonicalization::canonicalize_draft;
use shared_crypto::Sha256Hasher;
use shared_types::{hash_to_hex, EventDraft, Hash, SealedEvent, GENESIS_HASH};
use tracing::debug;

use super::errors::ChainError;

/// `SHA256(canonical || prev_hash)`.
pub fn compute_event_hash(canonical: &[u8], prev_hash: &Hash) -> Hash {
    let mut hasher = Sha256Hasher::new();
    hasher.update(canonical).update(prev_hash);
    hasher.finalize()
}

/// Link `draft` after `prev_hash`.
pub fn seal(draft: EventDraft, prev_hash: Hash) -> Result<SealedEvent, ChainError> {
    let canonical = canonicalize_draft(&draft)?;
    let event_hash = compute_event_hash(&canonical, &prev_hash);
    Ok(SealedEvent {
        draft,
        prev_hash,
        event_hash,
    })
}

/// Recompute the hash a sealed event should carry, from its draft and its
/// stated `PrevHash`.
pub fn recompute_event_hash(sealed: &SealedEvent) -> Result<Hash, ChainError> {
    let canonical = canonicalize_draft(&sealed.draft)?;
    Ok(compute_event_hash(&canonical, &sealed.prev_hash))
}

/// Head of an append-only chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashChain {
    head: Hash,
    len: u64,
}

impl Default for HashChain {
    fn default() -> Self {
        Self::new()
    }
}

impl HashChain {
    /// Empty chain anchored at the genesis value.
    pub fn new() -> Self {
        Self {
            head: GENESIS_HASH,
            len: 0,
        }
    }

    /// Continue a chain whose last `EventHash` is `head`.
    pub fn resume(head: Hash, len: u64) -> Self {
        Self { head, len }
    }

    /// `EventHash` of the last appended event, or genesis.
    pub fn head(&self) -> &Hash {
        &self.head
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Seal `draft` onto the head. On error the head is unchanged.
    pub fn append(&mut self, draft: EventDraft) -> Result<SealedEvent, ChainError> {
        let sealed = seal(draft, self.head)?;
        self.head = sealed.event_hash;
        self.len += 1;
        debug!(
            index = self.len - 1,
            event_id = %sealed.event_id(),
            event_hash = %hash_to_hex(&sealed.event_hash),
            "sealed event"
        );
        Ok(sealed)
    }
}

/// Check the chain, stopping at the first failure.
///
/// Genesis is checked before any hash is recomputed.
pub fn verify_chain(events: &[SealedEvent]) -> Result<(), ChainError> {
    let mut expected_prev = GENESIS_HASH;
    for (index, event) in events.iter().enumerate() {
        if event.prev_hash != expected_prev {
            return Err(if index == 0 {
                ChainError::GenesisMismatch
            } else {
                ChainError::ChainBroken { index }
            });
        }
        if recompute_event_hash(event)? != event.event_hash {
            return Err(ChainError::ChainBroken { index });
        }
        expected_prev = event.event_hash;
    }
    Ok(())
}
