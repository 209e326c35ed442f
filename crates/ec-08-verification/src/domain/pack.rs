//! # Evidence Pack
//!
//! Everything an independent verifier needs for one session: the session's
//! mapping context, the signer's public key, the archived entries in chain
//! order and the closed batches.

use ec_03_field_mapping::MappingContext;
use ec_07_merkle_batching::Batch;
use shared_crypto::Ed25519PublicKey;
use shared_types::{ConformanceTier, EvidenceEntry, PublicKeyBytes, SealedEvent};

use super::errors::PackError;

#[derive(Debug, Clone)]
pub struct EvidencePack {
    pub context: MappingContext,
    pub public_key: PublicKeyBytes,
    /// Chain order; entry `i` holds chain index `i`.
    pub entries: Vec<EvidenceEntry>,
    pub batches: Vec<Batch>,
}

impl EvidencePack {
    pub fn new(context: MappingContext, public_key: PublicKeyBytes) -> Self {
        Self {
            context,
            public_key,
            entries: Vec::new(),
            batches: Vec::new(),
        }
    }

    pub fn with_entries(mut self, entries: Vec<EvidenceEntry>) -> Self {
        self.entries = entries;
        self
    }

    pub fn with_batches(mut self, batches: Vec<Batch>) -> Self {
        self.batches = batches;
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Tier the session claims in its policy section.
    pub fn tier(&self) -> ConformanceTier {
        self.context.policy.conformance_tier
    }

    pub fn public_key(&self) -> Result<Ed25519PublicKey, PackError> {
        Ok(Ed25519PublicKey::from_bytes(self.public_key)?)
    }

    pub fn sealed_events(&self) -> Vec<SealedEvent> {
        self.entries
            .iter()
            .map(|entry| entry.event.sealed.clone())
            .collect()
    }

    /// Arrival sequences must strictly increase along the chain.
    pub fn check_sequence(&self) -> Result<(), PackError> {
        for (index, pair) in self.entries.windows(2).enumerate() {
            if pair[1].sequence <= pair[0].sequence {
                return Err(PackError::SequenceOutOfOrder {
                    index: index + 1,
                    sequence: pair[1].sequence,
                    previous: pair[0].sequence,
                });
            }
        }
        Ok(())
    }

    /// Batches claiming each chain index. Claims past the end of the chain
    /// are dropped here; the batch check reports them.
    pub fn coverage(&self) -> Vec<Vec<&Batch>> {
        let mut coverage: Vec<Vec<&Batch>> = vec![Vec::new(); self.entries.len()];
        for batch in &self.batches {
            for index in batch.index_range() {
                if let Some(slot) = usize::try_from(index)
                    .ok()
                    .and_then(|index| coverage.get_mut(index))
                {
                    slot.push(batch);
                }
            }
        }
        coverage
    }
}
