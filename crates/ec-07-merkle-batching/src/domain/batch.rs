//! # Batches
//!
//! A closed, ordered run of signed events with its Merkle root and one
//! inclusion proof per leaf. The leaf input is the canonical sealed event
//! document (draft plus `PrevHash`/`EventHash`, no signature).

use ec_04_canonicalization::canonicalize_sealed;
use serde::{Deserialize, Serialize};
use shared_types::{hex_serde, Hash, SealedEvent, SignedEvent};

use super::errors::MerkleError;
use super::tree::{leaf_hash, InclusionProof, MerkleTree};

/// Leaf hash of a sealed event.
pub fn sealed_leaf_hash(sealed: &SealedEvent) -> Result<Hash, MerkleError> {
    Ok(leaf_hash(&canonicalize_sealed(sealed)?))
}

pub fn batch_id(sequence: u64) -> String {
    format!("BATCH-{:06}", sequence)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchLeaf {
    #[serde(rename = "EventID")]
    pub event_id: String,
    #[serde(rename = "EventHash", with = "hex_serde")]
    pub event_hash: Hash,
    #[serde(rename = "LeafHash", with = "hex_serde")]
    pub leaf_hash: Hash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    #[serde(rename = "BatchID")]
    pub batch_id: String,
    #[serde(rename = "BatchSequence")]
    pub sequence: u64,
    /// Chain index of the first leaf.
    #[serde(rename = "FirstIndex")]
    pub first_index: u64,
    #[serde(rename = "MerkleRoot", with = "hex_serde")]
    pub merkle_root: Hash,
    #[serde(rename = "Leaves")]
    pub leaves: Vec<BatchLeaf>,
    #[serde(rename = "Proofs")]
    pub proofs: Vec<InclusionProof>,
}

impl Batch {
    /// Build a batch over `events`, which must be consecutive chain entries
    /// starting at `first_index`.
    pub fn build(
        sequence: u64,
        first_index: u64,
        events: &[SignedEvent],
    ) -> Result<Self, MerkleError> {
        if events.is_empty() {
            return Err(MerkleError::EmptyBatch);
        }

        let leaves = events
            .iter()
            .map(|event| {
                Ok(BatchLeaf {
                    event_id: event.event_id().to_string(),
                    event_hash: *event.event_hash(),
                    leaf_hash: sealed_leaf_hash(&event.sealed)?,
                })
            })
            .collect::<Result<Vec<_>, MerkleError>>()?;

        let tree = MerkleTree::from_leaf_hashes(leaves.iter().map(|leaf| leaf.leaf_hash).collect());
        let proofs = (0..tree.len())
            .map(|index| tree.prove_inclusion(index))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            batch_id: batch_id(sequence),
            sequence,
            first_index,
            merkle_root: tree.root(),
            leaves,
            proofs,
        })
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Chain indices covered, as a half-open range.
    pub fn index_range(&self) -> std::ops::Range<u64> {
        self.first_index..self.first_index + self.leaves.len() as u64
    }

    pub fn position_of(&self, event_id: &str) -> Option<usize> {
        self.leaves.iter().position(|leaf| leaf.event_id == event_id)
    }

    pub fn proof_for(&self, event_id: &str) -> Option<&InclusionProof> {
        self.position_of(event_id)
            .and_then(|position| self.proofs.get(position))
    }

    pub fn event_hashes(&self) -> Vec<Hash> {
        self.leaves.iter().map(|leaf| leaf.event_hash).collect()
    }

    /// Root recomputed from the stored leaf hashes.
    pub fn recompute_root(&self) -> Hash {
        MerkleTree::from_leaf_hashes(self.leaves.iter().map(|leaf| leaf.leaf_hash).collect()).root()
    }

    /// Check the batch against itself: one proof per leaf, proofs addressed
    /// to their own position and tree size, and the stored root recomputable
    /// from the stored leaves.
    pub fn check_consistency(&self) -> Result<(), MerkleError> {
        if self.leaves.is_empty() {
            return Err(MerkleError::MalformedTree {
                detail: format!("{} has no leaves", self.batch_id),
            });
        }
        if self.proofs.len() != self.leaves.len() {
            return Err(MerkleError::MalformedTree {
                detail: format!(
                    "{} has {} leaves but {} proofs",
                    self.batch_id,
                    self.leaves.len(),
                    self.proofs.len()
                ),
            });
        }
        let size = self.leaves.len() as u64;
        if let Some((position, proof)) = self
            .proofs
            .iter()
            .enumerate()
            .find(|(position, proof)| proof.leaf_index != *position as u64 || proof.tree_size != size)
        {
            return Err(MerkleError::MalformedTree {
                detail: format!(
                    "{} proof {} addresses leaf {} of {}",
                    self.batch_id, position, proof.leaf_index, proof.tree_size
                ),
            });
        }
        if self.recompute_root() != self.merkle_root {
            return Err(MerkleError::MalformedTree {
                detail: format!("{} root does not match its leaves", self.batch_id),
            });
        }
        Ok(())
    }
}
