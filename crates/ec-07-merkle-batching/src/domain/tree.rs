//! # Merkle Tree (RFC 6962)
//!
//! - Leaf: `SHA256(0x00 || data)`
//! - Node: `SHA256(0x01 || left || right)`
//! - Empty tree: `SHA256("")`
//!
//! Built bottom-up, pairing nodes left to right. An unpaired last node is
//! promoted unchanged to the next level, never duplicated. This yields the
//! same tree as RFC 6962's recursive split at the largest power of two, so
//! proofs verify with the standard RFC 9162 §2.1.3.2 algorithm.

use serde::{Deserialize, Serialize};
use shared_crypto::{sha256, Sha256Hasher};
use shared_types::{hex_serde, Hash};

use super::errors::MerkleError;

pub const LEAF_PREFIX: u8 = 0x00;
pub const NODE_PREFIX: u8 = 0x01;

pub fn leaf_hash(data: &[u8]) -> Hash {
    let mut hasher = Sha256Hasher::new();
    hasher.update(&[LEAF_PREFIX]).update(data);
    hasher.finalize()
}

pub fn node_hash(left: &Hash, right: &Hash) -> Hash {
    let mut hasher = Sha256Hasher::new();
    hasher.update(&[NODE_PREFIX]).update(left).update(right);
    hasher.finalize()
}

/// Root of a tree with no leaves.
pub fn empty_root() -> Hash {
    sha256(b"")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    /// `levels[0]` holds leaf hashes; the last level holds the root alone.
    levels: Vec<Vec<Hash>>,
}

impl MerkleTree {
    /// Build from raw leaf inputs (hashed with the leaf prefix).
    pub fn from_leaves<T: AsRef<[u8]>>(leaves: &[T]) -> Self {
        Self::from_leaf_hashes(leaves.iter().map(|leaf| leaf_hash(leaf.as_ref())).collect())
    }

    /// Build from already-prefixed leaf hashes.
    pub fn from_leaf_hashes(leaf_hashes: Vec<Hash>) -> Self {
        let mut levels = vec![leaf_hashes];
        while let Some(level) = levels.last().filter(|level| level.len() > 1) {
            let next: Vec<Hash> = level
                .chunks(2)
                .map(|pair| match pair {
                    [left, right] => node_hash(left, right),
                    _ => pair[0],
                })
                .collect();
            levels.push(next);
        }
        Self { levels }
    }

    pub fn root(&self) -> Hash {
        match self.levels.last().and_then(|level| level.first()) {
            Some(root) => *root,
            None => empty_root(),
        }
    }

    pub fn len(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn leaf(&self, index: usize) -> Option<&Hash> {
        self.levels.first().and_then(|leaves| leaves.get(index))
    }

    /// Sibling path from leaf `index` to the root, bottom-up.
    ///
    /// Levels where the node was promoted contribute no sibling.
    pub fn prove_inclusion(&self, index: usize) -> Result<InclusionProof, MerkleError> {
        let size = self.len();
        if index >= size {
            return Err(MerkleError::LeafIndexOutOfRange {
                index: index as u64,
                size: size as u64,
            });
        }

        let mut siblings = Vec::new();
        let mut position = index;
        for level in &self.levels[..self.levels.len() - 1] {
            if let Some(sibling) = level.get(position ^ 1) {
                siblings.push(*sibling);
            }
            position /= 2;
        }

        Ok(InclusionProof {
            leaf_index: index as u64,
            tree_size: size as u64,
            siblings,
        })
    }
}

/// Membership proof for one leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionProof {
    #[serde(rename = "LeafIndex")]
    pub leaf_index: u64,
    #[serde(rename = "TreeSize")]
    pub tree_size: u64,
    /// Sibling hashes, leaf level first.
    #[serde(rename = "Siblings", with = "hex_serde::list")]
    pub siblings: Vec<Hash>,
}

/// Recompute the root from raw leaf data and compare.
pub fn verify_inclusion(leaf_data: &[u8], proof: &InclusionProof, root: &Hash) -> bool {
    verify_inclusion_hash(&leaf_hash(leaf_data), proof, root)
}

/// Recompute the root from a leaf hash and compare.
pub fn verify_inclusion_hash(leaf: &Hash, proof: &InclusionProof, root: &Hash) -> bool {
    if proof.leaf_index >= proof.tree_size {
        return false;
    }

    let mut index = proof.leaf_index;
    let mut last = proof.tree_size - 1;
    let mut current = *leaf;

    for sibling in &proof.siblings {
        if last == 0 {
            return false;
        }
        if index & 1 == 1 || index == last {
            current = node_hash(sibling, &current);
            // Skip levels where this node was promoted.
            if index & 1 == 0 {
                while index & 1 == 0 && index != 0 {
                    index >>= 1;
                    last >>= 1;
                }
            }
        } else {
            current = node_hash(&current, sibling);
        }
        index >>= 1;
        last >>= 1;
    }

    last == 0 && current == *root
}
