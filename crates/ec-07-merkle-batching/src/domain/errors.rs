//! # Merkle Errors

use ec_04_canonicalization::CanonicalizationError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MerkleError {
    /// Proof does not recompute to the batch root.
    #[error("Inclusion proof for leaf {leaf_index} does not match root")]
    ProofMismatch { leaf_index: u64 },

    /// Stored batch contents are inconsistent with themselves.
    #[error("Malformed tree: {detail}")]
    MalformedTree { detail: String },

    #[error("Leaf index {index} out of range for tree of size {size}")]
    LeafIndexOutOfRange { index: u64, size: u64 },

    #[error("Cannot close an empty batch")]
    EmptyBatch,

    #[error("Anchor rejected batch {batch_id}: {reason}")]
    AnchorFailed { batch_id: String, reason: String },

    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),
}
