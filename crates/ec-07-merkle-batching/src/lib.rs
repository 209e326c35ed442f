//! # Merkle Batching Subsystem (ec-07)
//!
//! Groups signed events into batches and commits each batch to an
//! RFC 6962 Merkle root with one inclusion proof per event.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): tree, proofs, batches, batching policy
//! - **Ports Layer** (`ports/`): [`TimestampAnchor`] for external anchoring
//!
//! ## Tree Rules
//!
//! | Item | Hash |
//! |------|------|
//! | Leaf | `SHA256(0x00 ‖ canonical sealed event)` |
//! | Node | `SHA256(0x01 ‖ left ‖ right)` |
//! | Empty | `SHA256("")` |
//! | Odd node | promoted unchanged |

pub mod domain;
pub mod ports;

pub use domain::{
    batch_id, empty_root, leaf_hash, node_hash, sealed_leaf_hash, verify_inclusion,
    verify_inclusion_hash, Batch, BatchLeaf, BatchPolicy, CloseReason, InclusionProof,
    MerkleBatcher, MerkleError, MerkleTree, DEFAULT_BATCH_MAX_AGE, DEFAULT_BATCH_MAX_EVENTS,
};
pub use ports::{AnchorReceipt, TimestampAnchor};
