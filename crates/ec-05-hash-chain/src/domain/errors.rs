//! # Chain Errors

use ec_04_canonicalization::CanonicalizationError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainError {
    /// Stored hash or link does not match recomputation at `index`.
    #[error("Chain broken at index {index}")]
    ChainBroken { index: usize },

    /// First event does not descend from the all-zero genesis value.
    #[error("First event's PrevHash is not the genesis value")]
    GenesisMismatch,

    #[error(transparent)]
    Canonicalization(#[from] CanonicalizationError),
}
