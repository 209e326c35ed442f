//! # Outbound Ports
//!
//! A closed batch root is handed to an external timestamp authority. The
//! returned token is opaque here: it is stored alongside the batch and never
//! validated by this core.

use serde::{Deserialize, Serialize};
use shared_types::{hex_serde, Hash};

use crate::domain::{Batch, MerkleError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnchorReceipt {
    #[serde(rename = "BatchID")]
    pub batch_id: String,
    #[serde(rename = "MerkleRoot", with = "hex_serde")]
    pub merkle_root: Hash,
    /// Authority-specific token, e.g. an RFC 3161 response.
    #[serde(rename = "Token", with = "hex_serde::vec")]
    pub token: Vec<u8>,
}

pub trait TimestampAnchor: Send + Sync {
    /// Submit `batch.merkle_root`. Failures surface as
    /// [`MerkleError::AnchorFailed`].
    fn anchor(&self, batch: &Batch) -> Result<AnchorReceipt, MerkleError>;
}
