//! Timestamp anchor that records every submitted root.
//!
//! The token is `SHA256(batch_id ‖ merkle_root)`: opaque, deterministic and
//! enough to tell receipts apart. A real deployment talks to an RFC 3161
//! authority instead.

use ec_07_merkle_batching::{AnchorReceipt, Batch, MerkleError, TimestampAnchor};
use parking_lot::Mutex;
use shared_crypto::sha256_many;

#[derive(Debug, Default)]
pub struct RecordingAnchor {
    receipts: Mutex<Vec<AnchorReceipt>>,
    /// Refuse every submission, to exercise the failure path.
    reject: bool,
}

impl RecordingAnchor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting() -> Self {
        Self {
            receipts: Mutex::default(),
            reject: true,
        }
    }

    pub fn receipts(&self) -> Vec<AnchorReceipt> {
        self.receipts.lock().clone()
    }
}

impl TimestampAnchor for RecordingAnchor {
    fn anchor(&self, batch: &Batch) -> Result<AnchorReceipt, MerkleError> {
        if self.reject {
            return Err(MerkleError::AnchorFailed {
                batch_id: batch.batch_id.clone(),
                reason: "authority unavailable".to_string(),
            });
        }
        let receipt = AnchorReceipt {
            batch_id: batch.batch_id.clone(),
            merkle_root: batch.merkle_root,
            token: sha256_many(&[batch.batch_id.as_bytes(), &batch.merkle_root]).to_vec(),
        };
        self.receipts.lock().push(receipt.clone());
        Ok(receipt)
    }
}
