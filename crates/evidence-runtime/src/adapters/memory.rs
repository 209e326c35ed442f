//! In-memory evidence archive.
//!
//! Holds everything the chain stage persisted and can hand it back as an
//! [`EvidencePack`] for verification.

use ec_03_field_mapping::MappingContext;
use ec_07_merkle_batching::{AnchorReceipt, Batch};
use ec_08_verification::EvidencePack;
use parking_lot::RwLock;
use shared_types::{EvidenceEntry, PublicKeyBytes};

use crate::errors::SinkError;
use crate::ports::EvidenceSink;

#[derive(Debug, Default)]
pub struct InMemoryEvidenceSink {
    entries: RwLock<Vec<EvidenceEntry>>,
    batches: RwLock<Vec<(Batch, Option<AnchorReceipt>)>>,
    /// Refuse events once this many are stored.
    capacity: Option<usize>,
}

impl InMemoryEvidenceSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sink that fails after storing `capacity` events.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::default()
        }
    }

    pub fn entries(&self) -> Vec<EvidenceEntry> {
        self.entries.read().clone()
    }

    pub fn batches(&self) -> Vec<Batch> {
        self.batches
            .read()
            .iter()
            .map(|(batch, _)| batch.clone())
            .collect()
    }

    pub fn receipts(&self) -> Vec<AnchorReceipt> {
        self.batches
            .read()
            .iter()
            .filter_map(|(_, receipt)| receipt.clone())
            .collect()
    }

    pub fn event_count(&self) -> usize {
        self.entries.read().len()
    }

    /// Snapshot of the archive for the given session.
    pub fn to_pack(&self, context: MappingContext, public_key: PublicKeyBytes) -> EvidencePack {
        EvidencePack::new(context, public_key)
            .with_entries(self.entries())
            .with_batches(self.batches())
    }
}

impl EvidenceSink for InMemoryEvidenceSink {
    fn persist_event(&self, entry: &EvidenceEntry) -> Result<(), SinkError> {
        let mut entries = self.entries.write();
        if self.capacity.is_some_and(|capacity| entries.len() >= capacity) {
            return Err(SinkError::Write {
                what: format!("event {}", entry.event.event_id()),
                reason: "archive full".to_string(),
            });
        }
        entries.push(entry.clone());
        Ok(())
    }

    fn persist_batch(
        &self,
        batch: &Batch,
        receipt: Option<&AnchorReceipt>,
    ) -> Result<(), SinkError> {
        self.batches.write().push((batch.clone(), receipt.cloned()));
        Ok(())
    }
}
