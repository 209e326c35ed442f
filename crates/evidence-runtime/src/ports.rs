//! # Outbound Ports
//!
//! Collaborators the pipeline calls synchronously. Durable storage and the
//! capture clock live behind these traits; the core does no I/O itself.

use ec_07_merkle_batching::{AnchorReceipt, Batch};
use shared_types::{ClockSyncStatus, EvidenceEntry};

use crate::errors::SinkError;

/// Destination for sealed evidence. Called only from the chain stage, in
/// chain order.
pub trait EvidenceSink: Send + Sync {
    fn persist_event(&self, entry: &EvidenceEntry) -> Result<(), SinkError>;

    /// `receipt` is `None` when anchoring failed or no anchor is wired.
    fn persist_batch(&self, batch: &Batch, receipt: Option<&AnchorReceipt>)
        -> Result<(), SinkError>;
}

/// Clock-discipline state of the capture host, sampled per ingested chunk.
pub trait ClockSyncSource: Send + Sync {
    fn status(&self) -> ClockSyncStatus;
}
