//! Session counters shared by the ingestion side and the chain stage.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;
use shared_types::{hash_to_hex, Hash, GENESIS_HASH};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub messages_received: u64,
    pub decode_rejected: u64,
    pub mapping_rejected: u64,
    pub reconciliation_gaps: u64,
    pub events_sealed: u64,
    pub batches_closed: u64,
    pub anchor_failures: u64,
    /// Hex `EventHash` of the last sealed event, genesis when empty.
    pub chain_head: String,
}

impl Default for SessionSummary {
    fn default() -> Self {
        Self {
            messages_received: 0,
            decode_rejected: 0,
            mapping_rejected: 0,
            reconciliation_gaps: 0,
            events_sealed: 0,
            batches_closed: 0,
            anchor_failures: 0,
            chain_head: hash_to_hex(&GENESIS_HASH),
        }
    }
}

impl SessionSummary {
    pub fn rejected(&self) -> u64 {
        self.decode_rejected + self.mapping_rejected
    }
}

/// Cheap-to-clone handle on the live counters.
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    inner: Arc<Mutex<SessionSummary>>,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SessionSummary {
        self.inner.lock().clone()
    }

    pub(crate) fn update<F: FnOnce(&mut SessionSummary)>(&self, f: F) {
        f(&mut self.inner.lock());
    }

    pub(crate) fn record_sealed(&self, head: &Hash) {
        self.update(|summary| {
            summary.events_sealed += 1;
            summary.chain_head = hash_to_hex(head);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_counters() {
        let stats = SessionStats::new();
        let other = stats.clone();
        other.update(|s| s.decode_rejected += 2);
        stats.update(|s| s.mapping_rejected += 1);
        other.record_sealed(&[0xab; 32]);

        let summary = stats.snapshot();
        assert_eq!(summary.rejected(), 3);
        assert_eq!(summary.events_sealed, 1);
        assert!(summary.chain_head.starts_with("abab"));
    }

    #[test]
    fn test_empty_session_head_is_genesis() {
        assert_eq!(SessionSummary::default().chain_head, "0".repeat(64));
    }
}
