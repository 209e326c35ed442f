//! # Merkle Batcher
//!
//! Accumulates signed events in chain order and closes a batch when either
//! the count or the age threshold is reached. Time never comes from here:
//! the caller passes `now`, so the trigger source stays external.
//!
//! Only fully sealed and signed events are ever pushed, so a batch boundary
//! can never split an in-flight append.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use shared_types::{hash_to_hex, SignedEvent};
use tracing::info;

use super::batch::Batch;
use super::errors::MerkleError;

pub const DEFAULT_BATCH_MAX_EVENTS: usize = 1000;
pub const DEFAULT_BATCH_MAX_AGE: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchPolicy {
    /// Close once this many events are pending.
    pub max_events: usize,
    /// Close once the oldest pending event has waited this long.
    pub max_age: Duration,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self {
            max_events: DEFAULT_BATCH_MAX_EVENTS,
            max_age: DEFAULT_BATCH_MAX_AGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Count,
    Age,
    Flush,
}

impl CloseReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            CloseReason::Count => "count",
            CloseReason::Age => "age",
            CloseReason::Flush => "flush",
        }
    }
}

#[derive(Debug)]
pub struct MerkleBatcher {
    policy: BatchPolicy,
    pending: Vec<SignedEvent>,
    opened_at: Option<Instant>,
    next_sequence: u64,
    next_index: u64,
}

impl MerkleBatcher {
    pub fn new(policy: BatchPolicy) -> Self {
        Self::resume(policy, 0, 0)
    }

    /// Continue numbering after `next_sequence` batches covering
    /// `next_index` chain entries.
    pub fn resume(policy: BatchPolicy, next_sequence: u64, next_index: u64) -> Self {
        Self {
            policy,
            pending: Vec::with_capacity(policy.max_events.min(4096)),
            opened_at: None,
            next_sequence,
            next_index,
        }
    }

    pub fn policy(&self) -> &BatchPolicy {
        &self.policy
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// When the pending batch will hit its age threshold.
    pub fn deadline(&self) -> Option<Instant> {
        self.opened_at.map(|opened| opened + self.policy.max_age)
    }

    /// Add the next event in chain order; closes on the count threshold.
    pub fn push(&mut self, event: SignedEvent, now: Instant) -> Result<Option<Batch>, MerkleError> {
        self.opened_at.get_or_insert(now);
        self.pending.push(event);
        if self.pending.len() >= self.policy.max_events {
            return self.close(CloseReason::Count).map(Some);
        }
        Ok(None)
    }

    /// Close on the age threshold if it has passed.
    pub fn poll(&mut self, now: Instant) -> Result<Option<Batch>, MerkleError> {
        match self.deadline() {
            Some(deadline) if now >= deadline && !self.pending.is_empty() => {
                self.close(CloseReason::Age).map(Some)
            }
            _ => Ok(None),
        }
    }

    /// Close whatever is pending, regardless of thresholds.
    pub fn flush(&mut self) -> Result<Option<Batch>, MerkleError> {
        if self.pending.is_empty() {
            return Ok(None);
        }
        self.close(CloseReason::Flush).map(Some)
    }

    /// On error the pending events are kept.
    fn close(&mut self, reason: CloseReason) -> Result<Batch, MerkleError> {
        let batch = Batch::build(self.next_sequence, self.next_index, &self.pending)?;
        self.pending.clear();
        self.opened_at = None;
        self.next_sequence += 1;
        self.next_index += batch.len() as u64;

        info!(
            batch_id = %batch.batch_id,
            events = batch.len(),
            first_index = batch.first_index,
            merkle_root = %hash_to_hex(&batch.merkle_root),
            reason = reason.as_str(),
            "batch closed"
        );
        Ok(batch)
    }
}
