//! # Chain Stage
//!
//! The single writer. Every draft is sealed onto the hash chain, signed,
//! persisted and handed to the batcher here, one at a time and in arrival
//! order. Batches only ever contain events that completed all four steps.
//!
//! [`ChainWriter`] is synchronous; [`run_chain_stage`] drives it from a
//! bounded queue and fires the age trigger from an interval.

use std::sync::Arc;
use std::time::{Duration, Instant};

use ec_05_hash_chain::HashChain;
use ec_06_event_signing::{EventSigner, KeyProvider};
use ec_07_merkle_batching::{Batch, BatchPolicy, CloseReason, MerkleBatcher, TimestampAnchor};
use evidence_telemetry::{
    log_batch_event, log_chain_event, BATCHES_CLOSED, CHAIN_LENGTH, EVENTS_SEALED,
};
use shared_types::{hash_to_hex, EvidenceEntry, Hash};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{error, warn};

use crate::errors::PipelineError;
use crate::ingest::ChainInput;
use crate::ports::EvidenceSink;
use crate::session::SessionStats;

pub struct ChainWriter<K: KeyProvider> {
    chain: HashChain,
    signer: EventSigner<K>,
    batcher: MerkleBatcher,
    sink: Arc<dyn EvidenceSink>,
    anchor: Option<Arc<dyn TimestampAnchor>>,
    stats: SessionStats,
}

impl<K: KeyProvider> ChainWriter<K> {
    pub fn new(
        signer: EventSigner<K>,
        policy: BatchPolicy,
        sink: Arc<dyn EvidenceSink>,
        anchor: Option<Arc<dyn TimestampAnchor>>,
        stats: SessionStats,
    ) -> Self {
        Self {
            chain: HashChain::new(),
            signer,
            batcher: MerkleBatcher::new(policy),
            sink,
            anchor,
            stats,
        }
    }

    pub fn head(&self) -> &Hash {
        self.chain.head()
    }

    pub fn len(&self) -> u64 {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// Seal, sign and persist one draft, then offer it to the batcher.
    ///
    /// An error leaves the chain unusable; the session must stop.
    pub fn append(&mut self, input: ChainInput, now: Instant) -> Result<(), PipelineError> {
        let index = self.chain.len();
        let sealed = self.chain.append(input.draft)?;
        let entry = EvidenceEntry {
            sequence: input.sequence,
            raw: input.raw,
            event: self.signer.sign(sealed)?,
        };
        self.sink.persist_event(&entry)?;

        EVENTS_SEALED.inc();
        CHAIN_LENGTH.set(self.chain.len() as i64);
        self.stats.record_sealed(self.chain.head());
        log_chain_event!(
            debug,
            "event sealed",
            index,
            entry.event.event_id(),
            hash_to_hex(entry.event.event_hash()),
            sequence = entry.sequence
        );

        if let Some(batch) = self.batcher.push(entry.event, now)? {
            self.close(batch, CloseReason::Count)?;
        }
        Ok(())
    }

    /// Close the pending batch if it has aged out.
    pub fn poll(&mut self, now: Instant) -> Result<(), PipelineError> {
        if let Some(batch) = self.batcher.poll(now)? {
            self.close(batch, CloseReason::Age)?;
        }
        Ok(())
    }

    /// Close whatever is pending.
    pub fn flush(&mut self) -> Result<(), PipelineError> {
        if let Some(batch) = self.batcher.flush()? {
            self.close(batch, CloseReason::Flush)?;
        }
        Ok(())
    }

    fn close(&mut self, batch: Batch, reason: CloseReason) -> Result<(), PipelineError> {
        // Anchoring is best effort.
        let receipt = match &self.anchor {
            Some(anchor) => match anchor.anchor(&batch) {
                Ok(receipt) => Some(receipt),
                Err(err) => {
                    warn!(batch_id = %batch.batch_id, error = %err, "anchoring failed");
                    self.stats.update(|summary| summary.anchor_failures += 1);
                    None
                }
            },
            None => None,
        };
        self.sink.persist_batch(&batch, receipt.as_ref())?;

        BATCHES_CLOSED.with_label_values(&[reason.as_str()]).inc();
        self.stats.update(|summary| summary.batches_closed += 1);
        log_batch_event!(
            debug,
            "batch persisted",
            batch.batch_id,
            hash_to_hex(&batch.merkle_root),
            events = batch.len(),
            anchored = receipt.is_some()
        );
        Ok(())
    }
}

/// How often the age trigger is checked for a given policy.
pub fn poll_period(policy: &BatchPolicy) -> Duration {
    (policy.max_age / 4).max(Duration::from_millis(1))
}

/// Drain `inputs` into `writer` until every sender is dropped, then flush.
///
/// Returns at the first failure; dropping the receiver then makes further
/// sends fail, which is how upstream learns the stage has stopped.
pub async fn run_chain_stage<K: KeyProvider>(
    mut writer: ChainWriter<K>,
    mut inputs: mpsc::Receiver<ChainInput>,
    poll_every: Duration,
) -> Result<(), PipelineError> {
    let mut ticker = tokio::time::interval(poll_every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let result = async {
        loop {
            tokio::select! {
                input = inputs.recv() => match input {
                    Some(input) => writer.append(input, Instant::now())?,
                    None => break,
                },
                _ = ticker.tick() => writer.poll(Instant::now())?,
            }
        }
        writer.flush()
    }
    .await;

    if let Err(err) = &result {
        error!(
            component = "chain",
            chain_length = writer.len(),
            error = %err,
            "chain stage stopped"
        );
    }
    result
}
