//! # Ingestion Coordinator
//!
//! Upstream half of the pipeline. Each chunk of raw messages is numbered in
//! arrival order, decoded in parallel, then mapped by symbol partition so
//! that side-table transitions for one symbol stay in order while other
//! symbols proceed concurrently.
//!
//! Rejected messages consume a sequence number but produce no event and
//! leave the side tables untouched.

use std::sync::Arc;

use ec_01_protocol_decoding::decode_all;
use ec_03_field_mapping::{Arrival, FieldMapper, MappingContext, PartitionedMapper};
use evidence_telemetry::{log_event, MESSAGES_INGESTED, MESSAGES_REJECTED, RECONCILIATION_GAPS};
use shared_types::{EventDraft, RawMessage};
use tracing::warn;

use crate::errors::IngestError;
use crate::ports::ClockSyncSource;
use crate::session::SessionStats;

/// A mapped draft waiting for the chain stage.
#[derive(Debug, Clone)]
pub struct ChainInput {
    pub sequence: u64,
    pub raw: RawMessage,
    pub draft: EventDraft,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub sequence: u64,
    pub error: IngestError,
}

#[derive(Debug, Default)]
pub struct IngestOutcome {
    /// Ascending by sequence.
    pub accepted: Vec<ChainInput>,
    /// Ascending by sequence.
    pub rejected: Vec<Rejection>,
}

pub struct IngestionCoordinator {
    mapper: PartitionedMapper,
    clock: Arc<dyn ClockSyncSource>,
    chunk_size: usize,
    next_sequence: u64,
    stats: SessionStats,
}

impl IngestionCoordinator {
    pub fn new(
        context: MappingContext,
        clock: Arc<dyn ClockSyncSource>,
        chunk_size: usize,
        stats: SessionStats,
    ) -> Self {
        Self {
            mapper: PartitionedMapper::new(FieldMapper::new(context)),
            clock,
            chunk_size: chunk_size.max(1),
            next_sequence: 0,
            stats,
        }
    }

    /// Sequence the next message will get.
    pub fn next_sequence(&self) -> u64 {
        self.next_sequence
    }

    pub fn partition_count(&self) -> usize {
        self.mapper.partition_count()
    }

    pub fn ingest(&mut self, messages: Vec<RawMessage>) -> IngestOutcome {
        let mut outcome = IngestOutcome::default();
        for chunk in messages.chunks(self.chunk_size) {
            self.ingest_chunk(chunk, &mut outcome);
        }
        outcome
    }

    fn ingest_chunk(&mut self, chunk: &[RawMessage], outcome: &mut IngestOutcome) {
        let first = self.next_sequence;
        self.next_sequence += chunk.len() as u64;
        // One sample per chunk; the clock state changes far slower than this.
        let clock_sync = self.clock.status();
        MESSAGES_INGESTED.inc_by(chunk.len() as u64);

        let mut rejected = Vec::new();
        let mut records = Vec::with_capacity(chunk.len());
        for (offset, result) in decode_all(chunk).into_iter().enumerate() {
            let sequence = first + offset as u64;
            match result {
                Ok(record) => {
                    let arrival = Arrival::new(sequence)
                        .with_received_ns(chunk[offset].received_ns)
                        .with_clock_sync(clock_sync);
                    records.push((arrival, record));
                }
                Err(err) => rejected.push(Rejection {
                    sequence,
                    error: err.into(),
                }),
            }
        }

        let mut accepted = 0usize;
        let mut gaps = 0u64;
        for mapped in self.mapper.map_chunk(records) {
            let sequence = mapped.arrival.sequence;
            match mapped.result {
                Ok(draft) => {
                    if let Some(gap) = &draft.reconciliation {
                        RECONCILIATION_GAPS.with_label_values(&[gap.kind.as_str()]).inc();
                        gaps += 1;
                    }
                    accepted += 1;
                    outcome.accepted.push(ChainInput {
                        sequence,
                        raw: chunk[(sequence - first) as usize].clone(),
                        draft,
                    });
                }
                Err(err) => rejected.push(Rejection {
                    sequence,
                    error: err.into(),
                }),
            }
        }

        rejected.sort_by_key(|rejection| rejection.sequence);
        let (mut decode_rejected, mut mapping_rejected) = (0u64, 0u64);
        for rejection in &rejected {
            warn!(
                sequence = rejection.sequence,
                stage = rejection.error.stage(),
                error = %rejection.error,
                "message rejected"
            );
            MESSAGES_REJECTED
                .with_label_values(&[rejection.error.stage(), rejection.error.reason()])
                .inc();
            match rejection.error {
                IngestError::Decode(_) => decode_rejected += 1,
                IngestError::Mapping(_) => mapping_rejected += 1,
            }
        }

        self.stats.update(|summary| {
            summary.messages_received += chunk.len() as u64;
            summary.decode_rejected += decode_rejected;
            summary.mapping_rejected += mapping_rejected;
            summary.reconciliation_gaps += gaps;
        });
        log_event!(
            debug,
            "ingest",
            "chunk ingested",
            first_sequence = first,
            messages = chunk.len(),
            accepted = accepted,
            rejected = rejected.len()
        );
        outcome.rejected.extend(rejected);
    }
}
