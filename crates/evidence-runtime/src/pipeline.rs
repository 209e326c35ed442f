//! # Session Pipeline
//!
//! ```text
//! submit(raw) ──► IngestionCoordinator ──► bounded mpsc ──► chain stage ──► EvidenceSink
//!                 (rayon decode,            (backpressure)   (seal, sign,     TimestampAnchor
//!                  partitioned mapping)                        batch)
//! ```
//!
//! `submit` awaits queue capacity, so a slow chain writer slows ingestion
//! rather than growing memory. `finish` closes the queue, waits for the
//! stage to drain and flush, and returns the session summary.

use std::sync::Arc;

use ec_03_field_mapping::MappingContext;
use ec_06_event_signing::{EventSigner, KeyProvider};
use ec_07_merkle_batching::TimestampAnchor;
use shared_types::{PublicKeyBytes, RawMessage};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

use crate::adapters::StaticClockSource;
use crate::chain_stage::{poll_period, run_chain_stage, ChainWriter};
use crate::config::RuntimeConfig;
use crate::errors::PipelineError;
use crate::ingest::{ChainInput, IngestionCoordinator, Rejection};
use crate::ports::{ClockSyncSource, EvidenceSink};
use crate::session::{SessionStats, SessionSummary};

/// Collaborators for one session, assembled before [`Pipeline::start`].
pub struct Pipeline<K: KeyProvider> {
    config: RuntimeConfig,
    keys: K,
    sink: Arc<dyn EvidenceSink>,
    anchor: Option<Arc<dyn TimestampAnchor>>,
    clock: Arc<dyn ClockSyncSource>,
}

impl<K: KeyProvider + 'static> Pipeline<K> {
    pub fn new(config: RuntimeConfig, keys: K, sink: Arc<dyn EvidenceSink>) -> Self {
        Self {
            config,
            keys,
            sink,
            anchor: None,
            clock: Arc::new(StaticClockSource::default()),
        }
    }

    pub fn with_anchor(mut self, anchor: Arc<dyn TimestampAnchor>) -> Self {
        self.anchor = Some(anchor);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn ClockSyncSource>) -> Self {
        self.clock = clock;
        self
    }

    /// Validate the configuration and spawn the chain stage. Must be called
    /// from within a tokio runtime.
    pub fn start(self) -> Result<PipelineHandle, PipelineError> {
        self.config.validate()?;

        let stats = SessionStats::new();
        let context = self.config.mapping_context();
        let signer = EventSigner::new(self.keys);
        let public_key = *signer.public_key().as_bytes();

        let writer = ChainWriter::new(
            signer,
            self.config.batch,
            self.sink,
            self.anchor,
            stats.clone(),
        );
        let (sender, receiver) = mpsc::channel(self.config.queue_capacity);
        let stage = tokio::spawn(run_chain_stage(
            writer,
            receiver,
            poll_period(&self.config.batch),
        ));

        info!(
            session_id = %self.config.session_id,
            trading_date = %self.config.trading_date,
            tier = self.config.conformance_tier.as_str(),
            queue_capacity = self.config.queue_capacity,
            "session started"
        );

        Ok(PipelineHandle {
            ingest: IngestionCoordinator::new(
                context.clone(),
                self.clock,
                self.config.chunk_size,
                stats.clone(),
            ),
            sender,
            stage,
            stats,
            context,
            public_key,
        })
    }
}

/// Live session. Dropping it without [`finish`](Self::finish) detaches the
/// chain stage: queued drafts are still sealed, but failures go unreported.
pub struct PipelineHandle {
    ingest: IngestionCoordinator,
    sender: mpsc::Sender<ChainInput>,
    stage: JoinHandle<Result<(), PipelineError>>,
    stats: SessionStats,
    context: MappingContext,
    public_key: PublicKeyBytes,
}

impl PipelineHandle {
    /// Ingest `messages` in arrival order and queue the resulting drafts.
    ///
    /// Returns the messages that produced no event. Fails only when the
    /// chain stage has stopped; [`finish`](Self::finish) reports why.
    pub async fn submit(
        &mut self,
        messages: Vec<RawMessage>,
    ) -> Result<Vec<Rejection>, PipelineError> {
        let outcome = self.ingest.ingest(messages);
        for input in outcome.accepted {
            self.sender
                .send(input)
                .await
                .map_err(|_| PipelineError::ChainStageClosed)?;
        }
        Ok(outcome.rejected)
    }

    pub fn summary(&self) -> SessionSummary {
        self.stats.snapshot()
    }

    pub fn context(&self) -> &MappingContext {
        &self.context
    }

    pub fn public_key(&self) -> PublicKeyBytes {
        self.public_key
    }

    /// Close the queue, let the chain stage drain and flush, and return the
    /// final counters.
    pub async fn finish(self) -> Result<SessionSummary, PipelineError> {
        let PipelineHandle {
            sender,
            stage,
            stats,
            context,
            ..
        } = self;
        drop(sender);

        stage
            .await
            .map_err(|e| PipelineError::ChainStageFailed(e.to_string()))??;

        let summary = stats.snapshot();
        info!(
            session_id = %context.session_id,
            messages = summary.messages_received,
            rejected = summary.rejected(),
            events = summary.events_sealed,
            batches = summary.batches_closed,
            chain_head = %summary.chain_head,
            "session finished"
        );
        Ok(summary)
    }
}
