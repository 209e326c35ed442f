//! # Evidence Runtime
//!
//! Runs one evidence session: raw OUCH/ITCH messages in, a signed hash chain
//! with Merkle-batched proofs out.
//!
//! ## Architecture
//!
//! - **Ingestion** (`ingest.rs`): [`IngestionCoordinator`] numbers messages
//!   in arrival order, decodes chunks in parallel and maps them per symbol
//!   partition
//! - **Chain stage** (`chain_stage.rs`): [`ChainWriter`] is the single
//!   writer that seals, signs, persists and batches
//! - **Pipeline** (`pipeline.rs`): [`Pipeline`] wires both halves around a
//!   bounded queue; [`PipelineHandle`] feeds it
//! - **Ports** (`ports.rs`) and **Adapters** (`adapters/`): sink, clock,
//!   anchor
//!
//! ## Ordering
//!
//! | Stage | Concurrency |
//! |-------|-------------|
//! | Decode | parallel per message |
//! | Mapping | parallel across partitions, ordered within one |
//! | Seal / sign / persist | one at a time, chain order |
//! | Batch close | between appends only |
//!
//! ## Configuration
//!
//! [`RuntimeConfig::from_env`] reads the `EC_*` variables; see [`config`].

pub mod adapters;
pub mod chain_stage;
pub mod config;
pub mod errors;
pub mod ingest;
pub mod pipeline;
pub mod ports;
pub mod session;
pub mod verify;

#[cfg(test)]
mod test_support;

pub use adapters::{InMemoryEvidenceSink, RecordingAnchor, StaticClockSource};
pub use chain_stage::{run_chain_stage, ChainWriter};
pub use config::RuntimeConfig;
pub use errors::{ConfigError, IngestError, PipelineError, SinkError};
pub use ingest::{ChainInput, IngestOutcome, IngestionCoordinator, Rejection};
pub use pipeline::{Pipeline, PipelineHandle};
pub use ports::{ClockSyncSource, EvidenceSink};
pub use session::{SessionStats, SessionSummary};
pub use verify::verify_pack;
