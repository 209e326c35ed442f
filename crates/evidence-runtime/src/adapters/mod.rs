//! # Adapter Implementations
//!
//! In-process implementations of the outbound ports, used by tests and by
//! single-process deployments.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Adapters: InMemoryEvidenceSink, RecordingAnchor,            │
//! │            StaticClockSource                                 │
//! │                    ↑ implements ↑                            │
//! │  Ports: EvidenceSink, ClockSyncSource, TimestampAnchor       │
//! │                    ↑ used by ↑                               │
//! │  Pipeline: ingestion coordinator, chain stage                │
//! └──────────────────────────────────────────────────────────────┘
//! ```

pub mod anchor;
pub mod clock;
pub mod memory;

pub use anchor::RecordingAnchor;
pub use clock::StaticClockSource;
pub use memory::InMemoryEvidenceSink;
