//! Prometheus metrics for the evidence-chain engine.
//!
//! All metrics follow the naming convention: `ec_<what>_<unit>`

use lazy_static::lazy_static;
use prometheus::{Encoder, IntCounter, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // INGESTION METRICS
    // =========================================================================

    /// Raw messages accepted into the pipeline
    pub static ref MESSAGES_INGESTED: IntCounter = IntCounter::new(
        "ec_messages_ingested_total",
        "Total raw messages accepted for ingestion"
    ).expect("metric creation failed");

    /// Messages dropped before becoming events
    pub static ref MESSAGES_REJECTED: IntCounterVec = IntCounterVec::new(
        Opts::new("ec_messages_rejected_total", "Messages dropped by decode or mapping"),
        &["stage", "reason"]  // stage: decode/mapping
    ).expect("metric creation failed");

    /// Events emitted with a reconciliation-gap marker
    pub static ref RECONCILIATION_GAPS: IntCounterVec = IntCounterVec::new(
        Opts::new("ec_reconciliation_gaps_total", "Events carrying a reconciliation gap"),
        &["kind"]
    ).expect("metric creation failed");

    // =========================================================================
    // CHAIN METRICS
    // =========================================================================

    /// Events sealed and signed by the chain writer
    pub static ref EVENTS_SEALED: IntCounter = IntCounter::new(
        "ec_events_sealed_total",
        "Total events sealed into the hash chain"
    ).expect("metric creation failed");

    /// Current chain length
    pub static ref CHAIN_LENGTH: IntGauge = IntGauge::new(
        "ec_chain_length",
        "Number of events in the hash chain"
    ).expect("metric creation failed");

    /// Merkle batches closed
    pub static ref BATCHES_CLOSED: IntCounterVec = IntCounterVec::new(
        Opts::new("ec_batches_closed_total", "Merkle batches closed"),
        &["reason"]  // reason: count/age/flush
    ).expect("metric creation failed");

    // =========================================================================
    // VERIFICATION METRICS
    // =========================================================================

    /// Verification failures by kind
    pub static ref VERIFICATION_FAILURES: IntCounterVec = IntCounterVec::new(
        Opts::new("ec_verification_failures_total", "Failed verification checks"),
        &["kind"]
    ).expect("metric creation failed");
}

/// Handle proving the metrics are registered.
#[derive(Debug, Clone, Copy)]
pub struct MetricsHandle {
    _private: (),
}

/// Register all metrics with the global registry. Safe to call repeatedly.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Ingestion
        Box::new(MESSAGES_INGESTED.clone()),
        Box::new(MESSAGES_REJECTED.clone()),
        Box::new(RECONCILIATION_GAPS.clone()),
        // Chain
        Box::new(EVENTS_SEALED.clone()),
        Box::new(CHAIN_LENGTH.clone()),
        Box::new(BATCHES_CLOSED.clone()),
        // Verification
        Box::new(VERIFICATION_FAILURES.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle { _private: () })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}
