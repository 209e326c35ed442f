//! # Evidence Telemetry
//!
//! Logging and metrics for the evidence-chain engine.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use evidence_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let _guard = init_telemetry(TelemetryConfig::from_env())?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `EC_SERVICE_NAME` | `evidence-chain` | Service name in logs |
//! | `EC_LOG_LEVEL` / `RUST_LOG` | `info` | Log filter |
//! | `EC_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `EC_JSON_LOGS` | `false` | JSON lines (default `true` in containers) |

mod config;
mod logging;
pub mod metrics;

pub use config::{parse_flag, TelemetryConfig};
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, MetricsHandle, BATCHES_CLOSED, CHAIN_LENGTH,
    EVENTS_SEALED, MESSAGES_INGESTED, MESSAGES_REJECTED, RECONCILIATION_GAPS,
    VERIFICATION_FAILURES,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics and install logging.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first: they do not depend on the subscriber.
    let metrics = register_metrics()?;
    init_logging(&config)?;

    Ok(TelemetryGuard {
        config,
        _metrics: metrics,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    config: TelemetryConfig,
    _metrics: MetricsHandle,
}

impl TelemetryGuard {
    pub fn config(&self) -> &TelemetryConfig {
        &self.config
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(service = %self.config.service_name, "shutting down telemetry");
    }
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
