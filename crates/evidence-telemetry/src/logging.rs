//! Structured logging.
//!
//! Installs the global `tracing` subscriber and provides macros that keep
//! field names identical across crates:
//! - `component`: pipeline stage (ingest, chain, batcher, verifier)
//! - `sequence` / `chain_index`: position of the message or event
//! - `event_id`, `event_hash`, `batch_id`, `merkle_root`

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::Config(e.to_string()))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = match (config.console_output, config.json_logs) {
        // JSON output for containers/production
        (true, true) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        // Pretty output for development
        (true, false) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .try_init(),
        (false, _) => registry.try_init(),
    };
    result.map_err(|e| TelemetryError::SubscriberInit(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "logging initialized"
    );
    Ok(())
}

/// Helper to create structured log entries with consistent formatting.
#[macro_export]
macro_rules! log_event {
    (info, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::info!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (warn, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::warn!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (error, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::error!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };

    (debug, $component:expr, $msg:expr $(, $($field:tt)*)?) => {
        tracing::debug!(
            component = $component,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a chain event with standard fields.
#[macro_export]
macro_rules! log_chain_event {
    ($level:ident, $msg:expr, $chain_index:expr, $event_id:expr, $event_hash:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = "chain",
            chain_index = $chain_index,
            event_id = %$event_id,
            event_hash = %$event_hash,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a batch event with standard fields.
#[macro_export]
macro_rules! log_batch_event {
    ($level:ident, $msg:expr, $batch_id:expr, $merkle_root:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = "batcher",
            batch_id = %$batch_id,
            merkle_root = %$merkle_root,
            $($($field)*,)?
            $msg
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_bad_filter() {
        let config = TelemetryConfig {
            log_level: "evidence=loud".to_string(),
            ..TelemetryConfig::default()
        };
        assert!(matches!(
            init_logging(&config),
            Err(TelemetryError::Config(_))
        ));
    }

    #[test]
    fn test_macros_expand() {
        log_event!(info, "ingest", "chunk accepted", messages = 3);
        log_event!(debug, "ingest", "no fields");
        log_chain_event!(debug, "event sealed", 7u64, "id-7", "abcd", gap = false);
        log_batch_event!(info, "batch closed", "BATCH-000000", "ffee", events = 3);
    }
}
