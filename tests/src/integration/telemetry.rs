//! # Telemetry
//!
//! A session run with telemetry installed shows up in the Prometheus text
//! exposition.

#[cfg(test)]
mod tests {
    use evidence_telemetry::{encode_metrics, init_telemetry, TelemetryConfig, TelemetryError};

    use crate::fixtures::*;

    #[tokio::test]
    async fn test_session_counters_are_exported() {
        let config = TelemetryConfig {
            console_output: false,
            ..TelemetryConfig::for_component("ec-tests")
        };
        // Another test binary may already own the global subscriber.
        let _guard = match init_telemetry(config) {
            Ok(guard) => Some(guard),
            Err(TelemetryError::SubscriberInit(_)) => None,
            Err(e) => panic!("telemetry failed: {e}"),
        };

        run_session(session_config(), trading_session()).await;

        let exposition = encode_metrics().unwrap();
        for name in [
            "ec_messages_ingested_total",
            "ec_events_sealed_total",
            "ec_chain_length",
            "ec_batches_closed_total",
        ] {
            assert!(exposition.contains(name), "{name} missing:\n{exposition}");
        }
    }
}
