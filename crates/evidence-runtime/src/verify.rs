//! Verification with metrics: runs the verifier and counts failures by kind.

use ec_08_verification::{EvidencePack, VerificationReport, Verifier};
use evidence_telemetry::{log_event, VERIFICATION_FAILURES};

pub fn verify_pack(verifier: &Verifier, pack: &EvidencePack) -> VerificationReport {
    let report = verifier.verify(pack);
    for (kind, count) in report.failure_counts() {
        VERIFICATION_FAILURES
            .with_label_values(&[kind.as_str()])
            .inc_by(count as u64);
    }
    log_event!(
        debug,
        "verifier",
        "verification metrics recorded",
        checks = report.checks_total,
        failures = report.failures.len()
    );
    report
}
