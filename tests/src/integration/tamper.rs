//! # Tamper Detection
//!
//! Each test takes the archive of a clean session, edits it the way an
//! insider with write access to storage might, and checks that the verifier
//! names the damage at the right place.

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use ec_08_verification::{EvidencePack, FailureKind, VerificationReport, Verifier};
    use proptest::prelude::*;

    use crate::fixtures::*;

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    fn intact_pack() -> EvidencePack {
        static PACK: OnceLock<EvidencePack> = OnceLock::new();
        PACK.get_or_init(|| run_session_blocking(session_config(), trading_session()).pack)
            .clone()
    }

    fn verify(pack: &EvidencePack) -> VerificationReport {
        Verifier::new().verify(pack)
    }

    fn kinds_at(report: &VerificationReport, index: u64) -> Vec<FailureKind> {
        report
            .failures
            .iter()
            .filter(|failure| failure.index == Some(index))
            .map(|failure| failure.kind)
            .collect()
    }

    fn broken_indices(report: &VerificationReport) -> Vec<u64> {
        report
            .failures_of(FailureKind::ChainBroken)
            .filter_map(|failure| failure.index)
            .collect()
    }

    #[test]
    fn test_intact_archive_is_clean() {
        let pack = intact_pack();
        assert_eq!(pack.len(), 16);
        assert!(verify(&pack).is_success());
    }

    // =========================================================================
    // STRUCTURAL EDITS
    // =========================================================================

    #[test]
    fn test_deleted_entry_breaks_chain_from_the_gap() {
        let mut pack = intact_pack();
        pack.entries.remove(6);
        let report = verify(&pack);

        assert_eq!(broken_indices(&report), (6..15).collect::<Vec<u64>>());
        assert_eq!(report.failed_indices().first(), Some(&6));
        assert!(report.failures_of(FailureKind::SignatureInvalid).next().is_none());
    }

    #[test]
    fn test_truncated_head_untrusts_every_remaining_entry() {
        let mut pack = intact_pack();
        pack.entries.remove(0);
        let report = verify(&pack);

        assert_eq!(broken_indices(&report), (0..15).collect::<Vec<u64>>());
        assert!(kinds_at(&report, 0).contains(&FailureKind::GenesisMismatch));
        assert_eq!(report.failed_indices().first(), Some(&0));
    }

    #[test]
    fn test_reordered_entries() {
        let mut pack = intact_pack();
        pack.entries.swap(8, 9);
        let report = verify(&pack);

        let order: Vec<_> = report
            .failures_of(FailureKind::ReplayMismatch)
            .filter(|failure| failure.index.is_none())
            .collect();
        assert_eq!(order.len(), 1);
        assert!(order[0].detail.contains("sequence"));
        assert_eq!(broken_indices(&report), (8..16).collect::<Vec<u64>>());
        assert_eq!(report.failed_indices().first(), Some(&8));
    }

    #[test]
    fn test_swapped_raw_messages_fail_replay_only() {
        let mut pack = intact_pack();
        let raw = pack.entries[4].raw.clone();
        pack.entries[4].raw = pack.entries[5].raw.clone();
        pack.entries[5].raw = raw;
        let report = verify(&pack);

        assert_eq!(report.failed_indices(), vec![4, 5]);
        assert_eq!(kinds_at(&report, 4), vec![FailureKind::ReplayMismatch]);
        assert_eq!(kinds_at(&report, 5), vec![FailureKind::ReplayMismatch]);
        assert_eq!(report.failures.len(), 2);
    }

    #[test]
    fn test_appended_copy_is_caught() {
        let mut pack = intact_pack();
        let mut copy = pack.entries[15].clone();
        copy.sequence = 99;
        pack.entries.push(copy);
        let report = verify(&pack);

        assert_eq!(report.failed_indices(), vec![16]);
        let kinds = kinds_at(&report, 16);
        assert!(kinds.contains(&FailureKind::ChainBroken));
        assert!(kinds.contains(&FailureKind::MissingFromBatch));
    }

    #[test]
    fn test_flipped_leaf_hash_is_malformed_tree() {
        let mut pack = intact_pack();
        pack.batches[2].leaves[3].leaf_hash[0] ^= 0x80;
        let report = verify(&pack);

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].kind, FailureKind::MalformedTree);
        assert!(report.failures[0].index.is_none());
        assert!(report.failures[0].detail.contains("BATCH-000002"));
    }

    // =========================================================================
    // FIELD EDITS
    // =========================================================================

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_altered_event_breaks_chain_to_the_end(index in 0usize..16, volume: u32) {
            let mut pack = intact_pack();
            let trade = &mut pack.entries[index].event.sealed.draft.trade;
            prop_assume!(trade.volume != Some(volume));
            trade.volume = Some(volume);

            let report = verify(&pack);
            let index = index as u64;

            prop_assert_eq!(broken_indices(&report), (index..16).collect::<Vec<u64>>());
            let failed = report.failed_indices();
            prop_assert_eq!(failed.first(), Some(&index));
            prop_assert_eq!(
                kinds_at(&report, index),
                vec![
                    FailureKind::ReplayMismatch,
                    FailureKind::ChainBroken,
                    FailureKind::ProofMismatch,
                ]
            );
            prop_assert!(report.failures_of(FailureKind::SignatureInvalid).next().is_none());
        }
    }
}
