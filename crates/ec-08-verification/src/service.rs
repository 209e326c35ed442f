//! # Verifier
//!
//! Re-derives and checks every invariant of an evidence pack and folds each
//! outcome into one [`VerificationReport`].
//!
//! ## Checks
//!
//! | Check | Count | Failure kind |
//! |-------|-------|--------------|
//! | Arrival order | 1 | `REPLAY_MISMATCH` |
//! | Replay decode → map | per event | `DECODE_ERROR`, `MAPPING_ERROR`, `REPLAY_MISMATCH` |
//! | Canonicalization | per event | `CANONICALIZATION_FAILURE` |
//! | Genesis | 1 if non-empty | `GENESIS_MISMATCH` |
//! | Chain link and hash | per event | `CHAIN_BROKEN` |
//! | Signature | per event | `SIGNATURE_INVALID` |
//! | Batch consistency | per batch | `MALFORMED_TREE` |
//! | Inclusion | per event | `PROOF_MISMATCH`, `MISSING_FROM_BATCH`, `MALFORMED_TREE` |
//! | Tier requirements | 1 if Platinum | `TIER_REQUIREMENT` |
//!
//! Per-event checks that need no shared state run on rayon. The chain walk
//! is a single sequential pass.

use std::collections::HashMap;

use ec_01_protocol_decoding::decode_message;
use ec_03_field_mapping::{Arrival, FieldMapper, PartitionedMapper};
use ec_04_canonicalization::{canonicalize_draft, canonicalize_sealed};
use ec_05_hash_chain::{audit_chain, BreakCause};
use ec_06_event_signing::verify_event_signature;
use ec_07_merkle_batching::{verify_inclusion, Batch};
use rayon::prelude::*;
use shared_types::{
    hash_to_hex, ClockSyncStatus, ConformanceTier, EvidenceEntry, TimestampPrecision,
    GENESIS_HASH,
};
use tracing::{info, warn};

use crate::domain::{
    draft_differences, EvidencePack, FailureKind, ReportBuilder, VerificationFailure,
    VerificationReport,
};

type CheckOutcome = Result<(), VerificationFailure>;

fn event_failure(
    kind: FailureKind,
    index: usize,
    entry: &EvidenceEntry,
    detail: impl Into<String>,
) -> VerificationFailure {
    VerificationFailure::new(kind, detail).at(index as u64, entry.event.event_id())
}

#[derive(Debug, Clone, Default)]
pub struct Verifier {
    required_tier: Option<ConformanceTier>,
}

impl Verifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `tier`'s requirements instead of the tier the pack claims.
    pub fn require_tier(mut self, tier: ConformanceTier) -> Self {
        self.required_tier = Some(tier);
        self
    }

    pub fn verify(&self, pack: &EvidencePack) -> VerificationReport {
        let mut report = ReportBuilder::new();

        report.check(check_arrival_order(pack));
        report.extend(check_replay(pack));
        report.extend(check_canonicalization(pack));
        if let Some(outcome) = check_genesis(pack) {
            report.check(outcome);
        }
        report.extend(check_chain(pack));
        report.extend(check_signatures(pack));
        report.extend(pack.batches.iter().map(|batch| check_batch(pack, batch)));
        report.extend(check_inclusion(pack));

        let tier = self.required_tier.unwrap_or_else(|| pack.tier());
        if tier == ConformanceTier::Platinum {
            report.check(check_platinum(pack));
        }

        let report = report.finish();
        if report.is_success() {
            info!(
                events = pack.len(),
                batches = pack.batches.len(),
                checks = report.checks_total,
                "verification passed"
            );
        } else {
            warn!(
                events = pack.len(),
                batches = pack.batches.len(),
                checks = report.checks_total,
                failed = report.failures.len(),
                "verification failed"
            );
        }
        report
    }
}

fn check_arrival_order(pack: &EvidencePack) -> CheckOutcome {
    pack.check_sequence()
        .map_err(|err| VerificationFailure::new(FailureKind::ReplayMismatch, err.to_string()))
}

/// Decode and map every raw message again and compare with the stored draft.
///
/// Only messages that produced events were archived. Messages dropped at
/// ingestion never touched the side tables, so replaying the archived ones
/// reproduces the same table state.
fn check_replay(pack: &EvidencePack) -> Vec<CheckOutcome> {
    let decoded: Vec<_> = pack
        .entries
        .par_iter()
        .map(|entry| decode_message(&entry.raw))
        .collect();

    let mut outcomes: Vec<CheckOutcome> = vec![Ok(()); pack.len()];
    let mut positions: HashMap<u64, usize> = HashMap::with_capacity(pack.len());
    let mut records = Vec::with_capacity(pack.len());

    for (index, (entry, result)) in pack.entries.iter().zip(decoded).enumerate() {
        match result {
            Ok(record) => {
                let arrival = Arrival::new(entry.sequence)
                    .with_received_ns(entry.raw.received_ns)
                    .with_clock_sync(entry.event.draft().header.clock_sync_status);
                positions.insert(entry.sequence, index);
                records.push((arrival, record));
            }
            Err(err) => {
                outcomes[index] = Err(event_failure(
                    FailureKind::DecodeError,
                    index,
                    entry,
                    err.to_string(),
                ))
            }
        }
    }

    let mut mapper = PartitionedMapper::new(FieldMapper::new(pack.context.clone()));
    for mapped in mapper.map_chunk(records) {
        let Some(&index) = positions.get(&mapped.arrival.sequence) else {
            continue;
        };
        let entry = &pack.entries[index];
        outcomes[index] = match mapped.result {
            Err(err) => Err(event_failure(
                FailureKind::MappingError,
                index,
                entry,
                err.to_string(),
            )),
            Ok(replayed) => {
                let fields = draft_differences(entry.event.draft(), &replayed);
                if fields.is_empty() {
                    Ok(())
                } else {
                    Err(event_failure(
                        FailureKind::ReplayMismatch,
                        index,
                        entry,
                        format!("replayed fields differ: {}", fields.join(", ")),
                    ))
                }
            }
        };
    }
    outcomes
}

fn check_canonicalization(pack: &EvidencePack) -> Vec<CheckOutcome> {
    pack.entries
        .par_iter()
        .enumerate()
        .map(|(index, entry)| {
            canonicalize_draft(entry.event.draft())
                .map(|_| ())
                .map_err(|err| {
                    event_failure(
                        FailureKind::CanonicalizationFailure,
                        index,
                        entry,
                        err.to_string(),
                    )
                })
        })
        .collect()
}

fn check_genesis(pack: &EvidencePack) -> Option<CheckOutcome> {
    let first = pack.entries.first()?;
    if *first.event.prev_hash() == GENESIS_HASH {
        Some(Ok(()))
    } else {
        Some(Err(event_failure(
            FailureKind::GenesisMismatch,
            0,
            first,
            format!(
                "first PrevHash is {}, expected all zeros",
                hash_to_hex(first.event.prev_hash())
            ),
        )))
    }
}

/// One outcome per event; every index from the first break on fails.
fn check_chain(pack: &EvidencePack) -> Vec<CheckOutcome> {
    let audit = audit_chain(&pack.sealed_events());
    let mut outcomes: Vec<CheckOutcome> = vec![Ok(()); pack.len()];
    for chain_break in audit.breaks {
        let Some(entry) = pack.entries.get(chain_break.index) else {
            continue;
        };
        let detail = match chain_break.cause {
            BreakCause::HashMismatch => "EventHash does not match recomputed hash".to_string(),
            BreakCause::LinkMismatch => {
                "PrevHash does not match previous EventHash".to_string()
            }
            BreakCause::GenesisMismatch => "chain does not start at genesis".to_string(),
            BreakCause::Uncanonicalizable(reason) => format!("cannot recompute hash: {}", reason),
            BreakCause::AfterBreak { origin } => format!("follows chain break at index {}", origin),
        };
        outcomes[chain_break.index] = Err(event_failure(
            FailureKind::ChainBroken,
            chain_break.index,
            entry,
            detail,
        ));
    }
    outcomes
}

fn check_signatures(pack: &EvidencePack) -> Vec<CheckOutcome> {
    let public_key = match pack.public_key() {
        Ok(key) => key,
        Err(err) => {
            return pack
                .entries
                .iter()
                .enumerate()
                .map(|(index, entry)| {
                    Err(event_failure(
                        FailureKind::SignatureInvalid,
                        index,
                        entry,
                        err.to_string(),
                    ))
                })
                .collect();
        }
    };

    pack.entries
        .par_iter()
        .enumerate()
        .map(|(index, entry)| {
            verify_event_signature(&entry.event, &public_key).map_err(|err| {
                event_failure(FailureKind::SignatureInvalid, index, entry, err.to_string())
            })
        })
        .collect()
}

/// Self-consistency of the batch, and its leaf list against the chain.
fn check_batch(pack: &EvidencePack, batch: &Batch) -> CheckOutcome {
    let malformed = |detail: String| VerificationFailure::new(FailureKind::MalformedTree, detail);

    batch
        .check_consistency()
        .map_err(|err| malformed(err.to_string()))?;

    for (position, leaf) in batch.leaves.iter().enumerate() {
        let index = batch.first_index + position as u64;
        let entry = usize::try_from(index)
            .ok()
            .and_then(|index| pack.entries.get(index))
            .ok_or_else(|| {
                malformed(format!(
                    "{} claims index {} beyond chain length {}",
                    batch.batch_id,
                    index,
                    pack.len()
                ))
            })?;
        if leaf.event_id != entry.event.event_id() || leaf.event_hash != *entry.event.event_hash()
        {
            return Err(malformed(format!(
                "{} leaf {} does not match chain event {}",
                batch.batch_id, position, index
            )));
        }
    }
    Ok(())
}

fn check_inclusion(pack: &EvidencePack) -> Vec<CheckOutcome> {
    let coverage = pack.coverage();
    pack.entries
        .par_iter()
        .zip(coverage.par_iter())
        .enumerate()
        .map(|(index, (entry, batches))| {
            let fail = |kind: FailureKind, detail: String| -> CheckOutcome {
                Err(event_failure(kind, index, entry, detail))
            };
            let batch = match batches.as_slice() {
                [batch] => *batch,
                [] => return fail(FailureKind::MissingFromBatch, "not in any batch".into()),
                many => {
                    let ids: Vec<&str> = many.iter().map(|b| b.batch_id.as_str()).collect();
                    return fail(
                        FailureKind::MalformedTree,
                        format!("claimed by {} batches: {}", many.len(), ids.join(", ")),
                    );
                }
            };

            let position = index as u64 - batch.first_index;
            let proof = match batch.proofs.get(position as usize) {
                Some(proof) if proof.leaf_index == position => proof,
                _ => {
                    return fail(
                        FailureKind::ProofMismatch,
                        format!("{} has no proof for leaf {}", batch.batch_id, position),
                    )
                }
            };
            let leaf = match canonicalize_sealed(&entry.event.sealed) {
                Ok(leaf) => leaf,
                Err(err) => {
                    return fail(
                        FailureKind::ProofMismatch,
                        format!("leaf cannot be rebuilt: {}", err),
                    )
                }
            };
            if verify_inclusion(&leaf, proof, &batch.merkle_root) {
                Ok(())
            } else {
                fail(
                    FailureKind::ProofMismatch,
                    format!("does not verify against {} root", batch.batch_id),
                )
            }
        })
        .collect()
}

/// Platinum sessions must start PTP-locked with nanosecond timestamps.
fn check_platinum(pack: &EvidencePack) -> CheckOutcome {
    let first = pack.entries.first().ok_or_else(|| {
        VerificationFailure::new(FailureKind::TierRequirement, "PLATINUM pack has no events")
    })?;
    let header = &first.event.draft().header;
    let mut unmet = Vec::new();
    if header.clock_sync_status != ClockSyncStatus::PtpLocked {
        unmet.push(format!(
            "ClockSyncStatus is {}, requires PTP_LOCKED",
            header.clock_sync_status.as_str()
        ));
    }
    if header.timestamp_precision != TimestampPrecision::Nanosecond {
        unmet.push(format!(
            "TimestampPrecision is {}, requires NANOSECOND",
            header.timestamp_precision.as_str()
        ));
    }
    if unmet.is_empty() {
        Ok(())
    } else {
        Err(event_failure(
            FailureKind::TierRequirement,
            0,
            first,
            unmet.join("; "),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ec_01_protocol_decoding::domain::records::*;
    use ec_01_protocol_decoding::{decode, encode, DecodedRecord};
    use ec_05_hash_chain::HashChain;
    use ec_03_field_mapping::MappingContext;
    use ec_06_event_signing::{EventSigner, KeyProvider, LocalKeyProvider};
    use ec_07_merkle_batching::{BatchPolicy, MerkleBatcher};
    use shared_types::{PolicyIdentification, Protocol, RawMessage};
    use std::time::{Duration, Instant};
    use uuid::Uuid;

    const ENTER_ORDER_HEX: &str = "4f4141504c303030303030303120204200000064\
                                   4141504c20202020001c6d200001869e48465431\
                                   59504e000000004f4e";

    fn header() -> ItchHeader {
        ItchHeader {
            stock_locate: 1,
            tracking_number: 0,
            timestamp_ns: 34_200_000_001_000,
        }
    }

    fn itch(record: ItchRecord) -> RawMessage {
        RawMessage::market_data(encode(&DecodedRecord::MarketData(record)).unwrap())
    }

    fn session_messages() -> Vec<RawMessage> {
        vec![
            RawMessage::order_entry(hex::decode(ENTER_ORDER_HEX).unwrap())
                .with_received_ns(34_200_000_000_000),
            itch(ItchRecord::AddOrder(AddOrder {
                header: header(),
                order_reference: 77,
                side: b'B',
                shares: 500,
                stock: "AAPL".into(),
                price: 1_855_000,
                attribution: None,
            })),
            itch(ItchRecord::OrderExecuted(OrderExecutedItch {
                header: header(),
                order_reference: 77,
                executed_shares: 200,
                match_number: 1,
            })),
            itch(ItchRecord::OrderExecuted(OrderExecutedItch {
                header: header(),
                order_reference: 77,
                executed_shares: 300,
                match_number: 2,
            })),
            itch(ItchRecord::OrderExecuted(OrderExecutedItch {
                header: header(),
                order_reference: 77,
                executed_shares: 1,
                match_number: 3,
            })),
            itch(ItchRecord::Trade(Trade {
                header: header(),
                order_reference: 0,
                side: b'S',
                shares: 10,
                stock: "AAPL".into(),
                price: 1_860_000,
                match_number: 4,
            })),
            itch(ItchRecord::OrderDelete(OrderDelete {
                header: header(),
                order_reference: 78,
            })),
        ]
    }

    fn context(tier: ConformanceTier) -> MappingContext {
        MappingContext::new(
            Uuid::from_u128(0x5e55),
            NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        )
        .with_policy(PolicyIdentification {
            policy_id: "POL-1".into(),
            conformance_tier: tier,
            issuer: "TEST".into(),
        })
    }

    /// Ingest `messages` the way the pipeline does and pack the result.
    fn build_pack(
        context: MappingContext,
        messages: Vec<RawMessage>,
        clock_sync: ClockSyncStatus,
        genesis: [u8; 32],
    ) -> EvidencePack {
        let mut mapper = PartitionedMapper::new(FieldMapper::new(context.clone()));
        let records = messages
            .iter()
            .enumerate()
            .map(|(sequence, raw)| {
                let arrival = Arrival::new(sequence as u64)
                    .with_received_ns(raw.received_ns)
                    .with_clock_sync(clock_sync);
                (arrival, decode(&raw.bytes, raw.protocol).unwrap())
            })
            .collect();

        let signer = EventSigner::new(LocalKeyProvider::from_seed([9u8; 32]));
        let mut chain = HashChain::resume(genesis, 0);
        let mut batcher = MerkleBatcher::new(BatchPolicy {
            max_events: 3,
            max_age: Duration::from_secs(60),
        });
        let now = Instant::now();
        let mut entries = Vec::new();
        let mut batches = Vec::new();

        for mapped in mapper.map_chunk(records) {
            let sequence = mapped.arrival.sequence;
            let sealed = chain.append(mapped.result.unwrap()).unwrap();
            let event = signer.sign(sealed).unwrap();
            batches.extend(batcher.push(event.clone(), now).unwrap());
            entries.push(EvidenceEntry {
                sequence,
                raw: messages[sequence as usize].clone(),
                event,
            });
        }
        batches.extend(batcher.flush().unwrap());

        EvidencePack::new(context, *signer.public_key().as_bytes())
            .with_entries(entries)
            .with_batches(batches)
    }

    fn intact_pack() -> EvidencePack {
        build_pack(
            context(ConformanceTier::Platinum),
            session_messages(),
            ClockSyncStatus::PtpLocked,
            GENESIS_HASH,
        )
    }

    fn kinds_at(report: &VerificationReport, index: u64) -> Vec<FailureKind> {
        report
            .failures
            .iter()
            .filter(|failure| failure.index == Some(index))
            .map(|failure| failure.kind)
            .collect()
    }

    #[test]
    fn test_intact_pack_passes_every_check() {
        let pack = intact_pack();
        assert_eq!(pack.len(), 7);
        assert_eq!(pack.batches.len(), 3);

        let report = Verifier::new().verify(&pack);
        assert!(report.is_success(), "{:?}", report.failures);
        // order + 5 per event + genesis + 3 batches + tier
        assert_eq!(report.checks_total, 1 + 7 * 5 + 1 + 3 + 1);
        assert_eq!(report.checks_passed, report.checks_total);
    }

    #[test]
    fn test_reconciliation_gaps_replay_cleanly() {
        let pack = intact_pack();
        assert!(pack.entries[4].event.draft().has_reconciliation_gap());
        assert!(pack.entries[6].event.draft().has_reconciliation_gap());
        assert!(Verifier::new().verify(&pack).is_success());
    }

    #[test]
    fn test_altered_field_is_reported_everywhere_it_shows() {
        let mut pack = intact_pack();
        pack.entries[2].event.sealed.draft.trade.volume = Some(201);
        let report = Verifier::new().verify(&pack);

        assert_eq!(
            kinds_at(&report, 2),
            vec![
                FailureKind::ReplayMismatch,
                FailureKind::ChainBroken,
                FailureKind::ProofMismatch,
            ]
        );
        for index in 3..7 {
            assert_eq!(kinds_at(&report, index), vec![FailureKind::ChainBroken]);
        }
        assert!(report.failures_of(FailureKind::SignatureInvalid).next().is_none());
        let replay = report.failures_of(FailureKind::ReplayMismatch).next().unwrap();
        assert!(replay.detail.contains("Trade.Volume"));
        assert_eq!(replay.event_id.as_deref(), Some(pack.entries[2].event.event_id()));
    }

    #[test]
    fn test_wrong_public_key() {
        let mut pack = intact_pack();
        pack.public_key = *LocalKeyProvider::from_seed([1u8; 32])
            .public_key()
            .as_bytes();
        let report = Verifier::new().verify(&pack);
        assert_eq!(report.failure_counts()[&FailureKind::SignatureInvalid], 7);
        assert_eq!(report.failures.len(), 7);
    }

    #[test]
    fn test_forged_signature() {
        let mut pack = intact_pack();
        pack.entries[5].event.signature[0] ^= 1;
        let report = Verifier::new().verify(&pack);
        assert_eq!(kinds_at(&report, 5), vec![FailureKind::SignatureInvalid]);
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_dropped_batch_leaves_events_uncovered() {
        let mut pack = intact_pack();
        pack.batches.pop();
        let report = Verifier::new().verify(&pack);
        assert_eq!(kinds_at(&report, 6), vec![FailureKind::MissingFromBatch]);
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_tampered_root() {
        let mut pack = intact_pack();
        pack.batches[1].merkle_root[31] ^= 1;
        let report = Verifier::new().verify(&pack);

        let malformed: Vec<_> = report.failures_of(FailureKind::MalformedTree).collect();
        assert_eq!(malformed.len(), 1);
        assert!(malformed[0].index.is_none());
        assert!(malformed[0].detail.contains("BATCH-000001"));
        for index in 3..6 {
            assert_eq!(kinds_at(&report, index), vec![FailureKind::ProofMismatch]);
        }
    }

    #[test]
    fn test_batch_leaf_list_must_match_chain() {
        let mut pack = intact_pack();
        pack.batches[0].leaves[1].event_id = "someone-else".into();
        let report = Verifier::new().verify(&pack);
        let malformed: Vec<_> = report.failures_of(FailureKind::MalformedTree).collect();
        assert_eq!(malformed.len(), 1);
        assert!(malformed[0].detail.contains("leaf 1"));
    }

    #[test]
    fn test_overlapping_batches() {
        let mut pack = intact_pack();
        let duplicate = pack.batches[0].clone();
        pack.batches.push(duplicate);
        let report = Verifier::new().verify(&pack);
        for index in 0..3 {
            assert_eq!(kinds_at(&report, index), vec![FailureKind::MalformedTree]);
        }
    }

    #[test]
    fn test_genesis_mismatch_untrusts_whole_chain() {
        let pack = build_pack(
            context(ConformanceTier::Platinum),
            session_messages(),
            ClockSyncStatus::PtpLocked,
            [1u8; 32],
        );
        let report = Verifier::new().verify(&pack);

        assert_eq!(
            kinds_at(&report, 0),
            vec![FailureKind::GenesisMismatch, FailureKind::ChainBroken]
        );
        for index in 1..7 {
            assert_eq!(kinds_at(&report, index), vec![FailureKind::ChainBroken]);
        }
        assert_eq!(report.failures.len(), 8);
        assert_eq!(report.failed_indices(), (0..7).collect::<Vec<u64>>());
    }

    #[test]
    fn test_platinum_requires_ptp_lock() {
        let pack = build_pack(
            context(ConformanceTier::Platinum),
            session_messages(),
            ClockSyncStatus::NtpSynced,
            GENESIS_HASH,
        );
        let report = Verifier::new().verify(&pack);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].kind, FailureKind::TierRequirement);
        assert!(report.failures[0].detail.contains("NTP_SYNCED"));

        let gold = build_pack(
            context(ConformanceTier::Gold),
            session_messages(),
            ClockSyncStatus::NtpSynced,
            GENESIS_HASH,
        );
        let report = Verifier::new().verify(&gold);
        assert!(report.is_success());
        assert_eq!(report.checks_total, 1 + 7 * 5 + 1 + 3);

        let report = Verifier::new()
            .require_tier(ConformanceTier::Platinum)
            .verify(&gold);
        assert_eq!(report.failure_counts()[&FailureKind::TierRequirement], 1);
    }

    #[test]
    fn test_empty_platinum_pack() {
        let pack = EvidencePack::new(context(ConformanceTier::Platinum), [0u8; 32]);
        let report = Verifier::new().verify(&pack);
        assert_eq!(report.checks_total, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].kind, FailureKind::TierRequirement);
    }

    #[test]
    fn test_corrupted_raw_message() {
        let mut pack = intact_pack();
        pack.entries[6].raw.bytes.truncate(5);
        let report = Verifier::new().verify(&pack);
        assert_eq!(kinds_at(&report, 6), vec![FailureKind::DecodeError]);
        assert_eq!(report.failures.len(), 1);
    }

    #[test]
    fn test_replay_under_wrong_trading_date() {
        let mut pack = intact_pack();
        pack.context.trading_date = NaiveDate::from_ymd_opt(2025, 1, 3).unwrap();
        let report = Verifier::new().verify(&pack);
        assert_eq!(report.failure_counts()[&FailureKind::ReplayMismatch], 7);
        assert_eq!(report.failures.len(), 7);
    }

    #[test]
    fn test_mapping_failure_on_replay() {
        let mut pack = intact_pack();
        // Time in force 30 is not in the table.
        pack.entries[0].raw.bytes[32..36].copy_from_slice(&30u32.to_be_bytes());
        let report = Verifier::new().verify(&pack);
        assert_eq!(kinds_at(&report, 0), vec![FailureKind::MappingError]);
        assert_eq!(pack.entries[0].raw.protocol, Protocol::OrderEntry);
    }
}
