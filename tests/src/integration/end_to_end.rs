//! # End-to-End Sessions
//!
//! Raw OUCH/ITCH bytes go into a live pipeline; the archive that comes out
//! must verify on its own, before and after a trip through its JSON form.

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::sync::Arc;

    use ec_01_protocol_decoding::decode_message;
    use ec_03_field_mapping::{Arrival, FieldMapper, PartitionedMapper};
    use ec_04_canonicalization::canonicalize_sealed;
    use ec_05_hash_chain::verify_chain;
    use ec_06_event_signing::LocalKeyProvider;
    use ec_07_merkle_batching::{verify_inclusion, Batch};
    use ec_08_verification::{EvidencePack, FailureKind, VerificationReport, Verifier};
    use evidence_runtime::{verify_pack, InMemoryEvidenceSink, Pipeline, StaticClockSource};
    use serde_json::Value;
    use shared_types::{ClockSyncStatus, EventType, EvidenceEntry, GENESIS_HASH};

    use crate::fixtures::*;

    // =========================================================================
    // HELPERS
    // =========================================================================

    fn contains_null(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Array(items) => items.iter().any(contains_null),
            Value::Object(fields) => fields.values().any(contains_null),
            _ => false,
        }
    }

    fn round_trip_archive(pack: &EvidencePack) -> EvidencePack {
        let entries = serde_json::to_string(&pack.entries).unwrap();
        let batches = serde_json::to_string(&pack.batches).unwrap();
        let entries: Vec<EvidenceEntry> = serde_json::from_str(&entries).unwrap();
        let batches: Vec<Batch> = serde_json::from_str(&batches).unwrap();
        EvidencePack::new(pack.context.clone(), pack.public_key)
            .with_entries(entries)
            .with_batches(batches)
    }

    // =========================================================================
    // SESSION FLOW
    // =========================================================================

    #[tokio::test]
    async fn test_session_archive_verifies() {
        let run = run_session(session_config(), trading_session()).await;

        assert!(run.rejected.is_empty());
        assert_eq!(run.summary.messages_received, 16);
        assert_eq!(run.summary.events_sealed, 16);
        assert_eq!(run.summary.reconciliation_gaps, 0);
        assert_eq!(run.summary.batches_closed, 4);
        assert_eq!(run.receipts.len(), 4);
        assert_eq!(
            run.summary.chain_head,
            hex::encode(run.pack.entries[15].event.event_hash())
        );

        let report = Verifier::new().verify(&run.pack);
        assert!(report.is_success(), "{:?}", report.failures);
        // order + 5 per event + genesis + 4 batches + tier
        assert_eq!(report.checks_total, 1 + 16 * 5 + 1 + 4 + 1);
    }

    #[tokio::test]
    async fn test_event_types_follow_the_session() {
        let run = run_session(session_config(), trading_session()).await;
        let types: Vec<EventType> = run
            .pack
            .entries
            .iter()
            .map(|entry| entry.event.draft().header.event_type)
            .collect();
        assert_eq!(
            types,
            vec![
                EventType::Ref,
                EventType::Ref,
                EventType::Ord,
                EventType::Ack,
                EventType::Ord,
                EventType::Ord,
                EventType::Prt,
                EventType::Mod,
                EventType::Prt,
                EventType::Cxl,
                EventType::Exe,
                EventType::Mod,
                EventType::Cxl,
                EventType::Trd,
                EventType::Rej,
                EventType::Cxl,
            ]
        );

        let symbols: BTreeSet<&str> = run
            .pack
            .entries
            .iter()
            .map(|entry| entry.event.draft().trade.symbol.as_str())
            .collect();
        assert_eq!(
            symbols,
            ["AAPL", "MSFT", "UNRESOLVED"].into_iter().collect()
        );
    }

    #[tokio::test]
    async fn test_chain_and_batches_line_up() {
        let run = run_session(session_config(), trading_session()).await;
        let pack = &run.pack;

        assert_eq!(pack.entries[0].event.prev_hash(), &GENESIS_HASH);
        verify_chain(&pack.sealed_events()).unwrap();

        let sizes: Vec<usize> = pack.batches.iter().map(Batch::len).collect();
        assert_eq!(sizes, vec![5, 5, 5, 1]);
        for (batch, receipt) in pack.batches.iter().zip(&run.receipts) {
            assert_eq!(receipt.batch_id, batch.batch_id);
            assert_eq!(receipt.merkle_root, batch.merkle_root);
            for (position, proof) in batch.proofs.iter().enumerate() {
                let entry = &pack.entries[batch.first_index as usize + position];
                let leaf = canonicalize_sealed(&entry.event.sealed).unwrap();
                assert!(verify_inclusion(&leaf, proof, &batch.merkle_root));
            }
        }
    }

    #[tokio::test]
    async fn test_split_submissions_match_single_submission() {
        let whole = run_session(session_config(), trading_session()).await;

        let sink = Arc::new(InMemoryEvidenceSink::new());
        let mut handle = Pipeline::new(
            session_config(),
            LocalKeyProvider::from_seed(SIGNING_SEED),
            sink.clone(),
        )
        .with_clock(Arc::new(StaticClockSource::new(ClockSyncStatus::PtpLocked)))
        .start()
        .unwrap();
        let mut messages = trading_session();
        let rest = messages.split_off(7);
        handle.submit(messages).await.unwrap();
        handle.submit(rest).await.unwrap();
        handle.finish().await.unwrap();

        let split: Vec<_> = sink.entries().into_iter().map(|entry| entry.event).collect();
        let single: Vec<_> = whole.pack.entries.into_iter().map(|entry| entry.event).collect();
        assert_eq!(split, single);
    }

    #[tokio::test]
    async fn test_replay_reproduces_every_draft() {
        let run = run_session(session_config(), trading_session()).await;
        let pack = &run.pack;

        let records = pack
            .entries
            .iter()
            .map(|entry| {
                let arrival = Arrival::new(entry.sequence)
                    .with_received_ns(entry.raw.received_ns)
                    .with_clock_sync(entry.event.draft().header.clock_sync_status);
                (arrival, decode_message(&entry.raw).unwrap())
            })
            .collect();
        let mut mapper = PartitionedMapper::new(FieldMapper::new(pack.context.clone()));
        let replayed = mapper.map_chunk(records);

        assert_eq!(replayed.len(), pack.len());
        for (mapped, entry) in replayed.into_iter().zip(&pack.entries) {
            assert_eq!(&mapped.result.unwrap(), entry.event.draft());
        }
    }

    // =========================================================================
    // ARCHIVE FORMAT
    // =========================================================================

    #[tokio::test]
    async fn test_archived_documents_are_complete() {
        let run = run_session(session_config(), trading_session()).await;

        for entry in &run.pack.entries {
            let doc = serde_json::to_value(&entry.event).unwrap();
            assert!(!contains_null(&doc), "{}", doc);
            assert_eq!(doc["Header"]["SignAlgo"], "ED25519");
            assert_eq!(doc["Signature"]["Algo"], doc["Header"]["SignAlgo"]);
            assert_eq!(
                doc["Header"]["EventHash"],
                hex::encode(entry.event.event_hash())
            );
            assert_eq!(
                doc["Signature"]["Value"],
                hex::encode(entry.event.signature)
            );
            assert_eq!(doc["PolicyIdentification"]["PolicyID"], "POL-EQ-01");
            assert_eq!(doc["Governance"]["FirmID"], "HFT1");
            assert!(doc.get("Reconciliation").is_none());
        }
    }

    #[tokio::test]
    async fn test_archive_survives_json_round_trip() {
        let run = run_session(session_config(), trading_session()).await;
        let restored = round_trip_archive(&run.pack);

        assert_eq!(restored.entries, run.pack.entries);
        assert_eq!(restored.batches, run.pack.batches);
        let report = Verifier::new().verify(&restored);
        assert!(report.is_success(), "{:?}", report.failures);
    }

    #[tokio::test]
    async fn test_report_serializes_for_auditors() {
        let run = run_session(session_config(), trading_session()).await;
        let mut pack = run.pack;
        pack.entries[9].event.signature[10] ^= 0x01;

        let report = verify_pack(&Verifier::new(), &pack);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["checksTotal"], report.checks_total);
        assert_eq!(json["failures"][0]["kind"], "SIGNATURE_INVALID");
        assert_eq!(json["failures"][0]["index"], 9);
        assert_eq!(
            json["failures"][0]["eventId"],
            pack.entries[9].event.event_id()
        );

        let parsed: VerificationReport = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, report);
        assert_eq!(parsed.failure_counts()[&FailureKind::SignatureInvalid], 1);
    }
}
