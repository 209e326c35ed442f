//! # Evidence-Chain Benchmarks
//!
//! Stage costs over a synthetic session of repeated add/execute/delete
//! cycles, plus a full session and its verification.
//!
//! ```bash
//! cargo bench -p ec-tests
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use ec_01_protocol_decoding::domain::records::*;
use ec_01_protocol_decoding::{decode_all, encode, DecodedRecord};
use ec_03_field_mapping::{Arrival, FieldMapper, PartitionedMapper};
use ec_04_canonicalization::canonicalize_draft;
use ec_05_hash_chain::HashChain;
use ec_06_event_signing::{EventSigner, LocalKeyProvider};
use ec_07_merkle_batching::MerkleTree;
use ec_08_verification::Verifier;
use ec_tests::fixtures::*;
use shared_types::{EventDraft, Hash, RawMessage};

const SIZES: [usize; 3] = [100, 1_000, 10_000];

// =============================================================================
// SYNTHETIC SESSION
// =============================================================================

/// `count` ITCH messages cycling add → execute → delete over four locates.
fn synthetic_messages(count: usize) -> Vec<RawMessage> {
    (0..count as u64)
        .map(|i| {
            let reference = i / 3;
            let header = ItchHeader {
                stock_locate: (reference % 4) as u16 + 1,
                tracking_number: 0,
                timestamp_ns: 34_200_000_000_000 + i * 1_000,
            };
            let record = match i % 3 {
                0 => ItchRecord::AddOrder(AddOrder {
                    header,
                    order_reference: reference,
                    side: b'B',
                    shares: 1_000,
                    stock: "SYN".into(),
                    price: 1_000_000,
                    attribution: None,
                }),
                1 => ItchRecord::OrderExecuted(OrderExecutedItch {
                    header,
                    order_reference: reference,
                    executed_shares: 400,
                    match_number: i,
                }),
                _ => ItchRecord::OrderDelete(OrderDelete {
                    header,
                    order_reference: reference,
                }),
            };
            RawMessage::market_data(encode(&DecodedRecord::MarketData(record)).unwrap())
        })
        .collect()
}

fn mapped_drafts(messages: &[RawMessage]) -> Vec<EventDraft> {
    let records = decode_all(messages)
        .into_iter()
        .enumerate()
        .map(|(sequence, record)| (Arrival::new(sequence as u64), record.unwrap()))
        .collect();
    let mut mapper = PartitionedMapper::new(FieldMapper::new(session_config().mapping_context()));
    mapper
        .map_chunk(records)
        .into_iter()
        .map(|mapped| mapped.result.unwrap())
        .collect()
}

// =============================================================================
// STAGES
// =============================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");
    for size in SIZES {
        let messages = synthetic_messages(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("decode_all", size), &messages, |b, messages| {
            b.iter(|| black_box(decode_all(messages)))
        });
    }
    group.finish();
}

fn bench_map(c: &mut Criterion) {
    let mut group = c.benchmark_group("map");
    for size in SIZES {
        let messages = synthetic_messages(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("map_chunk", size), &messages, |b, messages| {
            b.iter(|| black_box(mapped_drafts(messages)))
        });
    }
    group.finish();
}

fn bench_seal_and_sign(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain");
    for size in SIZES {
        let drafts = mapped_drafts(&synthetic_messages(size));
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("canonicalize", size), &drafts, |b, drafts| {
            b.iter(|| {
                for draft in drafts {
                    black_box(canonicalize_draft(draft).unwrap());
                }
            })
        });

        group.bench_with_input(BenchmarkId::new("seal_sign", size), &drafts, |b, drafts| {
            let signer = EventSigner::new(LocalKeyProvider::from_seed(SIGNING_SEED));
            b.iter(|| {
                let mut chain = HashChain::new();
                for draft in drafts {
                    black_box(signer.sign(chain.append(draft.clone()).unwrap()).unwrap());
                }
            })
        });
    }
    group.finish();
}

fn bench_merkle(c: &mut Criterion) {
    let mut group = c.benchmark_group("merkle");
    for size in SIZES {
        let leaves: Vec<Hash> = (0..size as u32)
            .map(|i| {
                let mut leaf = [0u8; 32];
                leaf[..4].copy_from_slice(&i.to_be_bytes());
                leaf
            })
            .collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("build", size), &leaves, |b, leaves| {
            b.iter(|| black_box(MerkleTree::from_leaf_hashes(leaves.clone()).root()))
        });

        let tree = MerkleTree::from_leaf_hashes(leaves);
        group.bench_with_input(BenchmarkId::new("prove_all", size), &tree, |b, tree| {
            b.iter(|| {
                for index in 0..tree.len() {
                    black_box(tree.prove_inclusion(index).unwrap());
                }
            })
        });
    }
    group.finish();
}

// =============================================================================
// WHOLE SESSION
// =============================================================================

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("session");
    group.sample_size(20);

    let messages = synthetic_messages(3_000);
    group.throughput(Throughput::Elements(messages.len() as u64));
    group.bench_function("pipeline_3000", |b| {
        b.iter(|| black_box(run_session_blocking(session_config(), messages.clone())))
    });

    let pack = run_session_blocking(session_config(), messages).pack;
    let verifier = Verifier::new();
    group.bench_function("verify_3000", |b| {
        b.iter(|| black_box(verifier.verify(&pack)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_decode,
    bench_map,
    bench_seal_and_sign,
    bench_merkle,
    bench_session,
);
criterion_main!(benches);
