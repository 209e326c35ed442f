//! # Partitioned Mapping Service
//!
//! Maps a chunk of decoded records with one [`SideTables`] per partition.
//! Records are routed sequentially in arrival order, then each partition is
//! mapped on its own rayon task. Within a partition the arrival order is
//! kept, so the result equals mapping the whole chunk against that
//! partition's tables one record at a time.
//!
//! Results come back sorted by arrival sequence, ready for the chain stage.

use std::collections::HashMap;

use ec_01_protocol_decoding::{DecodedRecord, OuchRecord};
use ec_02_side_tables::{PartitionKey, PartitionRouter, RouteHint, SideTables};
use rayon::prelude::*;
use shared_types::EventDraft;
use tracing::debug;

use crate::domain::{Arrival, FieldMapper, MappingError};

/// Outcome for one record, tagged with its arrival.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedRecord {
    pub arrival: Arrival,
    pub result: Result<EventDraft, MappingError>,
}

/// Records of one partition together with its tables.
struct PartitionWork {
    key: PartitionKey,
    tables: SideTables,
    records: Vec<(Arrival, DecodedRecord)>,
}

#[derive(Debug)]
pub struct PartitionedMapper {
    mapper: FieldMapper,
    router: PartitionRouter,
    partitions: HashMap<PartitionKey, SideTables>,
}

impl PartitionedMapper {
    pub fn new(mapper: FieldMapper) -> Self {
        Self {
            mapper,
            router: PartitionRouter::new(),
            partitions: HashMap::new(),
        }
    }

    pub fn mapper(&self) -> &FieldMapper {
        &self.mapper
    }

    pub fn partition_count(&self) -> usize {
        self.partitions.len()
    }

    pub fn tables(&self, key: &PartitionKey) -> Option<&SideTables> {
        self.partitions.get(key)
    }

    /// Partition a record belongs to, binding any tokens it introduces.
    pub fn route(&mut self, record: &DecodedRecord) -> PartitionKey {
        match record {
            DecodedRecord::MarketData(record) => {
                self.router.route(RouteHint::Locate(record.stock_locate()))
            }
            DecodedRecord::OrderEntry(OuchRecord::EnterOrder(record)) => {
                self.router.route(RouteHint::TokensWithSymbol {
                    symbol: &record.stock,
                    tokens: &[record.token.as_str()],
                })
            }
            DecodedRecord::OrderEntry(OuchRecord::OrderAccepted(record)) => {
                self.router.route(RouteHint::TokensWithSymbol {
                    symbol: &record.stock,
                    tokens: &[record.token.as_str()],
                })
            }
            DecodedRecord::OrderEntry(OuchRecord::OrderReplaced(record)) => {
                self.router.route(RouteHint::TokensWithSymbol {
                    symbol: &record.stock,
                    tokens: &[record.token.as_str(), record.previous_token.as_str()],
                })
            }
            DecodedRecord::OrderEntry(record) => self.router.route(RouteHint::Token(record.token())),
        }
    }

    /// Map a chunk, returning one result per record ordered by sequence.
    pub fn map_chunk(&mut self, records: Vec<(Arrival, DecodedRecord)>) -> Vec<MappedRecord> {
        let total = records.len();
        let mut grouped: HashMap<PartitionKey, Vec<(Arrival, DecodedRecord)>> = HashMap::new();
        for (arrival, record) in records {
            let key = self.route(&record);
            grouped.entry(key).or_default().push((arrival, record));
        }

        let mut work: Vec<PartitionWork> = grouped
            .into_iter()
            .map(|(key, records)| PartitionWork {
                tables: self.partitions.remove(&key).unwrap_or_default(),
                key,
                records,
            })
            .collect();

        let mapper = &self.mapper;
        let mut mapped: Vec<MappedRecord> = work
            .par_iter_mut()
            .flat_map_iter(|partition| {
                let PartitionWork { tables, records, .. } = partition;
                records
                    .iter()
                    .map(|(arrival, record)| MappedRecord {
                        arrival: *arrival,
                        result: mapper.map(record, *arrival, tables),
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        debug!(records = total, partitions = work.len(), "mapped chunk");
        for partition in work {
            self.partitions.insert(partition.key, partition.tables);
        }

        mapped.sort_by_key(|record| record.arrival.sequence);
        mapped
    }
}
