//! # Field Mapping Subsystem (ec-03)
//!
//! Turns a decoded OUCH/ITCH record plus side-table context into a
//! protocol-agnostic event draft.
//!
//! ## Record → Event
//!
//! | Record | EventType | Side-table effect |
//! |--------|-----------|-------------------|
//! | OUCH `O` | ORD | none |
//! | OUCH `A` | ACK | add by token |
//! | OUCH `U` | MOD | replace previous token → new token |
//! | OUCH `C` | CXL | decrement |
//! | OUCH `E` | EXE / PRT | decrement |
//! | OUCH `J` | REJ | none |
//! | ITCH `R` | REF | register locate |
//! | ITCH `A`/`F` | ORD | add by reference |
//! | ITCH `E`/`C` | EXE / PRT | decrement |
//! | ITCH `X` | CXL | decrement |
//! | ITCH `D` | CXL | remove |
//! | ITCH `U` | MOD | replace |
//! | ITCH `P` | TRD | none |
//!
//! An execution that leaves shares open is `PRT`; one that closes the order,
//! or hits an unknown order, is `EXE`.
//!
//! ## Failure Policy
//!
//! [`MappingError`] drops the message before any table is touched.
//! Side-table errors never drop it: the draft carries a reconciliation gap.
//!
//! ## Parallelism
//!
//! [`PartitionedMapper`] keeps one set of side tables per partition and maps
//! partitions concurrently, preserving arrival order within each.

pub mod domain;
pub mod service;

pub use domain::enums;
pub use domain::{
    decode_price, decode_timestamp, encode_price, Arrival, EventTimestamp, FieldMapper,
    MappingContext, MappingError, NANOS_PER_DAY, PRICE_SCALE,
};
pub use service::{MappedRecord, PartitionedMapper};
