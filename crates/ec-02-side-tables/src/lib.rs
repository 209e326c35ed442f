//! # Side Tables Subsystem (ec-02)
//!
//! Mutable lookup state built incrementally from decoded records:
//!
//! - [`LocateTable`]: locate code → symbol, from directory messages
//! - [`OrderState`]: order key → `{symbol, side, remaining, price}`
//!
//! ## Error Policy
//!
//! All [`StateError`]s are non-fatal. An unknown or duplicate order key
//! leaves the table unchanged; the caller still emits the event and tags it
//! with a reconciliation-gap marker.
//!
//! ## Concurrency
//!
//! Tables are plain owned values. The runtime partitions traffic by
//! [`PartitionKey`] and gives each partition its own [`SideTables`];
//! [`PartitionRouter`] assigns the key.

pub mod domain;

pub use domain::{
    LocateTable, OrderEntry, OrderKey, OrderState, OrderTransition, PartitionKey,
    PartitionRouter, RouteHint, SideTables, StateError, TransitionOutcome,
};
