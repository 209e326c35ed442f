//! # Side Tables
//!
//! Explicit context object owned by one ingestion partition and passed by
//! reference to the field mapper. Replaces process-wide lookup globals.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::locate::LocateTable;
use super::orders::OrderState;

#[derive(Debug, Clone, Default)]
pub struct SideTables {
    pub locates: LocateTable,
    pub orders: OrderState,
}

impl SideTables {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Unit of ordering for side-table mutation.
///
/// Messages sharing a key are applied in arrival order against one
/// `SideTables`; different keys may be processed concurrently.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PartitionKey {
    /// Market-data traffic for one locate code (directory included).
    Locate(u16),
    /// Order-entry traffic for one symbol.
    Symbol(String),
    /// Order-entry traffic whose token was never seen with a symbol.
    Unrouted,
}

impl fmt::Display for PartitionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartitionKey::Locate(code) => write!(f, "locate:{}", code),
            PartitionKey::Symbol(symbol) => write!(f, "symbol:{}", symbol),
            PartitionKey::Unrouted => f.write_str("unrouted"),
        }
    }
}
