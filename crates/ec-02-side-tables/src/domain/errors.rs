//! # State Errors
//!
//! Every state error is non-fatal: the table is left as documented for each
//! case, the event is still emitted and carries a reconciliation-gap marker.

use shared_types::GapKind;
use thiserror::Error;

use super::orders::OrderKey;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StateError {
    /// Execute/Cancel/Delete/Replace for a key the table does not hold.
    #[error("Unknown order reference {key}")]
    UnknownOrderReference { key: OrderKey },

    /// Add (or Replace target) for a key that already exists.
    #[error("Duplicate order reference {key}")]
    DuplicateOrderReference { key: OrderKey },

    /// Locate code re-registered with a different symbol. The new symbol
    /// was still written.
    #[error("Locate {code} re-registered: {previous} -> {symbol}")]
    DuplicateLocateRegistration {
        code: u16,
        previous: String,
        symbol: String,
    },
}

impl StateError {
    /// State errors never halt ingestion.
    pub fn is_fatal(&self) -> bool {
        false
    }

    pub fn gap_kind(&self) -> GapKind {
        match self {
            StateError::UnknownOrderReference { .. } => GapKind::UnknownOrderReference,
            StateError::DuplicateOrderReference { .. } => GapKind::DuplicateOrderReference,
            StateError::DuplicateLocateRegistration { .. } => GapKind::DuplicateLocateRegistration,
        }
    }
}
