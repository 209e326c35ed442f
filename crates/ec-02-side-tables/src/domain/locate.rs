//! # Locate Table
//!
//! Session-scoped map from 16-bit locate code to symbol. Populated only by
//! directory messages; entries are never removed; last write wins.

use shared_types::SymbolRef;
use std::collections::HashMap;

use super::errors::StateError;

#[derive(Debug, Clone, Default)]
pub struct LocateTable {
    entries: HashMap<u16, String>,
}

impl LocateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `symbol` under `code`, overwriting any previous entry.
    ///
    /// Re-registering the same symbol is a no-op. Registering a different
    /// symbol still overwrites, and returns the non-fatal
    /// `DuplicateLocateRegistration` for the caller to record.
    pub fn register(&mut self, code: u16, symbol: &str) -> Option<StateError> {
        match self.entries.insert(code, symbol.to_string()) {
            Some(previous) if previous != symbol => Some(StateError::DuplicateLocateRegistration {
                code,
                previous,
                symbol: symbol.to_string(),
            }),
            _ => None,
        }
    }

    /// Resolve a locate code. Unregistered codes yield the typed
    /// `UnresolvedLocate` sentinel (rendered `LOCATE_<code>`), never an error.
    pub fn resolve(&self, code: u16) -> SymbolRef {
        match self.entries.get(&code) {
            Some(symbol) => SymbolRef::Resolved(symbol.clone()),
            None => SymbolRef::UnresolvedLocate(code),
        }
    }

    pub fn get(&self, code: u16) -> Option<&str> {
        self.entries.get(&code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
