//! # Order State
//!
//! Tracks exchange-reported order lifecycle: `{symbol, side, remaining, price}`
//! per order key. The table only records what the exchange reports; it
//! never matches or executes.
//!
//! ## Transitions
//!
//! | Transition | Present key | Missing key |
//! |------------|-------------|-------------|
//! | Add | `DuplicateOrderReference`, unchanged | insert |
//! | Execute / Cancel | decrement, remove at ≤ 0 | `UnknownOrderReference`, unchanged |
//! | Delete | remove | `UnknownOrderReference`, unchanged |
//! | Replace | remove old, insert new atomically | `UnknownOrderReference`, unchanged |
//!
//! No entry is ever stored with zero remaining shares: a zero-share Add is
//! not inserted, and a zero-share Replace removes the old key only.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use super::errors::StateError;

/// Order identity: 8-byte reference (market data) or trimmed token (order entry).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKey {
    Reference(u64),
    Token(String),
}

impl fmt::Display for OrderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderKey::Reference(reference) => write!(f, "{}", reference),
            OrderKey::Token(token) => f.write_str(token),
        }
    }
}

/// Tracked attributes of a live order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderEntry {
    pub symbol: String,
    /// Raw side code as it appeared on the wire.
    pub side: u8,
    pub remaining_shares: u32,
    /// Raw fixed-point price (four implied decimals).
    pub price: u32,
}

/// A state change requested by a decoded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderTransition {
    Add {
        key: OrderKey,
        entry: OrderEntry,
    },
    Execute {
        key: OrderKey,
        shares: u32,
    },
    Cancel {
        key: OrderKey,
        shares: u32,
    },
    Delete {
        key: OrderKey,
    },
    Replace {
        old_key: OrderKey,
        new_key: OrderKey,
        shares: u32,
        price: u32,
    },
}

/// What a successful transition did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// Key the entry lives under afterwards (the new key for Replace).
    pub key: OrderKey,
    /// Entry after the transition; `remaining_shares` is 0 once removed.
    pub entry: OrderEntry,
    /// Remaining shares before the transition.
    pub previous_remaining: u32,
    /// Whether the key left the table.
    pub removed: bool,
}

#[derive(Debug, Clone, Default)]
pub struct OrderState {
    orders: HashMap<OrderKey, OrderEntry>,
}

impl OrderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &OrderKey) -> Option<&OrderEntry> {
        self.orders.get(key)
    }

    pub fn contains(&self, key: &OrderKey) -> bool {
        self.orders.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Apply one transition. On `Err` the table is unchanged.
    pub fn apply(&mut self, transition: OrderTransition) -> Result<TransitionOutcome, StateError> {
        match transition {
            OrderTransition::Add { key, entry } => self.add(key, entry),
            OrderTransition::Execute { key, shares } | OrderTransition::Cancel { key, shares } => {
                self.decrement(key, shares)
            }
            OrderTransition::Delete { key } => self.delete(key),
            OrderTransition::Replace {
                old_key,
                new_key,
                shares,
                price,
            } => self.replace(old_key, new_key, shares, price),
        }
    }

    fn add(&mut self, key: OrderKey, entry: OrderEntry) -> Result<TransitionOutcome, StateError> {
        if self.orders.contains_key(&key) {
            return Err(StateError::DuplicateOrderReference { key });
        }
        let removed = entry.remaining_shares == 0;
        if !removed {
            self.orders.insert(key.clone(), entry.clone());
        }
        Ok(TransitionOutcome {
            key,
            entry,
            previous_remaining: 0,
            removed,
        })
    }

    fn decrement(&mut self, key: OrderKey, shares: u32) -> Result<TransitionOutcome, StateError> {
        let Some(entry) = self.orders.get_mut(&key) else {
            return Err(StateError::UnknownOrderReference { key });
        };
        let previous_remaining = entry.remaining_shares;
        entry.remaining_shares = previous_remaining.saturating_sub(shares);
        let snapshot = entry.clone();
        let removed = snapshot.remaining_shares == 0;
        if removed {
            self.orders.remove(&key);
        }
        Ok(TransitionOutcome {
            key,
            entry: snapshot,
            previous_remaining,
            removed,
        })
    }

    fn delete(&mut self, key: OrderKey) -> Result<TransitionOutcome, StateError> {
        let Some(mut entry) = self.orders.remove(&key) else {
            return Err(StateError::UnknownOrderReference { key });
        };
        let previous_remaining = entry.remaining_shares;
        entry.remaining_shares = 0;
        Ok(TransitionOutcome {
            key,
            entry,
            previous_remaining,
            removed: true,
        })
    }

    fn replace(
        &mut self,
        old_key: OrderKey,
        new_key: OrderKey,
        shares: u32,
        price: u32,
    ) -> Result<TransitionOutcome, StateError> {
        if !self.orders.contains_key(&old_key) {
            return Err(StateError::UnknownOrderReference { key: old_key });
        }
        if old_key != new_key && self.orders.contains_key(&new_key) {
            return Err(StateError::DuplicateOrderReference { key: new_key });
        }
        let Some(old) = self.orders.remove(&old_key) else {
            return Err(StateError::UnknownOrderReference { key: old_key });
        };
        let entry = OrderEntry {
            symbol: old.symbol,
            side: old.side,
            remaining_shares: shares,
            price,
        };
        let removed = shares == 0;
        if !removed {
            self.orders.insert(new_key.clone(), entry.clone());
        }
        Ok(TransitionOutcome {
            key: new_key,
            entry,
            previous_remaining: old.remaining_shares,
            removed,
        })
    }
}
