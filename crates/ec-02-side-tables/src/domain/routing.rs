//! # Partition Routing
//!
//! Decides which [`PartitionKey`] a record's side-table transition belongs
//! to. Market data routes by locate code. Order entry routes by symbol, but
//! only Enter/Accepted/Replaced carry one, so the router remembers which
//! symbol each token was last seen with.
//!
//! Routing itself is sequential and cheap; mapping inside each partition
//! may then run in parallel.
//!
//! Token bindings live for the whole session and are never evicted. Tokens
//! are unique within a trading day, so the map is bounded by the day's
//! order count. Routing runs ahead of mapping and cannot see order state, so
//! dropping a binding when its order leaves the book would make a late
//! message's partition depend on where chunk boundaries fell.

use std::collections::HashMap;

use super::tables::PartitionKey;

/// What the router needs to know about a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteHint<'a> {
    /// Market-data record for this locate code.
    Locate(u16),
    /// Order-entry record that names its symbol; `tokens` become bound to it.
    TokensWithSymbol {
        symbol: &'a str,
        tokens: &'a [&'a str],
    },
    /// Order-entry record that names only a token.
    Token(&'a str),
}

#[derive(Debug, Clone, Default)]
pub struct PartitionRouter {
    /// Token → symbol, for the whole session.
    token_symbols: HashMap<String, String>,
}

impl PartitionRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(&mut self, hint: RouteHint<'_>) -> PartitionKey {
        match hint {
            RouteHint::Locate(code) => PartitionKey::Locate(code),
            RouteHint::TokensWithSymbol { symbol, tokens } => {
                for token in tokens {
                    self.token_symbols
                        .insert((*token).to_string(), symbol.to_string());
                }
                PartitionKey::Symbol(symbol.to_string())
            }
            RouteHint::Token(token) => match self.token_symbols.get(token) {
                Some(symbol) => PartitionKey::Symbol(symbol.clone()),
                None => PartitionKey::Unrouted,
            },
        }
    }

    pub fn known_tokens(&self) -> usize {
        self.token_symbols.len()
    }
}
