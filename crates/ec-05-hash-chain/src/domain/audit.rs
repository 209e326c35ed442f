//! # Chain Audit
//!
//! Exhaustive variant of [`verify_chain`](super::chain::verify_chain): walks
//! the whole chain once and reports every index that can no longer be
//! trusted, instead of stopping at the first.
//!
//! Once index `i` breaks, every later index is reported too. An event whose
//! own hash and link are intact but which follows a break is reported as
//! [`BreakCause::AfterBreak`]. A first event that does not descend from the
//! genesis value breaks the chain at index 0.

use shared_types::{SealedEvent, GENESIS_HASH};

use super::chain::recompute_event_hash;
use super::errors::ChainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreakCause {
    /// Recomputed `EventHash` differs from the stored one.
    HashMismatch,
    /// `PrevHash` differs from the previous event's `EventHash`.
    LinkMismatch,
    /// First event's `PrevHash` is not the genesis value.
    GenesisMismatch,
    /// The draft could not be canonicalized.
    Uncanonicalizable(String),
    /// Intact on its own, but descends from the break at `origin`.
    AfterBreak { origin: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainBreak {
    pub index: usize,
    pub cause: BreakCause,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChainAudit {
    pub length: usize,
    pub genesis_mismatch: bool,
    /// One entry per untrusted index, ascending.
    pub breaks: Vec<ChainBreak>,
}

impl ChainAudit {
    pub fn is_intact(&self) -> bool {
        !self.genesis_mismatch && self.breaks.is_empty()
    }

    pub fn first_break(&self) -> Option<usize> {
        self.breaks.first().map(|b| b.index)
    }

    pub fn is_trusted(&self, index: usize) -> bool {
        self.first_break().map_or(true, |first| index < first)
    }

    /// The audit as chain errors, genesis first.
    pub fn errors(&self) -> Vec<ChainError> {
        let genesis = self
            .genesis_mismatch
            .then_some(ChainError::GenesisMismatch);
        genesis
            .into_iter()
            .chain(
                self.breaks
                    .iter()
                    .filter(|b| b.cause != BreakCause::GenesisMismatch)
                    .map(|b| ChainError::ChainBroken { index: b.index }),
            )
            .collect()
    }
}

/// Audit the whole chain.
pub fn audit_chain(events: &[SealedEvent]) -> ChainAudit {
    let mut audit = ChainAudit {
        length: events.len(),
        genesis_mismatch: events
            .first()
            .map_or(false, |first| first.prev_hash != GENESIS_HASH),
        breaks: Vec::new(),
    };

    let mut origin: Option<usize> = None;
    for (index, event) in events.iter().enumerate() {
        let own_cause = match recompute_event_hash(event) {
            Err(err) => Some(BreakCause::Uncanonicalizable(err.to_string())),
            Ok(hash) if hash != event.event_hash => Some(BreakCause::HashMismatch),
            Ok(_) if index == 0 && audit.genesis_mismatch => Some(BreakCause::GenesisMismatch),
            Ok(_) if index > 0 && event.prev_hash != events[index - 1].event_hash => {
                Some(BreakCause::LinkMismatch)
            }
            Ok(_) => None,
        };

        let cause = match (own_cause, origin) {
            (Some(cause), _) => cause,
            (None, Some(origin)) => BreakCause::AfterBreak { origin },
            (None, None) => continue,
        };
        origin.get_or_insert(index);
        audit.breaks.push(ChainBreak { index, cause });
    }
    audit
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::chain::{seal, HashChain};
    use shared_types::test_utils::make_test_drafts;

    fn build(count: u64) -> Vec<SealedEvent> {
        let mut chain = HashChain::new();
        make_test_drafts(count)
            .into_iter()
            .map(|draft| chain.append(draft).unwrap())
            .collect()
    }

    #[test]
    fn test_intact_chain() {
        let audit = audit_chain(&build(6));
        assert!(audit.is_intact());
        assert_eq!(audit.length, 6);
        assert!(audit.errors().is_empty());
        assert!(audit.is_trusted(5));
    }

    #[test]
    fn test_break_cascades_to_every_later_index() {
        let mut events = build(6);
        events[2].draft.trade.symbol = "MSFT".into();
        let audit = audit_chain(&events);

        assert_eq!(audit.first_break(), Some(2));
        let indices: Vec<usize> = audit.breaks.iter().map(|b| b.index).collect();
        assert_eq!(indices, vec![2, 3, 4, 5]);
        assert_eq!(audit.breaks[0].cause, BreakCause::HashMismatch);
        assert_eq!(audit.breaks[1].cause, BreakCause::AfterBreak { origin: 2 });
        assert!(audit.is_trusted(1));
        assert!(!audit.is_trusted(2));
        assert_eq!(
            audit.errors(),
            (2..6)
                .map(|index| ChainError::ChainBroken { index })
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_second_fault_keeps_its_own_cause() {
        let mut events = build(5);
        events[1].draft.trade.volume = Some(7);
        events[3].prev_hash = [9u8; 32];
        let audit = audit_chain(&events);

        assert_eq!(audit.breaks.len(), 4);
        assert_eq!(audit.breaks[2].index, 3);
        // Event 3's own hash commits to the forged PrevHash, so it fails on both;
        // the hash check is reported.
        assert_eq!(audit.breaks[2].cause, BreakCause::HashMismatch);
    }

    #[test]
    fn test_link_mismatch_detected() {
        let mut events = build(3);
        // Re-seal event 2 onto a foreign predecessor: self-consistent, wrong link.
        events[2] = seal(events[2].draft.clone(), [5u8; 32]).unwrap();
        let audit = audit_chain(&events);
        assert_eq!(
            audit.breaks,
            vec![ChainBreak {
                index: 2,
                cause: BreakCause::LinkMismatch
            }]
        );
    }

    #[test]
    fn test_genesis_mismatch_cascades_from_the_head() {
        let mut chain = HashChain::resume([7u8; 32], 0);
        let events: Vec<SealedEvent> = make_test_drafts(4)
            .into_iter()
            .map(|draft| chain.append(draft).unwrap())
            .collect();
        let audit = audit_chain(&events);

        assert!(audit.genesis_mismatch);
        assert!(!audit.is_intact());
        assert_eq!(audit.first_break(), Some(0));
        assert_eq!(audit.breaks[0].cause, BreakCause::GenesisMismatch);
        for index in 1..4 {
            assert_eq!(audit.breaks[index].cause, BreakCause::AfterBreak { origin: 0 });
            assert!(!audit.is_trusted(index));
        }
        assert_eq!(
            audit.errors(),
            std::iter::once(ChainError::GenesisMismatch)
                .chain((1..4).map(|index| ChainError::ChainBroken { index }))
                .collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_genesis_mismatch_with_altered_head() {
        let mut events = build(3);
        events[0].prev_hash = [1u8; 32];
        let audit = audit_chain(&events);

        assert!(audit.genesis_mismatch);
        // The stored hash no longer commits to the forged PrevHash.
        assert_eq!(audit.breaks[0].cause, BreakCause::HashMismatch);
        assert_eq!(audit.breaks.len(), 3);
        assert_eq!(audit.errors()[0], ChainError::GenesisMismatch);
        assert_eq!(audit.errors()[1], ChainError::ChainBroken { index: 0 });
    }

    #[test]
    fn test_uncanonicalizable_event() {
        let mut events = build(2);
        events[0].draft.trade.price = Some(f64::NAN);
        let audit = audit_chain(&events);
        assert!(matches!(
            audit.breaks[0].cause,
            BreakCause::Uncanonicalizable(_)
        ));
        assert_eq!(audit.breaks.len(), 2);
    }
}
