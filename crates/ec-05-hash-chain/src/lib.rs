//! # Hash Chain Subsystem (ec-05)
//!
//! Links successive events: `EventHash = SHA256(canonical(draft) || PrevHash)`,
//! with the all-zero genesis value as the first `PrevHash`.
//!
//! ## Serialization Point
//!
//! [`HashChain::append`] takes `&mut self`. Each append depends on the
//! previous `EventHash`, so exactly one writer owns the chain; the runtime
//! feeds it from a bounded queue.
//!
//! ## Verification
//!
//! - [`verify_chain`]: first failure only
//! - [`audit_chain`]: every index from the first break onward is reported,
//!   for the verifier's exhaustive report

pub mod domain;

pub use domain::{
    audit_chain, compute_event_hash, recompute_event_hash, seal, verify_chain, BreakCause,
    ChainAudit, ChainBreak, ChainError, HashChain,
};
