//! # Shared Types Crate
//!
//! This crate contains the data model every evidence-chain subsystem agrees
//! on: raw exchange messages, the normalized event draft, and the sealed and
//! signed forms produced by the hash chain and the signer.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: The event document shape is defined once, here.
//!   Canonicalization, hashing, signing and verification all read it from this crate.
//! - **Drafts carry no hashes**: `PrevHash` and `EventHash` only exist on
//!   [`SealedEvent`]; the draft that gets hashed never contains them.
//! - **No nulls**: absent optional fields are omitted from the JSON document.

pub mod entities;
pub mod events;
pub mod hex_serde;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod vocabulary;

pub use entities::*;
pub use events::*;
pub use vocabulary::*;
