//! # Canonicalization Subsystem (ec-04)
//!
//! Unique byte representation of an event document, required before it is
//! hashed or placed in a Merkle leaf.
//!
//! ## Rules
//!
//! - Object keys sorted lexicographically by code unit, at every depth
//! - No insignificant whitespace
//! - Strings escaped minimally (`"`, `\`, control characters); UTF-8 kept raw
//! - Integers in plain decimal; floats in shortest round-trip decimal with
//!   no exponent and no trailing zeros; `-0` written as `0`
//! - NaN and infinity rejected with `NonCanonicalizableValue`
//!
//! Absent optional fields are omitted by the document types, so `null` only
//! appears when a caller serializes one explicitly.

pub mod domain;

pub use domain::{
    canonical_string, canonicalize, canonicalize_draft, canonicalize_sealed,
    CanonicalizationError,
};
