//! # Verification Subsystem (ec-08)
//!
//! Independent re-validation of an evidence pack. The verifier replays
//! decode and mapping from the archived raw messages, recomputes the hash
//! chain, checks every signature and every Merkle inclusion proof, and
//! reports all discrepancies it finds rather than the first.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): [`EvidencePack`], [`VerificationReport`],
//!   draft comparison
//! - **Service Layer** (`service.rs`): [`Verifier`]
//!
//! ## Trust
//!
//! A chain break at index `i` marks `i` and every later index untrusted.
//! Signature and inclusion checks still run for those indices so the report
//! shows the full extent of the damage.

pub mod domain;
pub mod service;

pub use domain::{
    draft_differences, EvidencePack, FailureKind, PackError, ReportBuilder, VerificationFailure,
    VerificationReport,
};
pub use service::Verifier;
