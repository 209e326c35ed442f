//! # Verification Report
//!
//! Every check the verifier runs is counted once. A check that fails adds
//! exactly one [`VerificationFailure`]; nothing stops enumeration early.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FailureKind {
    DecodeError,
    MappingError,
    /// Replayed draft differs from the stored one.
    ReplayMismatch,
    CanonicalizationFailure,
    GenesisMismatch,
    ChainBroken,
    SignatureInvalid,
    ProofMismatch,
    MalformedTree,
    MissingFromBatch,
    TierRequirement,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::DecodeError => "DECODE_ERROR",
            FailureKind::MappingError => "MAPPING_ERROR",
            FailureKind::ReplayMismatch => "REPLAY_MISMATCH",
            FailureKind::CanonicalizationFailure => "CANONICALIZATION_FAILURE",
            FailureKind::GenesisMismatch => "GENESIS_MISMATCH",
            FailureKind::ChainBroken => "CHAIN_BROKEN",
            FailureKind::SignatureInvalid => "SIGNATURE_INVALID",
            FailureKind::ProofMismatch => "PROOF_MISMATCH",
            FailureKind::MalformedTree => "MALFORMED_TREE",
            FailureKind::MissingFromBatch => "MISSING_FROM_BATCH",
            FailureKind::TierRequirement => "TIER_REQUIREMENT",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationFailure {
    /// Absent for pack-level checks (batches, tier).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Chain index of the event concerned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u64>,
    pub kind: FailureKind,
    pub detail: String,
}

impl VerificationFailure {
    pub fn new(kind: FailureKind, detail: impl Into<String>) -> Self {
        Self {
            event_id: None,
            index: None,
            kind,
            detail: detail.into(),
        }
    }

    pub fn at(mut self, index: u64, event_id: impl Into<String>) -> Self {
        self.index = Some(index);
        self.event_id = Some(event_id.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub checks_total: u64,
    pub checks_passed: u64,
    pub failures: Vec<VerificationFailure>,
}

impl VerificationReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty() && self.checks_passed == self.checks_total
    }

    pub fn failure_counts(&self) -> BTreeMap<FailureKind, usize> {
        let mut counts = BTreeMap::new();
        for failure in &self.failures {
            *counts.entry(failure.kind).or_insert(0) += 1;
        }
        counts
    }

    pub fn failures_of(&self, kind: FailureKind) -> impl Iterator<Item = &VerificationFailure> {
        self.failures.iter().filter(move |failure| failure.kind == kind)
    }

    /// Chain indices with at least one failure, ascending.
    pub fn failed_indices(&self) -> Vec<u64> {
        let mut indices: Vec<u64> = self.failures.iter().filter_map(|f| f.index).collect();
        indices.sort_unstable();
        indices.dedup();
        indices
    }
}

/// Tallies checks while the verifier runs.
#[derive(Debug, Default)]
pub struct ReportBuilder {
    checks_total: u64,
    checks_passed: u64,
    failures: Vec<VerificationFailure>,
}

impl ReportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one check.
    pub fn check(&mut self, outcome: Result<(), VerificationFailure>) {
        self.checks_total += 1;
        match outcome {
            Ok(()) => self.checks_passed += 1,
            Err(failure) => self.failures.push(failure),
        }
    }

    pub fn extend<I>(&mut self, outcomes: I)
    where
        I: IntoIterator<Item = Result<(), VerificationFailure>>,
    {
        for outcome in outcomes {
            self.check(outcome);
        }
    }

    /// Pack-level failures first, then by chain index; the order checks
    /// ran in is kept within an index.
    pub fn finish(mut self) -> VerificationReport {
        self.failures
            .sort_by_key(|failure| failure.index.map_or(0, |index| index + 1));
        VerificationReport {
            checks_total: self.checks_total,
            checks_passed: self.checks_passed,
            failures: self.failures,
        }
    }
}
